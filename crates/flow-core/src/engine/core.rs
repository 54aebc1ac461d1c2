//! Core FlowEngine implementation

use log::{debug, info, warn};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::constants::FIRST_STEP_INDEX;
use crate::engine::{EngineBuilderInit, JumpRejection, ResetReason, Transition};
use crate::event::{EventStore, FlowEvent, FlowEventKind, InMemoryEventStore};
use crate::hashing::hash_value;
use crate::repo::FlowDefinition;
use crate::selection::{SelectionField, SelectionStore};
use crate::step::{StepDefinition, StepId, StepView};

/// Controlador de transiciones de un flujo lineal.
///
/// Posee en exclusiva las selecciones del flujo y el cursor (1-based,
/// acotado a `[1, N]`). Ninguna operación falla: los avances inválidos son
/// no-ops registrados en el log de eventos.
#[derive(Debug)]
pub struct FlowEngine<S, E = InMemoryEventStore>
    where S: SelectionStore,
          E: EventStore
{
    flow_id: Uuid,
    definition: FlowDefinition<S>,
    initial: S,
    selections: S,
    current: usize,
    event_store: E,
}

impl<S: SelectionStore> FlowEngine<S, InMemoryEventStore> {
    /// Crea un nuevo engine con store de eventos en memoria.
    #[inline]
    pub fn new(initial: S) -> EngineBuilderInit<S, InMemoryEventStore> {
        EngineBuilderInit { initial,
                            event_store: InMemoryEventStore::default() }
    }
}

impl<S, E> FlowEngine<S, E>
    where S: SelectionStore,
          E: EventStore
{
    /// Crea un nuevo builder con un store de eventos propio.
    #[inline]
    pub fn builder(initial: S, event_store: E) -> EngineBuilderInit<S, E> {
        EngineBuilderInit { initial, event_store }
    }

    /// Crea el engine a partir de una definición ya construida y emite `FlowInitialized`.
    pub fn with_definition(definition: FlowDefinition<S>, initial: S, mut event_store: E) -> Self {
        let flow_id = Uuid::new_v4();
        event_store.append_kind(flow_id,
                                FlowEventKind::FlowInitialized { definition_hash: definition.definition_hash.clone(),
                                                                 step_count: definition.len() });
        debug!("flow {} initialized with {} steps", flow_id, definition.len());
        Self { flow_id,
               definition,
               selections: initial.clone(),
               initial,
               current: FIRST_STEP_INDEX,
               event_store }
    }

    pub fn flow_id(&self) -> Uuid {
        self.flow_id
    }

    pub fn definition(&self) -> &FlowDefinition<S> {
        &self.definition
    }

    /// Registro ordenado de steps `{id, label}`.
    pub fn steps(&self) -> Vec<StepView> {
        self.definition.views()
    }

    pub fn step_count(&self) -> usize {
        self.definition.len()
    }

    /// Cursor 1-based.
    pub fn current_step_index(&self) -> usize {
        self.current
    }

    pub fn current_step(&self) -> StepId {
        self.current_def().id()
    }

    pub fn is_terminal(&self) -> bool {
        self.current == self.definition.len()
    }

    pub fn selections(&self) -> &S {
        &self.selections
    }

    /// Valores derivados, recalculados en cada lectura.
    pub fn derived(&self) -> S::Derived {
        self.selections.derived()
    }

    /// Validez de un step con las selecciones actuales. Un id desconocido es inválido.
    pub fn validate_step(&self, step: StepId) -> bool {
        self.definition.step(step).is_some_and(|s| s.is_valid(&self.selections))
    }

    /// `true` si el paso actual permite la acción de avance.
    pub fn can_continue(&self) -> bool {
        self.current_def().is_valid(&self.selections)
    }

    pub fn event_store(&self) -> &E {
        &self.event_store
    }

    fn current_def(&self) -> &dyn StepDefinition<S> {
        // `current` siempre está en [1, N] y N >= 1 (garantizado por build_flow_definition).
        self.definition.steps[self.current - 1].as_ref()
    }

    fn emit(&mut self, kind: FlowEventKind) {
        self.event_store.append_kind(self.flow_id, kind);
    }

    /// Escribe un campo de selección (con resets en cascada). Devuelve `true`
    /// si alguna selección cambió; una escritura sin efecto no se registra.
    pub fn set_field(&mut self, field: S::Field) -> bool {
        let name = field.name();
        let changed = self.selections.set_field(field);
        if changed {
            let step = self.current_step();
            self.emit(FlowEventKind::FieldSet { step,
                                                field: name.to_string() });
        }
        changed
    }

    /// Avanza un paso si el actual es válido. En el último paso el cursor no cambia.
    pub fn advance(&mut self) -> Transition<S> {
        let from = self.current_step();
        if !self.can_continue() {
            debug!("flow {} blocked at step {}", self.flow_id, from);
            self.emit(FlowEventKind::TransitionBlocked { step: from });
            return Transition::Blocked { step: from };
        }
        if self.is_terminal() {
            return Transition::Unchanged { step: from };
        }
        self.current += 1;
        let to = self.current_step();
        self.emit(FlowEventKind::StepAdvanced { from, to });
        Transition::Advanced { from, to }
    }

    /// Retrocede un paso sin validar. En el primer paso no hace nada.
    pub fn retreat(&mut self) -> Transition<S> {
        let from = self.current_step();
        if self.current == FIRST_STEP_INDEX {
            return Transition::Unchanged { step: from };
        }
        self.current -= 1;
        let to = self.current_step();
        self.emit(FlowEventKind::StepRetreated { from, to });
        Transition::Retreated { from, to }
    }

    /// En el paso terminal confirma las selecciones y reinicia el flujo
    /// completo; en cualquier otro paso equivale a `advance()`.
    pub fn primary_action(&mut self) -> Transition<S> {
        if !self.is_terminal() {
            return self.advance();
        }
        let step = self.current_step();
        if !self.can_continue() {
            self.emit(FlowEventKind::TransitionBlocked { step });
            return Transition::Blocked { step };
        }
        let fingerprint = self.selections_fingerprint();
        self.emit(FlowEventKind::FlowCommitted { step,
                                                 fingerprint: fingerprint.clone() });
        info!("flow {} committed (fingerprint {})", self.flow_id, fingerprint);
        let selections = self.reset(ResetReason::Committed);
        Transition::Committed { selections, fingerprint }
    }

    /// Escribe `field` y mueve el cursor a `target` en una única actualización.
    ///
    /// Se rechaza (sin cambios) si `target` no existe o si, con el campo ya
    /// escrito, algún paso anterior a `target` no es válido.
    pub fn jump_to(&mut self, target: StepId, field: S::Field) -> Transition<S> {
        let Some(target_pos) = self.definition.index_of(target) else {
            debug!("flow {} jump to unknown step {}", self.flow_id, target);
            return self.reject_jump(target, JumpRejection::UnknownStep);
        };
        let name = field.name();
        let mut candidate = self.selections.clone();
        candidate.set_field(field);
        let invalid = self.definition.steps[..target_pos - 1].iter()
                                                             .find(|s| !s.is_valid(&candidate))
                                                             .map(|s| s.id());
        if let Some(step) = invalid {
            return self.reject_jump(target, JumpRejection::InvalidSelection { step });
        }
        let from = self.current_step();
        self.selections = candidate;
        self.current = target_pos;
        self.emit(FlowEventKind::StepJumped { from,
                                              to: target,
                                              field: name.to_string() });
        Transition::Jumped { from, to: target }
    }

    fn reject_jump(&mut self, target: StepId, reason: JumpRejection) -> Transition<S> {
        self.emit(FlowEventKind::JumpRejected { target, reason });
        Transition::Rejected { target, reason }
    }

    /// Abandono explícito: vuelve a los valores iniciales.
    pub fn abandon(&mut self) -> Transition<S> {
        self.reset(ResetReason::Abandoned);
        Transition::Reset { reason: ResetReason::Abandoned }
    }

    fn reset(&mut self, reason: ResetReason) -> S {
        self.current = FIRST_STEP_INDEX;
        self.emit(FlowEventKind::FlowReset { reason });
        std::mem::replace(&mut self.selections, self.initial.clone())
    }

    fn selections_fingerprint(&self) -> String {
        let selections = serde_json::to_value(&self.selections).unwrap_or_else(|e| {
                                                                   warn!("flow {}: selections not serializable: {e}", self.flow_id);
                                                                   Value::Null
                                                               });
        hash_value(&json!({
            "engine_version": crate::constants::ENGINE_VERSION,
            "definition_hash": self.definition.definition_hash,
            "selections": selections,
        }))
    }

    /// Eventos del flujo en orden.
    pub fn events(&self) -> Vec<FlowEvent> {
        self.event_store.list(self.flow_id)
    }

    /// Cantidad de eventos sin copiar el log.
    pub fn event_count(&self) -> usize {
        self.event_store.count(self.flow_id)
    }

    /// Variante compacta de eventos (útil en tests y logs).
    pub fn event_variants(&self) -> Vec<&'static str> {
        self.events()
            .iter()
            .map(|e| match e.kind {
                FlowEventKind::FlowInitialized { .. } => "I",
                FlowEventKind::FieldSet { .. } => "F",
                FlowEventKind::StepAdvanced { .. } => "A",
                FlowEventKind::StepRetreated { .. } => "R",
                FlowEventKind::StepJumped { .. } => "J",
                FlowEventKind::TransitionBlocked { .. } => "B",
                FlowEventKind::JumpRejected { .. } => "X",
                FlowEventKind::FlowCommitted { .. } => "C",
                FlowEventKind::FlowReset { .. } => "Z",
            })
            .collect()
    }
}
