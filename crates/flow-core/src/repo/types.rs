//! Tipos de repositorio: definición inmutable (FlowDefinition) y estado
//! reconstruido por replay (FlowInstance).
//!
//! El engine mantiene el cursor en memoria; el repositorio permite
//! reconstruirlo a partir del log de eventos (diagnóstico y verificación de
//! que el log refleja fielmente cada transición aplicada).
use std::collections::HashSet;

use serde_json::json;
use uuid::Uuid;

use crate::errors::CoreEngineError;
use crate::event::{FlowEvent, FlowEventKind};
use crate::hashing::hash_value;
use crate::step::{StepDefinition, StepId, StepKind, StepView};

/// Definición inmutable del Flow: lista ordenada de steps.
pub struct FlowDefinition<S> {
    pub steps: Vec<Box<dyn StepDefinition<S>>>,
    pub definition_hash: String,
}

impl<S> FlowDefinition<S> {
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Posición 1-based del step con `id`, si existe.
    pub fn index_of(&self, id: StepId) -> Option<usize> {
        self.steps.iter().position(|s| s.id() == id).map(|i| i + 1)
    }

    /// Step en la posición 1-based `index`.
    pub fn step_at(&self, index: usize) -> Option<&dyn StepDefinition<S>> {
        index.checked_sub(1).and_then(|i| self.steps.get(i)).map(|b| b.as_ref())
    }

    pub fn step(&self, id: StepId) -> Option<&dyn StepDefinition<S>> {
        self.steps.iter().find(|s| s.id() == id).map(|b| b.as_ref())
    }

    /// Registro ordenado `{id, label}`.
    pub fn views(&self) -> Vec<StepView> {
        self.steps
            .iter()
            .map(|s| StepView { id: s.id(),
                                label: s.label().to_string() })
            .collect()
    }
}

impl<S> std::fmt::Debug for FlowDefinition<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FlowDefinition")
         .field("steps", &self.steps)
         .field("definition_hash", &self.definition_hash)
         .finish()
    }
}

/// Construye una definición validando que no esté vacía y que los ids sean
/// únicos. El hash se calcula sobre `(id, label, kind)` en orden.
pub fn build_flow_definition<S>(steps: Vec<Box<dyn StepDefinition<S>>>) -> Result<FlowDefinition<S>, CoreEngineError> {
    if steps.is_empty() {
        return Err(CoreEngineError::EmptyDefinition);
    }
    let mut seen = HashSet::new();
    for s in &steps {
        if !seen.insert(s.id()) {
            return Err(CoreEngineError::DuplicateStepId(s.id()));
        }
    }
    let shape: Vec<_> = steps.iter()
                             .map(|s| {
                                 json!({
                                     "id": s.id(),
                                     "label": s.label(),
                                     "terminal": matches!(s.kind(), StepKind::Review),
                                 })
                             })
                             .collect();
    let definition_hash = hash_value(&json!(shape));
    Ok(FlowDefinition { steps, definition_hash })
}

/// Estado de un flujo reconstruido desde sus eventos.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowInstance {
    pub id: Uuid,
    /// Cursor 1-based.
    pub cursor: usize,
    pub commits: usize,
    pub resets: usize,
    pub blocked_attempts: usize,
    pub last_fingerprint: Option<String>,
}

/// Trait para reconstruir (`replay`) el estado de un flow a partir de eventos.
pub trait FlowRepository {
    fn load<S>(&self, flow_id: Uuid, events: &[FlowEvent], definition: &FlowDefinition<S>) -> FlowInstance;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct InMemoryFlowRepository;

impl InMemoryFlowRepository {
    pub fn new() -> Self {
        Self
    }
}

impl FlowRepository for InMemoryFlowRepository {
    fn load<S>(&self, flow_id: Uuid, events: &[FlowEvent], definition: &FlowDefinition<S>) -> FlowInstance {
        let mut instance = FlowInstance { id: flow_id,
                                          cursor: 1,
                                          commits: 0,
                                          resets: 0,
                                          blocked_attempts: 0,
                                          last_fingerprint: None };
        let position = |id: &StepId| definition.index_of(*id);
        for ev in events {
            match &ev.kind {
                FlowEventKind::FlowInitialized { .. } => instance.cursor = 1,
                FlowEventKind::StepAdvanced { to, .. }
                | FlowEventKind::StepRetreated { to, .. }
                | FlowEventKind::StepJumped { to, .. } => {
                    if let Some(p) = position(to) {
                        instance.cursor = p;
                    }
                }
                FlowEventKind::TransitionBlocked { .. } => instance.blocked_attempts += 1,
                FlowEventKind::FlowCommitted { fingerprint, .. } => {
                    instance.commits += 1;
                    instance.last_fingerprint = Some(fingerprint.clone());
                }
                FlowEventKind::FlowReset { .. } => {
                    instance.resets += 1;
                    instance.cursor = 1;
                }
                FlowEventKind::FieldSet { .. } | FlowEventKind::JumpRejected { .. } => {}
            }
        }
        instance
    }
}
