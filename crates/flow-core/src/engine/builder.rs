//! Builder para `FlowEngine`.
//!
//! Obliga a declarar el primer paso antes de poder encadenar el resto, de
//! modo que una definición construida con el builder nunca está vacía.
//!
//! ```ignore
//! let engine = FlowEngine::new(BillSelections::initial(catalog))
//!     .first_step(PredicateStep::input(1, "Recipient", BillSelections::has_recipient))
//!     .add_step(PredicateStep::review(2, "Review"))
//!     .build()?;
//! ```

use crate::engine::FlowEngine;
use crate::errors::CoreEngineError;
use crate::event::EventStore;
use crate::repo::build_flow_definition;
use crate::selection::SelectionStore;
use crate::step::StepDefinition;

/// Estado inicial del builder: selecciones iniciales + store de eventos.
#[derive(Debug)]
pub struct EngineBuilderInit<S: SelectionStore, E: EventStore> {
    pub initial: S,
    pub event_store: E,
}

impl<S: SelectionStore, E: EventStore> EngineBuilderInit<S, E> {
    /// Define el primer paso del flujo y transiciona al builder completo.
    #[inline]
    pub fn first_step<D>(self, step: D) -> EngineBuilder<S, E>
        where D: StepDefinition<S> + 'static
    {
        EngineBuilder { initial: self.initial,
                        event_store: self.event_store,
                        steps: vec![Box::new(step)] }
    }
}

/// Builder principal que acumula pasos en orden.
pub struct EngineBuilder<S: SelectionStore, E: EventStore> {
    initial: S,
    event_store: E,
    steps: Vec<Box<dyn StepDefinition<S>>>,
}

impl<S: SelectionStore, E: EventStore> EngineBuilder<S, E> {
    #[inline]
    pub fn add_step<D>(mut self, next: D) -> Self
        where D: StepDefinition<S> + 'static
    {
        self.steps.push(Box::new(next));
        self
    }

    /// Construye el `FlowEngine`. Falla si hay ids de step duplicados.
    pub fn build(self) -> Result<FlowEngine<S, E>, CoreEngineError> {
        let definition = build_flow_definition(self.steps)?;
        Ok(FlowEngine::with_definition(definition, self.initial, self.event_store))
    }
}
