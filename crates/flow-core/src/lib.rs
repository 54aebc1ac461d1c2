//! flow-core: motor de flujos lineales de pasos.
//!
//! Registro de steps, controlador de transiciones con guards, log de eventos
//! append-only y temporizadores con token para sub-máquinas de fases.
pub mod constants;
pub mod engine;
pub mod errors;
pub mod event;
pub mod hashing;
pub mod repo;
pub mod selection;
pub mod step;
pub mod timer;

pub use engine::{EngineBuilder, EngineBuilderInit, FlowEngine, JumpRejection, ResetReason, Transition};
pub use errors::CoreEngineError;
pub use event::{EventStore, FlowEvent, FlowEventKind, InMemoryEventStore};
pub use repo::{build_flow_definition, FlowDefinition, FlowInstance, FlowRepository, InMemoryFlowRepository};
pub use selection::{SelectionField, SelectionStore};
pub use step::{PredicateStep, StepDefinition, StepId, StepKind, StepStatus, StepView};
pub use timer::{ManualScheduler, PhaseToken, Scheduler, TimerFired, TimerRequest, TokenGate};
