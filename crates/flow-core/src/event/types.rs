//! Tipos de evento del flujo y estructura `FlowEvent`.
//!
//! Rol en el flujo:
//! - Cada operación del `FlowEngine` (incluidas las bloqueadas por un guard)
//!   emite eventos a un `EventStore` append-only.
//! - Estos eventos permiten reconstruir el cursor del flujo (`FlowRepository`)
//!   y diagnosticar por qué un avance no ocurrió.
//! - El enum `FlowEventKind` define el contrato observable del motor.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::engine::{JumpRejection, ResetReason};
use crate::step::StepId;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FlowEventKind {
    /// Emisión inicial: fija la `definition_hash` y la cantidad de steps.
    /// Invariante: debe ser el primer evento de un `flow_id`.
    FlowInitialized { definition_hash: String, step_count: usize },
    /// Se escribió un campo de selección estando en `step`.
    FieldSet { step: StepId, field: String },
    StepAdvanced { from: StepId, to: StepId },
    StepRetreated { from: StepId, to: StepId },
    /// Escritura + avance atómicos.
    StepJumped { from: StepId, to: StepId, field: String },
    /// El guard del paso actual impidió avanzar. No es un error.
    TransitionBlocked { step: StepId },
    JumpRejected { target: StepId, reason: JumpRejection },
    /// Acción primaria en el paso terminal, con fingerprint de las selecciones confirmadas.
    FlowCommitted { step: StepId, fingerprint: String },
    FlowReset { reason: ResetReason },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowEvent {
    pub seq: u64, // asignado por el EventStore (orden append)
    pub flow_id: Uuid,
    pub kind: FlowEventKind,
    pub ts: DateTime<Utc>, // metadato (no entra en fingerprint)
}
