//! Resultado de cada operación del controlador de transiciones.
//!
//! Todas las operaciones son totales: en lugar de errores devuelven una
//! variante que describe qué pasó (o por qué no pasó nada).

use serde::{Deserialize, Serialize};

use crate::step::StepId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JumpRejection {
    /// El id de destino no pertenece a la definición.
    UnknownStep,
    /// Tras escribir el campo, `step` (anterior al destino) quedaría inválido.
    InvalidSelection { step: StepId },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResetReason {
    Committed,
    Abandoned,
}

#[derive(Debug, Clone)]
pub enum Transition<S> {
    Advanced { from: StepId, to: StepId },
    Retreated { from: StepId, to: StepId },
    Jumped { from: StepId, to: StepId },
    /// Operación válida pero sin efecto (límites del cursor).
    Unchanged { step: StepId },
    /// El guard del paso actual impidió avanzar.
    Blocked { step: StepId },
    Rejected { target: StepId, reason: JumpRejection },
    /// Commit en el paso terminal; `selections` es lo confirmado antes del reset.
    Committed { selections: S, fingerprint: String },
    Reset { reason: ResetReason },
}

impl<S> Transition<S> {
    /// `true` si el cursor se movió o el flujo se reinició.
    pub fn moved(&self) -> bool {
        matches!(self,
                 Transition::Advanced { .. }
                 | Transition::Retreated { .. }
                 | Transition::Jumped { .. }
                 | Transition::Committed { .. }
                 | Transition::Reset { .. })
    }

    pub fn is_blocked(&self) -> bool {
        matches!(self, Transition::Blocked { .. } | Transition::Rejected { .. })
    }
}
