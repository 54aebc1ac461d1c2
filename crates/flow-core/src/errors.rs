//! Errores específicos del core.
//!
//! Las operaciones de transición nunca fallan (devuelven `Transition`); estos
//! errores sólo aparecen al construir definiciones de flujo inválidas.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::step::StepId;

#[derive(Debug, Error, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub enum CoreEngineError {
    #[error("flow definition must contain at least one step")] EmptyDefinition,
    #[error("duplicate step id {0}")] DuplicateStepId(StepId),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_step_id() {
        assert_eq!(CoreEngineError::DuplicateStepId(StepId(3)).to_string(), "duplicate step id 3");
        assert_eq!(CoreEngineError::EmptyDefinition.to_string(), "flow definition must contain at least one step");
    }
}
