use serde::{Deserialize, Serialize};

/// Posición de un Step respecto al cursor del flujo.
///
/// Se deriva siempre de `current_step_index`; nunca se almacena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    /// El paso quedó atrás.
    Done,
    /// El paso es el actual.
    Current,
    /// El paso aún no se alcanzó.
    Upcoming,
}

impl StepStatus {
    /// Calcula el estado de `position` (1-based) dado el cursor actual.
    pub fn at(position: usize, current: usize) -> Self {
        match position.cmp(&current) {
            std::cmp::Ordering::Less => StepStatus::Done,
            std::cmp::Ordering::Equal => StepStatus::Current,
            std::cmp::Ordering::Greater => StepStatus::Upcoming,
        }
    }
}
