use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Retardos de la sub-máquina de llamadas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallTimings {
    pub connect_delay: Duration,
    pub ring_delay: Duration,
    pub tick: Duration,
    /// Hasta estos minutos (inclusive) se muestra la hoja de saldo bajo.
    pub low_minutes_threshold: u32,
}

impl Default for CallTimings {
    fn default() -> Self {
        Self { connect_delay: Duration::from_millis(2000),
               ring_delay: Duration::from_millis(2500),
               tick: Duration::from_millis(1000),
               low_minutes_threshold: 3 }
    }
}
