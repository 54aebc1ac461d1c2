//! Fases de la sub-máquina de llamadas.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CallPhase {
    Idle,
    OutOfMinutes,
    LowOnMinutes,
    Connecting,
    Ringing,
    InCall,
    Ended,
}

/// Timer que cada fase temporizada arma al entrar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerKind {
    /// `Connecting → Ringing`.
    Connect,
    /// `Ringing → InCall`.
    Ring,
    /// Segundo de llamada en `InCall` (repetitivo).
    Tick,
}

impl CallPhase {
    pub fn timer(self) -> Option<TimerKind> {
        match self {
            CallPhase::Connecting => Some(TimerKind::Connect),
            CallPhase::Ringing => Some(TimerKind::Ring),
            CallPhase::InCall => Some(TimerKind::Tick),
            _ => None,
        }
    }

    /// Fases que muestran la pantalla de llamada y admiten `end_call`.
    pub fn is_live(self) -> bool {
        matches!(self, CallPhase::Connecting | CallPhase::Ringing | CallPhase::InCall)
    }

    /// Hojas de saldo insuficiente.
    pub fn is_interstitial(self) -> bool {
        matches!(self, CallPhase::OutOfMinutes | CallPhase::LowOnMinutes)
    }
}

/// Enrutado por minutos restantes: `0` sin saldo, `1..=threshold` saldo
/// bajo, resto conecta directamente.
pub fn eligibility(minutes_left: u32, low_threshold: u32) -> CallPhase {
    match minutes_left {
        0 => CallPhase::OutOfMinutes,
        m if m <= low_threshold => CallPhase::LowOnMinutes,
        _ => CallPhase::Connecting,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eligibility_bands() {
        assert_eq!(eligibility(0, 3), CallPhase::OutOfMinutes);
        assert_eq!(eligibility(1, 3), CallPhase::LowOnMinutes);
        assert_eq!(eligibility(3, 3), CallPhase::LowOnMinutes);
        assert_eq!(eligibility(4, 3), CallPhase::Connecting);
        assert_eq!(eligibility(340, 3), CallPhase::Connecting);
    }
}
