//! Temporizadores con token para sub-máquinas de fases.
//!
//! El `Scheduler` sólo entrega disparos; decidir si un disparo sigue siendo
//! relevante (token vigente, fase esperada) es responsabilidad del consumidor.

mod manual;
mod token;

use std::time::Duration;

pub use manual::ManualScheduler;
pub use token::{PhaseToken, TokenGate};

/// Petición de timer ligada a un token de fase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerRequest<K> {
    pub token: PhaseToken,
    pub kind: K,
    pub delay: Duration,
    /// Si es `true` el timer se rearma cada `delay` hasta cancelarlo.
    pub repeat: bool,
}

impl<K> TimerRequest<K> {
    pub fn once(token: PhaseToken, kind: K, delay: Duration) -> Self {
        Self { token,
               kind,
               delay,
               repeat: false }
    }

    pub fn every(token: PhaseToken, kind: K, period: Duration) -> Self {
        Self { token,
               kind,
               delay: period,
               repeat: true }
    }
}

/// Disparo entregado al consumidor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerFired<K> {
    pub token: PhaseToken,
    pub kind: K,
}

pub trait Scheduler<K> {
    /// Arma un timer. Un token tiene como mucho un timer armado: uno nuevo
    /// con el mismo token reemplaza al anterior.
    fn schedule(&mut self, request: TimerRequest<K>);

    /// Desarma el timer asociado a `token` (no-op si no existe).
    fn cancel(&mut self, token: PhaseToken);

    /// Número de timers armados.
    fn pending(&self) -> usize;
}
