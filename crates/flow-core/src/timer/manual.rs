//! Scheduler de reloj virtual para tests y simulaciones deterministas.

use std::time::Duration;

use log::trace;

use super::{PhaseToken, Scheduler, TimerFired, TimerRequest};

#[derive(Debug, Clone)]
struct Armed<K> {
    deadline: Duration,
    seq: u64,
    request: TimerRequest<K>,
}

/// Scheduler manual: el tiempo sólo avanza cuando se pide.
///
/// Los disparos se entregan de uno en uno con `fire_next`, de modo que el
/// consumidor puede armar nuevos timers (la siguiente fase) antes de que se
/// evalúen los siguientes dentro de la misma ventana.
#[derive(Debug, Clone)]
pub struct ManualScheduler<K> {
    now: Duration,
    seq: u64,
    armed: Vec<Armed<K>>,
}

impl<K> Default for ManualScheduler<K> {
    fn default() -> Self {
        Self { now: Duration::ZERO,
               seq: 0,
               armed: Vec::new() }
    }
}

impl<K: Clone> ManualScheduler<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tiempo virtual transcurrido desde la creación.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Deadline del próximo timer armado, si lo hay.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.armed.iter().map(|a| a.deadline).min()
    }

    /// Dispara el timer más temprano cuyo deadline no supere `until`,
    /// moviendo el reloj hasta ese deadline. Los timers con el mismo deadline
    /// se disparan en orden de armado.
    pub fn fire_next(&mut self, until: Duration) -> Option<TimerFired<K>> {
        let idx = self.armed
                      .iter()
                      .enumerate()
                      .filter(|(_, a)| a.deadline <= until)
                      .min_by_key(|(_, a)| (a.deadline, a.seq))
                      .map(|(i, _)| i)?;
        let deadline = self.armed[idx].deadline;
        self.now = self.now.max(deadline);
        let fired = TimerFired { token: self.armed[idx].request.token,
                                 kind: self.armed[idx].request.kind.clone() };
        let request = &self.armed[idx].request;
        if request.repeat && !request.delay.is_zero() {
            let next = deadline + request.delay;
            self.seq += 1;
            let seq = self.seq;
            let slot = &mut self.armed[idx];
            slot.deadline = next;
            slot.seq = seq;
        } else {
            self.armed.remove(idx);
        }
        trace!("manual scheduler fired {} at {:?}", fired.token, self.now);
        Some(fired)
    }

    /// Mueve el reloj hasta `target` y devuelve todos los disparos en orden.
    /// Los timers armados por el consumidor durante este intervalo no se
    /// consideran; para eso hay que iterar `fire_next`.
    pub fn advance_to(&mut self, target: Duration) -> Vec<TimerFired<K>> {
        let mut fired = Vec::new();
        while let Some(f) = self.fire_next(target) {
            fired.push(f);
        }
        self.now = self.now.max(target);
        fired
    }

    pub fn advance(&mut self, by: Duration) -> Vec<TimerFired<K>> {
        self.advance_to(self.now + by)
    }

    /// Fija el reloj en `target` sin disparar nada (usado tras un bucle de `fire_next`).
    pub fn settle_at(&mut self, target: Duration) {
        self.now = self.now.max(target);
    }
}

impl<K> Scheduler<K> for ManualScheduler<K> {
    fn schedule(&mut self, request: TimerRequest<K>) {
        self.armed.retain(|a| a.request.token != request.token);
        self.seq += 1;
        self.armed.push(Armed { deadline: self.now + request.delay,
                                seq: self.seq,
                                request });
    }

    fn cancel(&mut self, token: PhaseToken) {
        self.armed.retain(|a| a.request.token != token);
    }

    fn pending(&self) -> usize {
        self.armed.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn fires_in_deadline_order_and_moves_clock() {
        let mut s = ManualScheduler::new();
        s.schedule(TimerRequest::once(PhaseToken(1), "slow", ms(300)));
        s.schedule(TimerRequest::once(PhaseToken(2), "fast", ms(100)));
        let fired = s.advance(ms(250));
        assert_eq!(fired, vec![TimerFired { token: PhaseToken(2), kind: "fast" }]);
        assert_eq!(s.now(), ms(250));
        assert_eq!(s.pending(), 1);
        assert_eq!(s.advance(ms(50)).len(), 1);
        assert_eq!(s.pending(), 0);
    }

    #[test]
    fn repeating_timer_rearms_until_cancelled() {
        let mut s = ManualScheduler::new();
        s.schedule(TimerRequest::every(PhaseToken(7), (), ms(1000)));
        assert_eq!(s.advance(ms(3500)).len(), 3);
        s.cancel(PhaseToken(7));
        assert!(s.advance(ms(5000)).is_empty());
    }

    #[test]
    fn rescheduling_same_token_replaces_timer() {
        let mut s = ManualScheduler::new();
        s.schedule(TimerRequest::once(PhaseToken(1), 'a', ms(100)));
        s.schedule(TimerRequest::once(PhaseToken(1), 'b', ms(200)));
        assert_eq!(s.pending(), 1);
        let fired = s.advance(ms(200));
        assert_eq!(fired[0].kind, 'b');
    }

    #[test]
    fn fire_next_respects_limit() {
        let mut s = ManualScheduler::new();
        s.schedule(TimerRequest::once(PhaseToken(1), 1u8, ms(100)));
        assert!(s.fire_next(ms(99)).is_none());
        assert_eq!(s.now(), Duration::ZERO);
        assert!(s.fire_next(ms(100)).is_some());
        assert_eq!(s.now(), ms(100));
    }
}
