//! Simulador de llamadas: sub-máquina de fases con timers por token.
//!
//! Cada entrada en una fase emite un token nuevo y cancela el timer
//! pendiente de la fase anterior. Un disparo con token obsoleto, o cuyo tipo
//! no corresponde a la fase actual, se descarta sin efecto.

use std::time::Duration;

use flow_core::{ManualScheduler, PhaseToken, Scheduler, TimerFired, TimerRequest, TokenGate};
use flow_domain::{Contact, RecentCall};
use log::{debug, info};

use super::{eligibility, CallCommand, CallPhase, CallTimings, TimerKind};
use crate::navigation::{Destination, NavTab};
use crate::presentation::CallSnapshot;

/// Fases recientes que se conservan en el historial.
pub const PHASE_HISTORY_LIMIT: usize = 64;

#[derive(Debug)]
pub struct CallSimulator<Sch: Scheduler<TimerKind>> {
    scheduler: Sch,
    timings: CallTimings,
    gate: TokenGate,
    armed: Option<PhaseToken>,
    phase: CallPhase,
    contact: Option<Contact>,
    duration_seconds: u64,
    active_tab: NavTab,
    history: Vec<CallPhase>,
}

impl<Sch: Scheduler<TimerKind>> CallSimulator<Sch> {
    pub fn new(scheduler: Sch, timings: CallTimings) -> Self {
        Self { scheduler,
               timings,
               gate: TokenGate::new(),
               armed: None,
               phase: CallPhase::Idle,
               contact: None,
               duration_seconds: 0,
               active_tab: NavTab::Home,
               history: Vec::new() }
    }

    pub fn phase(&self) -> CallPhase {
        self.phase
    }

    pub fn contact(&self) -> Option<&Contact> {
        self.contact.as_ref()
    }

    pub fn duration_seconds(&self) -> u64 {
        self.duration_seconds
    }

    pub fn active_tab(&self) -> NavTab {
        self.active_tab
    }

    pub fn timings(&self) -> &CallTimings {
        &self.timings
    }

    /// Últimas fases en las que se entró (como mucho `PHASE_HISTORY_LIMIT`), en orden.
    pub fn phase_history(&self) -> &[CallPhase] {
        &self.history
    }

    pub fn current_token(&self) -> PhaseToken {
        self.gate.current()
    }

    pub fn scheduler(&self) -> &Sch {
        &self.scheduler
    }

    pub fn snapshot(&self) -> CallSnapshot {
        CallSnapshot::new(self.phase, self.contact.clone(), self.duration_seconds, self.active_tab)
    }

    /// "Llamar de nuevo" desde recientes. Si hay otra llamada en curso, se
    /// abandona primero su fase (y su timer).
    pub fn start(&mut self, call: &RecentCall) -> CallPhase {
        if self.phase != CallPhase::Idle {
            debug!("start while {:?}: leaving current phase", self.phase);
        }
        self.contact = Some(call.contact.clone());
        let next = eligibility(call.minutes_left, self.timings.low_minutes_threshold);
        info!("call to {} ({} min left) -> {:?}", call.contact.name, call.minutes_left, next);
        self.enter(next);
        next
    }

    /// Saldo bajo: llamar igualmente.
    pub fn call_anyway(&mut self) -> bool {
        if self.phase != CallPhase::LowOnMinutes {
            return false;
        }
        self.enter(CallPhase::Connecting);
        true
    }

    /// Desde una hoja de saldo: ir a recargar.
    pub fn add_minutes(&mut self) -> Option<Destination> {
        if !self.phase.is_interstitial() {
            return None;
        }
        self.contact = None;
        self.active_tab = NavTab::Services;
        self.enter(CallPhase::Idle);
        Some(Destination::Services)
    }

    pub fn end_call(&mut self) -> bool {
        if !self.phase.is_live() {
            return false;
        }
        self.enter(CallPhase::Ended);
        true
    }

    pub fn return_home(&mut self) -> Option<Destination> {
        if self.phase != CallPhase::Ended {
            return None;
        }
        self.contact = None;
        self.duration_seconds = 0;
        self.active_tab = NavTab::Home;
        self.enter(CallPhase::Idle);
        Some(Destination::Home)
    }

    /// Cierra cualquier hoja o llamada y vuelve a inicio.
    pub fn dismiss(&mut self) -> Destination {
        self.contact = None;
        self.active_tab = NavTab::Home;
        if self.phase != CallPhase::Idle {
            self.enter(CallPhase::Idle);
        }
        Destination::Home
    }

    /// Cambio de pestaña: cancela cualquier fase de llamada.
    pub fn switch_tab(&mut self, tab: NavTab) -> Destination {
        self.active_tab = tab;
        if self.phase != CallPhase::Idle {
            self.contact = None;
            self.enter(CallPhase::Idle);
        }
        Destination::from(tab)
    }

    pub fn apply(&mut self, command: CallCommand) -> Option<Destination> {
        match command {
            CallCommand::Start(call) => {
                self.start(&call);
                None
            }
            CallCommand::CallAnyway => {
                self.call_anyway();
                None
            }
            CallCommand::AddMinutes => self.add_minutes(),
            CallCommand::EndCall => {
                self.end_call();
                None
            }
            CallCommand::ReturnHome => self.return_home(),
            CallCommand::Dismiss => Some(self.dismiss()),
            CallCommand::SwitchTab(tab) => Some(self.switch_tab(tab)),
        }
    }

    /// Aplica un disparo de timer. Devuelve `false` si se descartó.
    pub fn on_timer(&mut self, fired: TimerFired<TimerKind>) -> bool {
        if !self.gate.is_current(fired.token) || self.phase.timer() != Some(fired.kind) {
            debug!("stale timer {:?} {} ignored in {:?}", fired.kind, fired.token, self.phase);
            return false;
        }
        match fired.kind {
            TimerKind::Connect => self.enter(CallPhase::Ringing),
            TimerKind::Ring => self.enter(CallPhase::InCall),
            TimerKind::Tick => self.duration_seconds += 1,
        }
        true
    }

    fn enter(&mut self, phase: CallPhase) {
        if let Some(token) = self.armed.take() {
            self.scheduler.cancel(token);
        }
        let token = self.gate.issue();
        self.phase = phase;
        self.history.push(phase);
        if self.history.len() > PHASE_HISTORY_LIMIT {
            let excess = self.history.len() - PHASE_HISTORY_LIMIT;
            self.history.drain(..excess);
        }
        if phase == CallPhase::Connecting {
            self.duration_seconds = 0;
        }
        let request = match phase {
            CallPhase::Connecting => Some(TimerRequest::once(token, TimerKind::Connect, self.timings.connect_delay)),
            CallPhase::Ringing => Some(TimerRequest::once(token, TimerKind::Ring, self.timings.ring_delay)),
            CallPhase::InCall => Some(TimerRequest::every(token, TimerKind::Tick, self.timings.tick)),
            _ => None,
        };
        if let Some(request) = request {
            self.scheduler.schedule(request);
            self.armed = Some(token);
        }
    }
}

impl CallSimulator<ManualScheduler<TimerKind>> {
    /// Simulador con reloj virtual.
    pub fn manual(timings: CallTimings) -> Self {
        Self::new(ManualScheduler::new(), timings)
    }

    /// Avanza el reloj virtual aplicando cada disparo antes de considerar el
    /// siguiente. Devuelve cuántos disparos se aplicaron.
    pub fn advance(&mut self, by: Duration) -> usize {
        let target = self.scheduler.now() + by;
        let mut applied = 0;
        while let Some(fired) = self.scheduler.fire_next(target) {
            if self.on_timer(fired) {
                applied += 1;
            }
        }
        self.scheduler.settle_at(target);
        applied
    }

    pub fn now(&self) -> Duration {
        self.scheduler.now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flow_domain::RECENT_CALLS;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn connect_ring_and_tick() {
        let mut sim = CallSimulator::manual(CallTimings::default());
        assert_eq!(sim.start(&RECENT_CALLS[0]), CallPhase::Connecting);
        sim.advance(ms(1999));
        assert_eq!(sim.phase(), CallPhase::Connecting);
        sim.advance(ms(1));
        assert_eq!(sim.phase(), CallPhase::Ringing);
        sim.advance(ms(2500));
        assert_eq!(sim.phase(), CallPhase::InCall);
        sim.advance(ms(3500));
        assert_eq!(sim.duration_seconds(), 3);
        assert_eq!(sim.snapshot().status_label.as_deref(), Some("00:03"));
    }

    #[test]
    fn stale_token_is_ignored() {
        let mut sim = CallSimulator::manual(CallTimings::default());
        sim.start(&RECENT_CALLS[0]);
        let stale = sim.current_token();
        sim.end_call();
        assert!(!sim.on_timer(TimerFired { token: stale,
                                           kind: TimerKind::Connect }));
        assert_eq!(sim.phase(), CallPhase::Ended);
        assert_eq!(sim.scheduler().pending(), 0);
    }

    #[test]
    fn wrong_kind_for_phase_is_ignored() {
        let mut sim = CallSimulator::manual(CallTimings::default());
        sim.start(&RECENT_CALLS[0]);
        let token = sim.current_token();
        assert!(!sim.on_timer(TimerFired { token,
                                           kind: TimerKind::Tick }));
        assert_eq!(sim.duration_seconds(), 0);
    }

    #[test]
    fn ending_keeps_duration_until_home() {
        let mut sim = CallSimulator::manual(CallTimings::default());
        sim.start(&RECENT_CALLS[0]);
        sim.advance(ms(4500 + 2000));
        assert!(sim.end_call());
        assert_eq!(sim.duration_seconds(), 2);
        sim.advance(ms(5000));
        assert_eq!(sim.duration_seconds(), 2);
        assert_eq!(sim.return_home(), Some(Destination::Home));
        assert_eq!(sim.duration_seconds(), 0);
        assert!(sim.contact().is_none());
    }

    #[test]
    fn tab_switch_cancels_call() {
        let mut sim = CallSimulator::manual(CallTimings::default());
        sim.start(&RECENT_CALLS[0]);
        assert_eq!(sim.switch_tab(NavTab::Account), Destination::Account);
        assert_eq!(sim.phase(), CallPhase::Idle);
        sim.advance(ms(10_000));
        assert_eq!(sim.phase(), CallPhase::Idle);
        assert_eq!(sim.snapshot().render_target(), crate::presentation::RenderTarget::AccountTab);
    }
}
