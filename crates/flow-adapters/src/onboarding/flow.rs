//! `OnboardingFlow`: Contact → Phone → Code → Done sobre un `SessionStore`.
//!
//! Enviar y verificar el código pasan por una espera simulada: mientras dura,
//! el botón principal no tiene efecto. La espera se arma con un token; volver
//! atrás o abandonar invalida el token y el disparo pendiente se descarta.

use std::time::Duration;

use flow_core::{build_flow_definition, FlowEngine, InMemoryEventStore, ManualScheduler, PhaseToken, ResetReason,
                Scheduler, TimerFired, TimerRequest, TokenGate, Transition};
use flow_domain::{Contact, Country};
use flow_session::{mark_phone_verified, save_selected_contact, SessionStore};
use log::{debug, info};

use super::steps::{onboarding_steps, CODE, CONTACT, DONE, PHONE};
use super::{LoadingKind, OnboardingDerived, OnboardingField, OnboardingSelections, OnboardingTimings};
use crate::error::AdapterError;
use crate::navigation::{Destination, OnboardingRoute};
use crate::presentation::FlowSnapshot;

pub type OnboardingSnapshot = FlowSnapshot<OnboardingSelections, OnboardingDerived>;

#[derive(Debug)]
pub struct OnboardingFlow<St: SessionStore, Sch: Scheduler<LoadingKind> = ManualScheduler<LoadingKind>> {
    engine: FlowEngine<OnboardingSelections>,
    store: St,
    scheduler: Sch,
    timings: OnboardingTimings,
    gate: TokenGate,
    loading: Option<(PhaseToken, LoadingKind)>,
}

impl<St: SessionStore> OnboardingFlow<St> {
    /// Flujo sin esperas simuladas.
    pub fn new(store: St) -> Result<Self, AdapterError> {
        Self::with_loading(store, ManualScheduler::new(), OnboardingTimings::instant())
    }
}

impl<St: SessionStore, Sch: Scheduler<LoadingKind>> OnboardingFlow<St, Sch> {
    pub fn with_loading(store: St, scheduler: Sch, timings: OnboardingTimings) -> Result<Self, AdapterError> {
        let definition = build_flow_definition(onboarding_steps())?;
        let engine = FlowEngine::with_definition(definition, OnboardingSelections::default(), InMemoryEventStore::default());
        Ok(Self { engine,
                  store,
                  scheduler,
                  timings,
                  gate: TokenGate::new(),
                  loading: None })
    }

    pub fn engine(&self) -> &FlowEngine<OnboardingSelections> {
        &self.engine
    }

    pub fn selections(&self) -> &OnboardingSelections {
        self.engine.selections()
    }

    pub fn store(&self) -> &St {
        &self.store
    }

    pub fn scheduler(&self) -> &Sch {
        &self.scheduler
    }

    pub fn into_store(self) -> St {
        self.store
    }

    /// Espera en curso, si la hay.
    pub fn loading(&self) -> Option<LoadingKind> {
        self.loading.map(|(_, kind)| kind)
    }

    pub fn is_loading(&self) -> bool {
        self.loading.is_some()
    }

    /// Pantalla que corresponde al paso actual.
    pub fn route(&self) -> Destination {
        let step = self.engine.current_step();
        let route = if step == CONTACT {
            OnboardingRoute::Contacts
        } else if step == PHONE || step == CODE {
            OnboardingRoute::Verify
        } else {
            OnboardingRoute::Home
        };
        Destination::Onboarding(route)
    }

    /// Tocar un contacto lo guarda en sesión y pasa directamente a Phone.
    pub fn select_contact(&mut self, contact: &Contact) -> Result<Transition<OnboardingSelections>, AdapterError> {
        save_selected_contact(&mut self.store, contact)?;
        Ok(self.engine.jump_to(PHONE, OnboardingField::Contact(Some(contact.clone()))))
    }

    pub fn start_manual_entry(&mut self) -> bool {
        self.engine.set_field(OnboardingField::Contact(None))
    }

    pub fn set_destination_country(&mut self, country: Country) -> bool {
        self.engine.set_field(OnboardingField::DestinationCountry(country))
    }

    pub fn set_manual_number(&mut self, number: impl Into<String>) -> bool {
        self.engine.set_field(OnboardingField::ManualNumber(number.into()))
    }

    pub fn set_verification_country(&mut self, country: Country) -> bool {
        self.engine.set_field(OnboardingField::VerificationCountry(country))
    }

    pub fn set_phone_number(&mut self, number: impl Into<String>) -> bool {
        self.engine.set_field(OnboardingField::PhoneNumber(number.into()))
    }

    /// Escribe el código; al completar los 6 dígitos en el paso Code se
    /// verifica automáticamente.
    pub fn set_otp(&mut self, code: impl Into<String>) -> Result<Transition<OnboardingSelections>, AdapterError> {
        self.engine.set_field(OnboardingField::Otp(code.into()));
        if self.engine.current_step() == CODE && self.selections().has_code() {
            return self.submit_code();
        }
        Ok(Transition::Unchanged { step: self.engine.current_step() })
    }

    /// Verifica el código: registra `phoneVerified` y `userPhone` y avanza a Done.
    pub fn submit_code(&mut self) -> Result<Transition<OnboardingSelections>, AdapterError> {
        if self.engine.current_step() != CODE || !self.engine.can_continue() {
            return Ok(self.engine.advance());
        }
        self.begin(LoadingKind::Verify)
    }

    /// Reenvía el código desde el paso Code. No cambia el paso.
    pub fn resend_code(&mut self) -> Result<Transition<OnboardingSelections>, AdapterError> {
        if self.engine.current_step() != CODE {
            return Ok(Transition::Unchanged { step: self.engine.current_step() });
        }
        self.begin(LoadingKind::Resend)
    }

    /// Botón principal del paso actual.
    pub fn primary_action(&mut self) -> Result<Transition<OnboardingSelections>, AdapterError> {
        let step = self.engine.current_step();
        if step == CONTACT && self.engine.can_continue() {
            if let Some(contact) = self.selections().destination_contact() {
                save_selected_contact(&mut self.store, &contact)?;
            }
        }
        if step == PHONE && self.engine.can_continue() {
            return self.begin(LoadingKind::SendCode);
        }
        if step == CODE {
            return self.submit_code();
        }
        Ok(self.engine.primary_action())
    }

    /// Aplica el fin de una espera. Devuelve `None` si el disparo quedó obsoleto.
    pub fn on_timer(&mut self,
                    fired: TimerFired<LoadingKind>)
                    -> Result<Option<Transition<OnboardingSelections>>, AdapterError> {
        match self.loading {
            Some((token, kind)) if token == fired.token && kind == fired.kind && self.gate.is_current(token) => {
                self.loading = None;
                self.complete(kind).map(Some)
            }
            _ => {
                debug!("stale onboarding timer {:?} {} ignored", fired.kind, fired.token);
                Ok(None)
            }
        }
    }

    /// Volver desde Code descarta el código introducido; volver desde
    /// Contact abandona el onboarding.
    pub fn back(&mut self) -> Transition<OnboardingSelections> {
        self.cancel_loading();
        let step = self.engine.current_step();
        if step == CONTACT {
            self.abandon();
            return Transition::Reset { reason: ResetReason::Abandoned };
        }
        if step == CODE {
            self.engine.set_field(OnboardingField::Otp(String::new()));
        }
        self.engine.retreat()
    }

    /// Abandono explícito: selecciones iniciales y vuelta a la bienvenida.
    /// Lo ya guardado en sesión se conserva.
    pub fn abandon(&mut self) -> Destination {
        self.cancel_loading();
        self.engine.abandon();
        Destination::Onboarding(OnboardingRoute::Welcome)
    }

    pub fn primary_label(&self) -> &'static str {
        match (self.loading(), self.engine.current_step()) {
            (Some(LoadingKind::SendCode), _) => "Sending...",
            (Some(LoadingKind::Verify), _) => "Verifying...",
            (Some(LoadingKind::Resend), _) => "Resending...",
            (None, s) if s == PHONE => "Send Code",
            (None, s) if s == CODE => "Verify",
            (None, s) if s == DONE => "Get started",
            _ => "Continue",
        }
    }

    pub fn snapshot(&self) -> OnboardingSnapshot {
        FlowSnapshot::capture(&self.engine, self.primary_label())
    }

    /// Inicia una espera; con retardo cero se completa en el acto. Durante
    /// una espera las acciones que la inician no tienen efecto.
    fn begin(&mut self, kind: LoadingKind) -> Result<Transition<OnboardingSelections>, AdapterError> {
        if let Some((_, current)) = self.loading {
            debug!("{kind:?} ignored while {current:?} is loading");
            return Ok(Transition::Unchanged { step: self.engine.current_step() });
        }
        let delay = self.timings.delay(kind);
        if delay == Duration::ZERO {
            return self.complete(kind);
        }
        let token = self.gate.issue();
        self.scheduler.schedule(TimerRequest::once(token, kind, delay));
        self.loading = Some((token, kind));
        Ok(Transition::Unchanged { step: self.engine.current_step() })
    }

    fn complete(&mut self, kind: LoadingKind) -> Result<Transition<OnboardingSelections>, AdapterError> {
        match kind {
            LoadingKind::SendCode => Ok(self.engine.advance()),
            LoadingKind::Resend => {
                info!("verification code resent to {}", self.engine.derived().masked_phone);
                Ok(Transition::Unchanged { step: self.engine.current_step() })
            }
            LoadingKind::Verify => {
                if !self.engine.can_continue() {
                    return Ok(self.engine.advance());
                }
                let phone = self.engine.derived().user_phone;
                mark_phone_verified(&mut self.store, &phone)?;
                info!("phone {} verified", self.engine.derived().masked_phone);
                Ok(self.engine.advance())
            }
        }
    }

    fn cancel_loading(&mut self) {
        if let Some((token, kind)) = self.loading.take() {
            debug!("{kind:?} cancelled");
            self.scheduler.cancel(token);
            self.gate.invalidate();
        }
    }
}

impl<St: SessionStore> OnboardingFlow<St, ManualScheduler<LoadingKind>> {
    /// Avanza el reloj virtual aplicando las esperas vencidas.
    pub fn advance_clock(&mut self, by: Duration) -> Result<Vec<Transition<OnboardingSelections>>, AdapterError> {
        let target = self.scheduler.now() + by;
        let mut applied = Vec::new();
        while let Some(fired) = self.scheduler.fire_next(target) {
            if let Some(t) = self.on_timer(fired)? {
                applied.push(t);
            }
        }
        self.scheduler.settle_at(target);
        Ok(applied)
    }
}
