//! Snapshots de sólo lectura para la capa de presentación.
//!
//! La vista es una función pura del snapshot; el `fingerprint()` permite
//! saltar frames idénticos.

use flow_core::hashing::hash_value;
use flow_core::{EventStore, FlowEngine, SelectionStore, StepId, StepStatus};
use flow_domain::{format_duration, Contact};
use log::warn;
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use crate::calls::CallPhase;
use crate::navigation::NavTab;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepSnapshot {
    pub id: StepId,
    pub label: String,
    pub valid: bool,
    pub status: StepStatus,
}

#[derive(Debug, Clone, Serialize)]
pub struct FlowSnapshot<S, D> {
    pub flow_id: Uuid,
    pub current_step: StepId,
    pub current_index: usize,
    pub steps: Vec<StepSnapshot>,
    pub selections: S,
    pub derived: D,
    pub can_continue: bool,
    pub primary_label: String,
}

impl<S: SelectionStore> FlowSnapshot<S, S::Derived> {
    /// Captura el estado del engine con la etiqueta de la acción primaria dada.
    pub fn capture<E: EventStore>(engine: &FlowEngine<S, E>, primary_label: impl Into<String>) -> Self {
        let current = engine.current_step_index();
        let steps = engine.steps()
                          .into_iter()
                          .enumerate()
                          .map(|(i, v)| StepSnapshot { valid: engine.validate_step(v.id),
                                                       status: StepStatus::at(i + 1, current),
                                                       id: v.id,
                                                       label: v.label })
                          .collect();
        Self { flow_id: engine.flow_id(),
               current_step: engine.current_step(),
               current_index: current,
               steps,
               selections: engine.selections().clone(),
               derived: engine.derived(),
               can_continue: engine.can_continue(),
               primary_label: primary_label.into() }
    }
}

impl<S: Serialize, D: Serialize> FlowSnapshot<S, D> {
    pub fn fingerprint(&self) -> String {
        let value = serde_json::to_value(self).unwrap_or_else(|e| {
                                                  warn!("snapshot not serializable: {e}");
                                                  Value::Null
                                              });
        hash_value(&value)
    }
}

/// Pantalla que corresponde a un estado del simulador.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderTarget {
    HomeTab,
    ServicesTab,
    AccountTab,
    OutOfMinutesSheet,
    LowOnMinutesSheet,
    CallingScreen,
    CallSummary,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CallSnapshot {
    pub phase: CallPhase,
    pub contact: Option<Contact>,
    pub duration_seconds: u64,
    pub status_label: Option<String>,
    pub active_tab: NavTab,
}

impl CallSnapshot {
    pub fn new(phase: CallPhase, contact: Option<Contact>, duration_seconds: u64, active_tab: NavTab) -> Self {
        Self { status_label: status_label(phase, duration_seconds),
               phase,
               contact,
               duration_seconds,
               active_tab }
    }

    pub fn render_target(&self) -> RenderTarget {
        match self.phase {
            CallPhase::Idle => match self.active_tab {
                NavTab::Home => RenderTarget::HomeTab,
                NavTab::Services => RenderTarget::ServicesTab,
                NavTab::Account => RenderTarget::AccountTab,
            },
            CallPhase::OutOfMinutes => RenderTarget::OutOfMinutesSheet,
            CallPhase::LowOnMinutes => RenderTarget::LowOnMinutesSheet,
            CallPhase::Connecting | CallPhase::Ringing | CallPhase::InCall => RenderTarget::CallingScreen,
            CallPhase::Ended => RenderTarget::CallSummary,
        }
    }
}

/// Texto de estado de la pantalla de llamada; `None` fuera de ella.
pub fn status_label(phase: CallPhase, duration_seconds: u64) -> Option<String> {
    match phase {
        CallPhase::Connecting => Some("Connecting...".to_string()),
        CallPhase::Ringing => Some("Ringing...".to_string()),
        CallPhase::InCall => Some(format_duration(duration_seconds)),
        CallPhase::Ended => Some("Call ended".to_string()),
        CallPhase::Idle | CallPhase::OutOfMinutes | CallPhase::LowOnMinutes => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_labels_per_phase() {
        assert_eq!(status_label(CallPhase::Connecting, 0).as_deref(), Some("Connecting..."));
        assert_eq!(status_label(CallPhase::InCall, 75).as_deref(), Some("01:15"));
        assert_eq!(status_label(CallPhase::Ended, 75).as_deref(), Some("Call ended"));
        assert_eq!(status_label(CallPhase::LowOnMinutes, 0), None);
    }

    #[test]
    fn idle_renders_active_tab() {
        let snap = CallSnapshot::new(CallPhase::Idle, None, 0, NavTab::Account);
        assert_eq!(snap.render_target(), RenderTarget::AccountTab);
        let snap = CallSnapshot::new(CallPhase::Ringing, None, 0, NavTab::Home);
        assert_eq!(snap.render_target(), RenderTarget::CallingScreen);
    }
}
