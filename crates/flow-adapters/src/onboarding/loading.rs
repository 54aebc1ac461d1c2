//! Esperas simuladas del paso de verificación (envío y comprobación del código).

use std::time::Duration;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadingKind {
    SendCode,
    Verify,
    Resend,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OnboardingTimings {
    pub send_code_delay: Duration,
    pub verify_delay: Duration,
    pub resend_delay: Duration,
}

impl OnboardingTimings {
    /// Sin esperas: las acciones se completan en la misma llamada.
    pub fn instant() -> Self {
        Self { send_code_delay: Duration::ZERO,
               verify_delay: Duration::ZERO,
               resend_delay: Duration::ZERO }
    }

    pub fn delay(&self, kind: LoadingKind) -> Duration {
        match kind {
            LoadingKind::SendCode => self.send_code_delay,
            LoadingKind::Verify => self.verify_delay,
            LoadingKind::Resend => self.resend_delay,
        }
    }
}

impl Default for OnboardingTimings {
    fn default() -> Self {
        Self { send_code_delay: Duration::from_millis(1000),
               verify_delay: Duration::from_millis(1000),
               resend_delay: Duration::from_millis(1000) }
    }
}
