//! Onboarding: elegir a quién llamar y verificar el teléfono propio.

mod flow;
mod home;
mod loading;
mod selections;
pub mod steps;

pub use flow::{OnboardingFlow, OnboardingSnapshot};
pub use home::{OnboardingHome, DEFAULT_DESTINATION_COUNTRY};
pub use loading::{LoadingKind, OnboardingTimings};
pub use selections::{OnboardingDerived, OnboardingField, OnboardingSelections, OTP_LENGTH};
