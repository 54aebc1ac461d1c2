//! Recorridos guionizados de cada flujo, usados por el binario `stepflow`.
//!
//! Cada recorrido conduce el flujo con las mismas operaciones que usaría la
//! interfaz y devuelve un reporte serializable. Un paso bloqueado o un salto
//! rechazado termina en `AppError::Rejected`.

mod bills;
mod call;
mod onboarding;

pub use bills::{run_bills, BillReport};
pub use call::{run_call, CallReport};
pub use onboarding::{run_onboarding, OnboardingReport};

use flow_core::Transition;

use crate::errors::AppError;

/// Falla si la transición fue bloqueada o rechazada.
fn require<S>(transition: Transition<S>, what: &str) -> Result<Transition<S>, AppError> {
    if transition.is_blocked() {
        return Err(AppError::Rejected(format!("{what}: {}", describe(&transition))));
    }
    Ok(transition)
}

fn describe<S>(transition: &Transition<S>) -> String {
    match transition {
        Transition::Blocked { step } => format!("step {} is incomplete", step.0),
        Transition::Rejected { target, reason } => format!("jump to step {} rejected ({reason:?})", target.0),
        _ => "unexpected transition".to_string(),
    }
}
