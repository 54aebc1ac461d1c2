//! Definiciones relacionadas a Steps.
//!
//! Un Step es una pantalla/estado dentro de un flujo lineal, con un predicado
//! de validez que gobierna el avance. Este módulo define:
//! - `StepId`: identificador estable (>= 1) dentro del flujo.
//! - `StepDefinition`: interfaz neutral usada por el engine.
//! - `PredicateStep`: implementación declarativa (id, label, predicado).
//! - `StepStatus`: posición de un step respecto al cursor (para indicadores de progreso).

pub mod definition;
mod status;

pub use definition::{PredicateStep, StepDefinition, StepId, StepKind, StepView};
pub use status::StepStatus;
