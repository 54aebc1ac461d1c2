//! StepFlow Rust Library
//!
//! Librería de la aplicación `stepflow`:
//! - `config`: configuración desde entorno (`CONFIG`).
//! - `errors`: `AppError` y códigos de salida.
//! - `cli`: parseo de argumentos del binario.
//! - `demo`: recorridos guionizados del wizard de pagos, el onboarding y el
//!   simulador de llamadas.

pub mod cli;
pub mod config;
pub mod demo;
pub mod errors;

pub use config::{AppConfig, CONFIG};
pub use errors::AppError;
