//! flow-adapters: flujos concretos sobre el motor de `flow-core`.
//!
//! Este crate provee:
//! - `bills`: wizard de pago de servicios (Recipient → Bill type → Provider → Review).
//! - `onboarding`: elección de contacto y verificación telefónica con
//!   persistencia en el `SessionStore`.
//! - `calls`: simulador de llamadas con fases temporizadas, sobre un
//!   `ManualScheduler` (determinista) o sobre tokio (`CallRuntime`).
//! - `presentation`: snapshots serializables para la vista.
//! - `navigation`: destinos cerrados que el host resuelve a pantallas.

pub mod bills;
pub mod calls;
pub mod error;
pub mod navigation;
pub mod onboarding;
pub mod presentation;

pub use error::AdapterError;
