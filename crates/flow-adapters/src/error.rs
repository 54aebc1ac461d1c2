//! Errores al construir los flujos concretos.

use flow_core::CoreEngineError;
use flow_domain::DomainError;
use flow_session::SessionError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AdapterError {
    #[error(transparent)]
    Core(#[from] CoreEngineError),
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error("call runtime is not running")]
    RuntimeClosed,
    #[error("call runtime task failed: {0}")]
    Join(String),
}
