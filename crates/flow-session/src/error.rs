//! Errores del almacén de sesión.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("serialization error for key {key}: {message}")]
    Serialization { key: String, message: String },
    #[error("session store unavailable: {0}")]
    Unavailable(String),
}
