use flow_adapters::error::AdapterError;
use flow_core::CoreEngineError;
use flow_domain::DomainError;
use flow_session::SessionError;
use thiserror::Error;

/// Errores de la aplicación (CLI y configuración).
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Error de configuración: {0}")]
    Config(String),
    #[error("Error en IO: {0}")]
    Io(#[from] std::io::Error),
    #[error("Uso incorrecto: {0}")]
    Usage(String),
    #[error("Rechazado: {0}")]
    Rejected(String),
    #[error(transparent)]
    Core(#[from] CoreEngineError),
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    Adapter(#[from] AdapterError),
}

impl AppError {
    /// Código de salida del binario: 2 uso, 4 rechazado, 5 otros.
    pub fn exit_code(&self) -> i32 {
        match self {
            AppError::Usage(_) | AppError::Config(_) => 2,
            AppError::Rejected(_) | AppError::Domain(_) => 4,
            _ => 5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_variant_format() {
        let err = AppError::Config("mala configuración".into());
        assert_eq!(err.to_string(), "Error de configuración: mala configuración");
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_io_variant_from() {
        let io_err = std::io::Error::other("falló IO");
        let err: AppError = io_err.into();
        assert_eq!(err.to_string(), "Error en IO: falló IO");
        assert_eq!(err.exit_code(), 5);
    }

    #[test]
    fn test_domain_error_is_transparent_and_rejected() {
        let err: AppError = DomainError::NotFound("contact 99".into()).into();
        assert_eq!(err.to_string(), DomainError::NotFound("contact 99".into()).to_string());
        assert_eq!(err.exit_code(), 4);
    }
}
