use thiserror::Error;

/// Errores del dominio: búsquedas en catálogos y validación de invariantes.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("not found: {0}")]
    NotFound(String),
    #[error("validation error: {0}")]
    Validation(String),
    #[error("provider {provider} references unknown category {category}")]
    DanglingCategory { provider: String, category: String },
    #[error("category {0} has no providers")]
    EmptyCategory(String),
    #[error("provider {0} has no amount options")]
    EmptyAmountOptions(String),
    #[error("duplicate provider id {0}")]
    DuplicateProvider(String),
}
