use decayengine::EngineError;
use thiserror::Error;

/// Error del dominio de generación de macros.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Error de validación: {0}")]
    ValidationError(String),

    #[error("Isótopo no resuelto '{symbol}': {reason}")]
    UnknownIsotope { symbol: String, reason: String },

    #[error("Error externo: {0}")]
    ExternalError(String),
}

// Conversión desde EngineError a DomainError
impl From<EngineError> for DomainError {
    fn from(e: EngineError) -> Self {
        DomainError::ExternalError(e.to_string())
    }
}
