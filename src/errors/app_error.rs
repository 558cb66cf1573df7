use mc_core::CoreError;
use mc_domain::DomainError;
use thiserror::Error;

/// Error de nivel aplicación: cualquiera de ellos aborta la corrida.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Error de dominio: {0}")]
    Domain(#[from] DomainError),
    #[error("Error generando artifacts: {0}")]
    Core(#[from] CoreError),
    #[error("Error en IO: {0}")]
    Io(#[from] std::io::Error),
    #[error("Argumento inválido: {0}")]
    InvalidArgument(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_variant_from() {
        let err: AppError = std::io::Error::other("falló IO").into();
        assert_eq!(err.to_string(), "Error en IO: falló IO");
    }

    #[test]
    fn test_domain_variant_wraps_message() {
        let err: AppError = DomainError::UnknownIsotope { symbol: "Xx99".into(),
                                                          reason: "sin datos".into() }.into();
        assert_eq!(err.to_string(), "Error de dominio: Isótopo no resuelto 'Xx99': sin datos");
    }
}
