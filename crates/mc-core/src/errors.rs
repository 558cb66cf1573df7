//! Errores de construcción y escritura de artifacts.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Validación fallida: {0}")]
    Validation(String),
    #[error("Error en IO: {0}")]
    Io(#[from] std::io::Error),
    #[error("Recurso inválido: {0}")]
    Resource(String),
}
