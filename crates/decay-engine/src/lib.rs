use thiserror::Error;
pub mod nuclide;
#[cfg(feature = "python")]
mod python;
pub use nuclide::{atomic_number, parse_nuclide, Nuclide, ELEMENTS};

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Símbolo de nucleido inválido: {0}")]
    InvalidSymbol(String),
    #[error("Elemento desconocido: {0}")]
    UnknownElement(String),
    #[error("Número másico inválido: {0}")]
    InvalidMass(String),
    #[error("Error en el backend de decaimientos: {0}")]
    Backend(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Backend {
    Native,
    #[cfg(feature = "python")]
    Python,
}

/// Punto de acceso a los datos de decaimiento.
#[derive(Debug, Clone)]
pub struct NuclideEngine {
    backend: Backend,
}

impl NuclideEngine {
    /// Engine con el parser nativo (no requiere Python).
    pub fn init() -> Result<Self, EngineError> {
        Ok(Self { backend: Backend::Native })
    }

    /// Engine respaldado por `radioactivedecay`.
    #[cfg(feature = "python")]
    pub fn init_python() -> Result<Self, EngineError> {
        python::init_python().map_err(|e| EngineError::Backend(e.to_string()))?;
        Ok(Self { backend: Backend::Python })
    }

    pub fn get_nuclide(&self, symbol: &str) -> Result<Nuclide, EngineError> {
        match self.backend {
            Backend::Native => nuclide::parse_nuclide(symbol),
            #[cfg(feature = "python")]
            Backend::Python => python::get_nuclide(symbol).map_err(|e| EngineError::Backend(e.to_string())),
        }
    }
}
