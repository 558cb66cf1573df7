//! mc-core: construcción de artifacts de simulación (macros GEANT4 y
//! descriptores de submit HTCondor).
//!
//! - `naming`: `RunKey`, la clave compartida por macro, descriptor y registro.
//! - `artifact`: builders estructurados; cada tipo de artifact tiene una única
//!   rutina de serialización para que el orden de directivas sea verificable.
//! - `constants`: valores fijos del despliegue (centro de la fuente, límites
//!   de cadena de decaimiento, atributos de HTCondor).
pub mod artifact;
pub mod constants;
pub mod errors;
pub mod naming;

pub use artifact::macro_file::{MacroBuilder, MacroSpec, SourceSpec};
pub use artifact::spectrum::GammaSpectrum;
pub use artifact::submit::{SubmitDescriptor, SubmitDescriptorBuilder};
pub use artifact::write_artifact;
pub use errors::CoreError;
pub use naming::RunKey;
