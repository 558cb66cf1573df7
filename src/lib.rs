//! CYGNO MC submit
//!
//! Librería del binario `cygno-mc`:
//! - `config`: configuración de despliegue leída del entorno (`.env`).
//! - `errors`: `AppError`, que agrupa los errores de los crates del workspace.
//! - `workflow`: el run driver que encadena macro, descriptor, submit y
//!   registro de jobs.
//!
//! La lógica vive en los crates de `crates/`; aquí solo se orquesta.

pub mod config;
pub mod errors;
pub mod workflow;

pub use config::{AppConfig, CONFIG};
pub use errors::AppError;
pub use workflow::{RunDriver, RunKind, RunPlan, RunSummary};
