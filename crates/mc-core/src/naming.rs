//! Clave de corrida (`RunKey`).
//!
//! Une una macro, un descriptor y una línea del registro mediante el mismo
//! stem: `{isotope}_{confine}_{timestamp}` o `gamma_bkg_{timestamp}`. La
//! unicidad depende de la pausa entre iteraciones; no se verifica.
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::GAMMA_BKG_PREFIX;
use crate::CoreError;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RunKey {
    Ion { isotope: String, confine: String, timestamp: i64 },
    GammaBackground { timestamp: i64 },
}

impl RunKey {
    pub fn ion(isotope: &str, confine: &str, timestamp: i64) -> Self {
        RunKey::Ion { isotope: isotope.to_string(),
                      confine: confine.to_string(),
                      timestamp }
    }

    pub fn gamma_background(timestamp: i64) -> Self {
        RunKey::GammaBackground { timestamp }
    }

    pub fn timestamp(&self) -> i64 {
        match self {
            RunKey::Ion { timestamp, .. } | RunKey::GammaBackground { timestamp } => *timestamp,
        }
    }

    /// Verifica que la clave produzca nombres de fichero válidos.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.timestamp() < 0 {
            return Err(CoreError::Validation(format!("negative timestamp {}", self.timestamp())));
        }
        if let RunKey::Ion { isotope, confine, .. } = self {
            for (field, value) in [("isotope", isotope), ("confine", confine)] {
                if value.is_empty() || value.contains(|c: char| c.is_whitespace() || c == '/' || c == '\\') {
                    return Err(CoreError::Validation(format!("{field} '{value}' cannot be used in a file name")));
                }
            }
        }
        Ok(())
    }

    pub fn stem(&self) -> String {
        match self {
            RunKey::Ion { isotope, confine, timestamp } => format!("{isotope}_{confine}_{timestamp}"),
            RunKey::GammaBackground { timestamp } => format!("{GAMMA_BKG_PREFIX}_{timestamp}"),
        }
    }

    pub fn macro_file(&self) -> String { format!("{}.mac", self.stem()) }
    pub fn output_file(&self) -> String { format!("{}.root", self.stem()) }
    pub fn submit_file(&self) -> String { format!("{}.submit", self.stem()) }
    pub fn condor_log_file(&self) -> String { format!("{}.log", self.stem()) }
    pub fn stdout_file(&self) -> String { format!("{}.out", self.stem()) }
    pub fn stderr_file(&self) -> String { format!("{}.error", self.stem()) }
}

impl fmt::Display for RunKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.stem())
    }
}
