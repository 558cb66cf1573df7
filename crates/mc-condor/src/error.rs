//! Errores del adaptador HTCondor.
//! Cada variante corresponde a un modo de fallo que el llamador trata de forma
//! explícita (ningún fallo de un job individual aborta la corrida).

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("could not run submit command: {0}")]
    Spawn(#[source] std::io::Error),
    #[error("submit rejected (exit {code:?}): {stderr}")]
    Rejected { code: Option<i32>, stderr: String },
    #[error("submit output has no job handle")]
    MissingHandle,
}

#[derive(Debug, Error)]
pub enum MonitorError {
    #[error("job log not found: {0}")]
    FileNotFound(PathBuf),
    #[error("io error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{command} {handle} failed: {detail}")]
    Command {
        command: &'static str,
        handle: String,
        detail: String,
    },
    #[error("{path}:{line}: {reason}")]
    Parse { path: PathBuf, line: usize, reason: String },
}

impl MonitorError {
    /// Clasifica un error de lectura de fichero.
    pub fn from_io(path: PathBuf, err: std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::NotFound {
            Self::FileNotFound(path)
        } else {
            Self::Io { path, source: err }
        }
    }
}
