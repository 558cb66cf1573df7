//! Artifacts de texto generados por una corrida.
pub mod macro_file;
pub mod spectrum;
pub mod submit;

use log::debug;
use std::fs;
use std::path::{Path, PathBuf};

use crate::CoreError;

/// Escribe `contents` en `folder/file_name`, creando la carpeta si falta.
/// Sobrescribe sin aviso un fichero existente con el mismo nombre.
pub fn write_artifact(folder: &Path, file_name: &str, contents: &str) -> Result<PathBuf, CoreError> {
    fs::create_dir_all(folder)?;
    let path = folder.join(file_name);
    fs::write(&path, contents)?;
    debug!("artifact:written path={} bytes={}", path.display(), contents.len());
    Ok(path)
}
