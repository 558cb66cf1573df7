//! Submit de un descriptor ya escrito.
//!
//! Contrato frágil heredado del despliegue: el handle es el último token de
//! la salida estándar de `condor_submit`, sin más validación.
use log::{error, info, warn};
use mc_core::RunKey;
use std::fs;
use std::path::Path;

use crate::error::SubmitError;
use crate::scheduler::{BatchScheduler, JobHandle};

/// Envía `{submit_folder}/{stem}.submit`. Si el scheduler lo acepta, borra el
/// descriptor y devuelve el handle; si falla, el descriptor queda en disco
/// para inspección.
pub fn submit_job<S: BatchScheduler + ?Sized>(scheduler: &S,
                                              submit_folder: &Path,
                                              key: &RunKey)
                                              -> Result<JobHandle, SubmitError> {
    let descriptor = submit_folder.join(key.submit_file());
    let output = scheduler.submit(&descriptor).map_err(|e| {
                                                   error!("Error submitting job {}: {e}", descriptor.display());
                                                   SubmitError::Spawn(e)
                                               })?;
    if !output.success {
        error!("Error submitting job {}: exit={:?} stderr={}",
               descriptor.display(),
               output.code,
               output.stderr.trim());
        return Err(SubmitError::Rejected { code: output.code,
                                           stderr: output.stderr.trim().to_string() });
    }
    let handle = output.stdout
                       .split_whitespace()
                       .last()
                       .map(JobHandle::new)
                       .ok_or(SubmitError::MissingHandle)?;
    info!("Submitted job {handle}");

    // El job ya está en cola: un fallo al borrar no invalida el submit.
    if let Err(e) = fs::remove_file(&descriptor) {
        warn!("could not delete submit file {}: {e}", descriptor.display());
    }
    Ok(handle)
}
