//! mc-condor
//!
//! Adaptador hacia el scheduler HTCondor. Todas las llamadas son bloqueantes,
//! sin timeout y sin reintentos: el formato de salida de las herramientas
//! externas es parte del contrato.
//!
//! Módulos:
//! - `scheduler`: trait `BatchScheduler` y la implementación `CondorCli`.
//! - `mock`: scheduler en memoria que registra invocaciones (tests).
//! - `submitter`: `condor_submit -spool` + extracción del handle.
//! - `joblog`: registro TSV append-only de cada intento de submit.
//! - `monitor`: consulta de jobs registrados y recuperación de salidas.
//! - `error`: errores etiquetados de submit y monitorización.

pub mod error;
pub mod joblog;
pub mod mock;
pub mod monitor;
pub mod scheduler;
pub mod submitter;

pub use error::{MonitorError, SubmitError};
pub use joblog::{read_log, JobLog, JobRecord, LogEntry, LoggedJob, SubmissionOutcome};
pub use mock::{Invocation, MockScheduler};
pub use monitor::{JobMonitor, JobOutcome, JobReport, JobState, MonitorPolicy, MonitorReport};
pub use scheduler::{BatchScheduler, CommandOutput, CondorCli, JobHandle};
pub use submitter::submit_job;
