//! Monitorización de jobs registrados.
//!
//! Para cada handle de un registro de jobs se consulta al scheduler y, según
//! la política, se recuperan las salidas (`transfer`) y se elimina el job de
//! la cola (`rm`). `rm` nunca se ejecuta si la transferencia falla. Los
//! errores de un job o de una línea se acumulan en el informe y no detienen
//! el resto.
use log::{info, warn};
use serde::{Serialize, Serializer};
use std::path::{Path, PathBuf};

use crate::error::MonitorError;
use crate::joblog::{read_log, LogEntry, LoggedJob};
use crate::scheduler::{BatchScheduler, CommandOutput, JobHandle};

/// Subcadena que HTCondor imprime cuando no conoce el job.
pub const NOT_FOUND_MARKER: &str = "not found";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum MonitorPolicy {
    /// Comportamiento histórico: cualquier job todavía presente en la cola se
    /// transfiere y elimina, termine o no.
    Teardown,
    /// Solo los jobs completados se transfieren y eliminan.
    #[default]
    AwaitCompletion,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum JobState {
    Queued,
    Running,
    Held,
    Removed,
    Completed,
}

impl JobState {
    /// Traduce el código numérico de `JobStatus`.
    pub fn from_condor_code(code: &str) -> Option<Self> {
        match code {
            "1" => Some(Self::Queued),
            // 6 = transfiriendo salida, 7 = suspendido
            "2" | "6" | "7" => Some(Self::Running),
            "3" => Some(Self::Removed),
            "4" => Some(Self::Completed),
            "5" => Some(Self::Held),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum JobOutcome {
    /// El scheduler no conoce el handle.
    NotFound,
    /// Sigue en cola; no se ha hecho nada.
    Waiting(JobState),
    /// Salidas transferidas y job eliminado.
    Retrieved,
}

#[derive(Debug, Clone, Serialize)]
pub struct JobReport {
    pub log: PathBuf,
    pub macro_file: String,
    pub handle: JobHandle,
    pub outcome: JobOutcome,
}

#[derive(Debug, Default, Serialize)]
pub struct MonitorReport {
    pub jobs: Vec<JobReport>,
    pub failed_submissions: usize,
    #[serde(serialize_with = "errors_as_strings")]
    pub errors: Vec<MonitorError>,
}

fn errors_as_strings<S: Serializer>(errors: &[MonitorError], s: S) -> Result<S::Ok, S::Error> {
    s.collect_seq(errors.iter().map(|e| e.to_string()))
}

impl MonitorReport {
    pub fn count(&self, outcome: &JobOutcome) -> usize {
        self.jobs.iter().filter(|j| &j.outcome == outcome).count()
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

pub struct JobMonitor<'a, S: BatchScheduler + ?Sized> {
    scheduler: &'a S,
    policy: MonitorPolicy,
}

impl<'a, S: BatchScheduler + ?Sized> JobMonitor<'a, S> {
    pub fn new(scheduler: &'a S, policy: MonitorPolicy) -> Self {
        Self { scheduler, policy }
    }

    /// Procesa los registros en orden. Un registro ausente se anota como error
    /// y se continúa con el siguiente.
    pub fn check_files<P: AsRef<Path>>(&self, logs: &[P]) -> MonitorReport {
        let mut report = MonitorReport::default();
        for log in logs {
            let log = log.as_ref();
            let entries = match read_log(log) {
                Ok(entries) => entries,
                Err(e) => {
                    warn!("{e}");
                    report.errors.push(e);
                    continue;
                }
            };
            for entry in entries {
                match entry {
                    Ok(LogEntry::Job(job)) => match self.check_job(&job) {
                        Ok(outcome) => report.jobs.push(JobReport { log: log.to_path_buf(),
                                                                    macro_file: job.macro_file,
                                                                    handle: job.handle,
                                                                    outcome }),
                        Err(e) => {
                            warn!("{e}");
                            report.errors.push(e);
                        }
                    },
                    Ok(LogEntry::FailedSubmission { .. }) => report.failed_submissions += 1,
                    Err(e) => {
                        warn!("{e}");
                        report.errors.push(e);
                    }
                }
            }
        }
        report
    }

    pub fn check_job(&self, job: &LoggedJob) -> Result<JobOutcome, MonitorError> {
        match self.policy {
            MonitorPolicy::Teardown => self.check_teardown(job),
            MonitorPolicy::AwaitCompletion => self.check_completion(job),
        }
    }

    fn check_teardown(&self, job: &LoggedJob) -> Result<JobOutcome, MonitorError> {
        let out = self.call("condor_q", job, self.scheduler.query(&job.handle))?;
        if mentions_not_found(&out) {
            info!("Job {} associated with {} is not found.", job.handle, job.macro_file);
            return Ok(JobOutcome::NotFound);
        }
        ensure_success("condor_q", job, &out)?;
        info!("Job {} associated with {} is still present in the queue.", job.handle, job.macro_file);
        self.retrieve(job)
    }

    fn check_completion(&self, job: &LoggedJob) -> Result<JobOutcome, MonitorError> {
        let out = self.call("condor_q", job, self.scheduler.status(&job.handle))?;
        if mentions_not_found(&out) {
            info!("Job {} associated with {} is not found.", job.handle, job.macro_file);
            return Ok(JobOutcome::NotFound);
        }
        ensure_success("condor_q", job, &out)?;
        let codes: Vec<&str> = out.stdout.split_whitespace().collect();
        if codes.is_empty() {
            info!("Job {} associated with {} is not found.", job.handle, job.macro_file);
            return Ok(JobOutcome::NotFound);
        }
        let mut pending = None;
        for code in codes {
            let state = JobState::from_condor_code(code).ok_or_else(|| MonitorError::Command {
                                                           command: "condor_q",
                                                           handle: job.handle.to_string(),
                                                           detail: format!("unknown JobStatus '{code}'"),
                                                       })?;
            if state != JobState::Completed && pending.is_none() {
                pending = Some(state);
            }
        }
        match pending {
            Some(state) => {
                info!("Job {} associated with {} is {:?}.", job.handle, job.macro_file, state);
                Ok(JobOutcome::Waiting(state))
            }
            None => self.retrieve(job),
        }
    }

    fn retrieve(&self, job: &LoggedJob) -> Result<JobOutcome, MonitorError> {
        let out = self.call("condor_transfer_data", job, self.scheduler.transfer_data(&job.handle))?;
        ensure_success("condor_transfer_data", job, &out)?;
        let out = self.call("condor_rm", job, self.scheduler.remove(&job.handle))?;
        ensure_success("condor_rm", job, &out)?;
        info!("Job {} associated with {} has finished.", job.handle, job.macro_file);
        Ok(JobOutcome::Retrieved)
    }

    fn call(&self,
            command: &'static str,
            job: &LoggedJob,
            result: std::io::Result<CommandOutput>)
            -> Result<CommandOutput, MonitorError> {
        result.map_err(|e| MonitorError::Command { command,
                                                   handle: job.handle.to_string(),
                                                   detail: e.to_string() })
    }
}

fn mentions_not_found(out: &CommandOutput) -> bool {
    out.stdout.contains(NOT_FOUND_MARKER) || out.stderr.contains(NOT_FOUND_MARKER)
}

fn ensure_success(command: &'static str, job: &LoggedJob, out: &CommandOutput) -> Result<(), MonitorError> {
    if out.success {
        return Ok(());
    }
    Err(MonitorError::Command { command,
                                handle: job.handle.to_string(),
                                detail: format!("exit {:?}: {}", out.code, out.stderr.trim()) })
}
