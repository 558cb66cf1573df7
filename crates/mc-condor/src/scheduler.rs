//! Acceso a las herramientas de línea de comandos del scheduler.
//!
//! `BatchScheduler` aísla las cinco llamadas externas para poder sustituirlas
//! en tests (`MockScheduler`). `CondorCli` las ejecuta con
//! `std::process::Command`, de forma bloqueante y sin timeout.
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io;
use std::path::Path;
use std::process::Command;

/// Identificador asignado por el scheduler al aceptar un submit. Se guarda tal
/// cual aparece en la salida de `condor_submit`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JobHandle(String);

impl JobHandle {
    pub fn new(handle: &str) -> Self {
        Self(handle.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for JobHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Resultado de una invocación externa.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommandOutput {
    pub success: bool,
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn ok(stdout: &str) -> Self {
        Self { success: true,
               code: Some(0),
               stdout: stdout.to_string(),
               stderr: String::new() }
    }

    pub fn failed(code: i32, stderr: &str) -> Self {
        Self { success: false,
               code: Some(code),
               stdout: String::new(),
               stderr: stderr.to_string() }
    }
}

impl From<std::process::Output> for CommandOutput {
    fn from(out: std::process::Output) -> Self {
        Self { success: out.status.success(),
               code: out.status.code(),
               stdout: String::from_utf8_lossy(&out.stdout).into_owned(),
               stderr: String::from_utf8_lossy(&out.stderr).into_owned() }
    }
}

pub trait BatchScheduler {
    /// Submit en modo spool del descriptor indicado.
    fn submit(&self, descriptor: &Path) -> io::Result<CommandOutput>;
    /// Consulta libre del job (salida legible).
    fn query(&self, handle: &JobHandle) -> io::Result<CommandOutput>;
    /// Consulta del campo `JobStatus` del job.
    fn status(&self, handle: &JobHandle) -> io::Result<CommandOutput>;
    /// Recupera los ficheros de salida de un job en spool.
    fn transfer_data(&self, handle: &JobHandle) -> io::Result<CommandOutput>;
    /// Elimina el job de la cola.
    fn remove(&self, handle: &JobHandle) -> io::Result<CommandOutput>;
}

/// Binarios de HTCondor a invocar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CondorCli {
    pub submit_bin: String,
    pub q_bin: String,
    pub transfer_bin: String,
    pub rm_bin: String,
}

impl Default for CondorCli {
    fn default() -> Self {
        Self { submit_bin: "condor_submit".into(),
               q_bin: "condor_q".into(),
               transfer_bin: "condor_transfer_data".into(),
               rm_bin: "condor_rm".into() }
    }
}

impl CondorCli {
    fn run(&self, program: &str, args: &[&str]) -> io::Result<CommandOutput> {
        debug!("command:start {} {:?}", program, args);
        let output: CommandOutput = Command::new(program).args(args).output()?.into();
        debug!("command:done {} code={:?} stdout_len={}", program, output.code, output.stdout.len());
        Ok(output)
    }
}

impl BatchScheduler for CondorCli {
    fn submit(&self, descriptor: &Path) -> io::Result<CommandOutput> {
        let descriptor = descriptor.to_string_lossy();
        self.run(&self.submit_bin, &["-spool", &descriptor])
    }

    fn query(&self, handle: &JobHandle) -> io::Result<CommandOutput> {
        self.run(&self.q_bin, &[handle.as_str()])
    }

    fn status(&self, handle: &JobHandle) -> io::Result<CommandOutput> {
        self.run(&self.q_bin, &[handle.as_str(), "-af", "JobStatus"])
    }

    fn transfer_data(&self, handle: &JobHandle) -> io::Result<CommandOutput> {
        self.run(&self.transfer_bin, &[handle.as_str()])
    }

    fn remove(&self, handle: &JobHandle) -> io::Result<CommandOutput> {
        self.run(&self.rm_bin, &[handle.as_str()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_binary_is_io_error() {
        let cli = CondorCli { submit_bin: "/nonexistent/condor_submit_for_tests".into(),
                              ..CondorCli::default() };
        let err = cli.submit(Path::new("x.submit")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn test_command_output_helpers() {
        assert!(CommandOutput::ok("1 job(s) submitted to cluster 7.").success);
        let f = CommandOutput::failed(1, "boom");
        assert!(!f.success);
        assert_eq!(f.code, Some(1));
    }
}
