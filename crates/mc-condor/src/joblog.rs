//! Registro de jobs (TSV, append-only).
//!
//! Formato: una cabecera y una línea por intento de submit. Las dos últimas
//! columnas son siempre el fichero de macro y el handle (o el marcador de
//! fallo), que es lo único que lee el monitor. Cada línea se vuelca a disco al
//! escribirse: una corrida interrumpida deja el registro completo hasta ese
//! punto.
use log::debug;
use mc_core::constants::FAILED_SUBMISSION_MARKER;
use mc_domain::SeedPair;
use serde::Serialize;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::error::MonitorError;
use crate::scheduler::JobHandle;

pub const LOG_HEADER: [&str; 6] = ["Seed1", "Seed2", "Num Events", "Macro Generation Info", "Macro File", "Job ID"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum SubmissionOutcome {
    Submitted(JobHandle),
    Failed,
}

/// Una línea del registro.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobRecord {
    pub seeds: SeedPair,
    pub num_events: u64,
    /// Texto libre, p.ej. "Macro 2/5".
    pub info: String,
    pub macro_file: String,
    pub outcome: SubmissionOutcome,
}

impl JobRecord {
    pub fn to_line(&self) -> String {
        let last = match &self.outcome {
            SubmissionOutcome::Submitted(h) => h.as_str(),
            SubmissionOutcome::Failed => FAILED_SUBMISSION_MARKER,
        };
        format!("{}\t{}\t{}\t{}\t{}\t{}",
                self.seeds.seed1, self.seeds.seed2, self.num_events, self.info, self.macro_file, last)
    }
}

pub struct JobLog {
    path: PathBuf,
    file: File,
}

impl JobLog {
    /// Crea (o trunca) el registro y escribe la cabecera.
    pub fn create(path: &Path) -> io::Result<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let mut file = File::create(path)?;
        writeln!(file, "{}", LOG_HEADER.join("\t"))?;
        file.flush()?;
        debug!("joblog:create path={}", path.display());
        Ok(Self { path: path.to_path_buf(),
                  file })
    }

    pub fn append(&mut self, record: &JobRecord) -> io::Result<()> {
        writeln!(self.file, "{}", record.to_line())?;
        self.file.flush()?;
        self.file.sync_data()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Job registrado con handle válido.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoggedJob {
    pub line: usize,
    pub macro_file: String,
    pub handle: JobHandle,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogEntry {
    Job(LoggedJob),
    /// Línea con el marcador de fallo: no hay nada que consultar.
    FailedSubmission { line: usize, macro_file: String },
}

/// Lee un registro. Error de fichero si no se puede abrir; errores de línea
/// individuales se devuelven en su posición sin cortar la lectura.
pub fn read_log(path: &Path) -> Result<Vec<Result<LogEntry, MonitorError>>, MonitorError> {
    let text = fs::read_to_string(path).map_err(|e| MonitorError::from_io(path.to_path_buf(), e))?;
    let entries = text.lines()
                      .enumerate()
                      .map(|(i, raw)| (i + 1, raw.trim_end_matches('\r')))
                      .filter(|(_, raw)| !raw.trim().is_empty() && !is_header(raw))
                      .map(|(line, raw)| parse_line(path, line, raw))
                      .collect();
    Ok(entries)
}

/// Cabecera de este registro o de versiones anteriores (con o sin columna
/// de macro): empieza por `Seed1` o termina en `Job ID`.
fn is_header(raw: &str) -> bool {
    let mut fields = raw.split('\t').map(str::trim);
    let first = fields.next();
    let last = fields.next_back().or(first);
    first == Some(LOG_HEADER[0]) || last == Some(LOG_HEADER[LOG_HEADER.len() - 1])
}

fn parse_line(path: &Path, line: usize, raw: &str) -> Result<LogEntry, MonitorError> {
    let parse_err = |reason: &str| MonitorError::Parse { path: path.to_path_buf(),
                                                         line,
                                                         reason: reason.to_string() };
    let fields: Vec<&str> = raw.split('\t').map(str::trim).collect();
    if fields.len() < 2 {
        return Err(parse_err("expected at least macro file and job id columns"));
    }
    let handle = fields[fields.len() - 1];
    let macro_file = fields[fields.len() - 2].to_string();
    if handle == FAILED_SUBMISSION_MARKER {
        return Ok(LogEntry::FailedSubmission { line, macro_file });
    }
    if handle.is_empty() || handle.contains(char::is_whitespace) {
        return Err(parse_err("invalid job id"));
    }
    Ok(LogEntry::Job(LoggedJob { line,
                                 macro_file,
                                 handle: JobHandle::new(handle) }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(outcome: SubmissionOutcome) -> JobRecord {
        JobRecord { seeds: SeedPair { seed1: 11, seed2: 5 },
                    num_events: 1000,
                    info: "Macro 1/2".into(),
                    macro_file: "Cs137_vessel_1.mac".into(),
                    outcome }
    }

    #[test]
    fn test_write_then_read() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("macro_generation_Cs137.log");
        let mut log = JobLog::create(&path).unwrap();
        log.append(&record(SubmissionOutcome::Submitted(JobHandle::new("123.")))).unwrap();
        log.append(&record(SubmissionOutcome::Failed)).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Seed1\tSeed2\tNum Events\tMacro Generation Info\tMacro File\tJob ID");
        assert_eq!(lines[1], "11\t5\t1000\tMacro 1/2\tCs137_vessel_1.mac\t123.");
        assert!(lines[2].ends_with("\tFailed to submit job"));

        let entries = read_log(&path).unwrap();
        assert_eq!(entries.len(), 2);
        assert!(matches!(&entries[0], Ok(LogEntry::Job(j)) if j.handle.as_str() == "123." && j.line == 2));
        assert!(matches!(&entries[1], Ok(LogEntry::FailedSubmission { line: 3, .. })));
    }

    #[test]
    fn test_create_truncates() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("macro_generation.log");
        fs::write(&path, "old\tcontent\n").unwrap();
        JobLog::create(&path).unwrap();
        assert!(read_log(&path).unwrap().is_empty());
    }

    #[test]
    fn test_bad_line_reported_in_place() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("x.log");
        fs::write(&path, "just-one-field\n1\t2\t3\tinfo\ta.mac\t9.\n").unwrap();
        let entries = read_log(&path).unwrap();
        assert!(matches!(entries[0], Err(MonitorError::Parse { line: 1, .. })));
        assert!(matches!(&entries[1], Ok(LogEntry::Job(j)) if j.macro_file == "a.mac"));
    }

    #[test]
    fn test_older_headers_are_skipped() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("macro_generation.log");
        fs::write(&path,
                  "Seed1\tSeed2\tMacro Generation Info\tJob ID\n\
                   11\t5\tgamma_bkg_1.mac\t42.\n").unwrap();
        let entries = read_log(&path).unwrap();
        assert_eq!(entries.len(), 1);
        assert!(matches!(&entries[0], Ok(LogEntry::Job(j)) if j.handle.as_str() == "42." && j.line == 2));
        assert!(is_header("Seed1\tSeed2\tNum Events\tMacro Generation Info\tJob ID"));
        assert!(!is_header("11\t5\t1000\tMacro 1/1\ta.mac\t7."));
    }

    #[test]
    fn test_missing_file() {
        let err = read_log(Path::new("/nonexistent/jobs.log")).unwrap_err();
        assert!(matches!(err, MonitorError::FileNotFound(_)));
    }
}
