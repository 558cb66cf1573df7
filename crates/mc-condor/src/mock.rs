//! Scheduler en memoria para tests.
//!
//! Devuelve respuestas programadas por handle y registra cada invocación en
//! orden. Un submit aceptado asigna handles consecutivos (`cluster N.`) salvo
//! que se haya configurado para fallar.
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

use crate::scheduler::{BatchScheduler, CommandOutput, JobHandle};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    Submit(PathBuf),
    Query(String),
    Status(String),
    TransferData(String),
    Remove(String),
}

#[derive(Debug, Default)]
pub struct MockScheduler {
    fail_submit: bool,
    next_cluster: Cell<u32>,
    queries: HashMap<String, CommandOutput>,
    statuses: HashMap<String, CommandOutput>,
    fail_transfer: bool,
    calls: RefCell<Vec<Invocation>>,
}

impl MockScheduler {
    pub fn new() -> Self {
        Self { next_cluster: Cell::new(100),
               ..Self::default() }
    }

    /// Todos los submits terminan con código 1.
    pub fn failing_submit(mut self) -> Self {
        self.fail_submit = true;
        self
    }

    pub fn failing_transfer(mut self) -> Self {
        self.fail_transfer = true;
        self
    }

    /// Salida de `condor_q <handle>`.
    pub fn with_query(mut self, handle: &str, stdout: &str) -> Self {
        self.queries.insert(handle.to_string(), CommandOutput::ok(stdout));
        self
    }

    /// Salida de `condor_q <handle> -af JobStatus`.
    pub fn with_status(mut self, handle: &str, stdout: &str) -> Self {
        self.statuses.insert(handle.to_string(), CommandOutput::ok(stdout));
        self
    }

    pub fn calls(&self) -> Vec<Invocation> {
        self.calls.borrow().clone()
    }

    pub fn count(&self, pred: impl Fn(&Invocation) -> bool) -> usize {
        self.calls.borrow().iter().filter(|c| pred(c)).count()
    }

    fn record(&self, call: Invocation) {
        self.calls.borrow_mut().push(call);
    }
}

impl BatchScheduler for MockScheduler {
    fn submit(&self, descriptor: &Path) -> io::Result<CommandOutput> {
        self.record(Invocation::Submit(descriptor.to_path_buf()));
        if self.fail_submit {
            return Ok(CommandOutput::failed(1, "ERROR: Failed to connect to local queue manager"));
        }
        let cluster = self.next_cluster.get();
        self.next_cluster.set(cluster + 1);
        Ok(CommandOutput::ok(&format!("Submitting job(s).\n1 job(s) submitted to cluster {cluster}.\n")))
    }

    fn query(&self, handle: &JobHandle) -> io::Result<CommandOutput> {
        self.record(Invocation::Query(handle.to_string()));
        Ok(self.queries
               .get(handle.as_str())
               .cloned()
               .unwrap_or_else(|| CommandOutput::ok(&format!("-- Failed to fetch ads: job {handle} not found\n"))))
    }

    fn status(&self, handle: &JobHandle) -> io::Result<CommandOutput> {
        self.record(Invocation::Status(handle.to_string()));
        Ok(self.statuses.get(handle.as_str()).cloned().unwrap_or_else(|| CommandOutput::ok("")))
    }

    fn transfer_data(&self, handle: &JobHandle) -> io::Result<CommandOutput> {
        self.record(Invocation::TransferData(handle.to_string()));
        if self.fail_transfer {
            return Ok(CommandOutput::failed(1, "transfer failed"));
        }
        Ok(CommandOutput::ok(&format!("Fetched files for job {handle}\n")))
    }

    fn remove(&self, handle: &JobHandle) -> io::Result<CommandOutput> {
        self.record(Invocation::Remove(handle.to_string()));
        Ok(CommandOutput::ok(&format!("Job {handle} marked for removal\n")))
    }
}
