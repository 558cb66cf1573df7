use clap::{Parser, Subcommand, ValueEnum};
use cygno_mc::{RunDriver, RunKind, RunPlan, CONFIG};
use env_logger::Env;
use log::error;
use mc_condor::{JobMonitor, JobOutcome, MonitorPolicy};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "cygno-mc", version, about = "Generate CYGNO GEANT4 macros and submit them to HTCondor")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Radioactive ion confined in a geometry volume.
    Ion {
        /// Folder where the generated macros are saved.
        #[arg(long, alias = "macros_folder")]
        macros_folder: PathBuf,
        /// Isotope symbol, e.g. Cs137, U238, Ag108m.
        #[arg(long)]
        isotope: String,
        /// Half-extents "X Y Z" in meters.
        #[arg(long, allow_hyphen_values = true)]
        position: String,
        /// Confinement volume name.
        #[arg(long)]
        confine: String,
        #[arg(long, alias = "num_events")]
        num_events: u64,
        /// Number of macros to generate and submit.
        #[arg(long, default_value_t = 1)]
        times: u32,
        /// Folder for submit descriptors and the job log.
        #[arg(long, alias = "submit_folder")]
        submit_folder: Option<PathBuf>,
    },
    /// Isotropic gamma background.
    GammaBkg {
        #[arg(long, alias = "macros_folder")]
        macros_folder: PathBuf,
        #[arg(long, alias = "num_events")]
        num_events: u64,
        #[arg(long, default_value_t = 1)]
        times: u32,
        #[arg(long, alias = "submit_folder")]
        submit_folder: Option<PathBuf>,
        /// Energy spectrum file ("energy_MeV rate" per line). Without it the
        /// bundled spectrum is used, which is a placeholder shape and not a
        /// measurement.
        #[arg(long)]
        spectrum: Option<PathBuf>,
    },
    /// Check jobs recorded in one or more job logs and retrieve their outputs.
    Check {
        #[arg(required = true)]
        logs: Vec<PathBuf>,
        #[arg(long, value_enum, default_value_t = PolicyArg::AwaitCompletion)]
        policy: PolicyArg,
        /// Print the report as JSON.
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PolicyArg {
    Teardown,
    AwaitCompletion,
}

impl From<PolicyArg> for MonitorPolicy {
    fn from(p: PolicyArg) -> Self {
        match p {
            PolicyArg::Teardown => MonitorPolicy::Teardown,
            PolicyArg::AwaitCompletion => MonitorPolicy::AwaitCompletion,
        }
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let plan = match cli.command {
        Command::Ion { macros_folder,
                       isotope,
                       position,
                       confine,
                       num_events,
                       times,
                       submit_folder, } => RunPlan { kind: RunKind::Ion { isotope, position, confine },
                                                     macros_folder,
                                                     submit_folder: submit_folder.unwrap_or_else(|| CONFIG.submit_folder.clone()),
                                                     num_events,
                                                     times },
        Command::GammaBkg { macros_folder,
                            num_events,
                            times,
                            submit_folder,
                            spectrum, } => RunPlan { kind: RunKind::GammaBackground { spectrum },
                                                          macros_folder,
                                                          submit_folder: submit_folder.unwrap_or_else(|| CONFIG.submit_folder.clone()),
                                                          num_events,
                                                          times },
        Command::Check { logs, policy, json } => return check(&logs, policy.into(), json),
    };

    match RunDriver::new(&CONFIG, &CONFIG.condor).run(&plan) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::from(1)
        }
    }
}

fn check(logs: &[PathBuf], policy: MonitorPolicy, json: bool) -> ExitCode {
    let report = JobMonitor::new(&CONFIG.condor, policy).check_files(logs);
    if json {
        match serde_json::to_string_pretty(&report) {
            Ok(text) => println!("{text}"),
            Err(e) => {
                error!("could not serialize report: {e}");
                return ExitCode::from(1);
            }
        }
    } else {
        println!("retrieved={} not_found={} waiting={} failed_submissions={} errors={}",
                 report.count(&JobOutcome::Retrieved),
                 report.count(&JobOutcome::NotFound),
                 report.jobs
                       .iter()
                       .filter(|j| matches!(j.outcome, JobOutcome::Waiting(_)))
                       .count(),
                 report.failed_submissions,
                 report.errors.len());
    }
    if report.has_errors() {
        ExitCode::from(1)
    } else {
        ExitCode::SUCCESS
    }
}
