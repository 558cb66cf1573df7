//! Run driver: repite K veces generar macro, generar descriptor, submit y
//! registrar una línea en el log de jobs.
//!
//! Un submit fallido no detiene el bucle (queda el marcador de fallo en el
//! registro). Los errores al resolver el isótopo, validar argumentos o
//! escribir ficheros sí abortan la corrida. Toda la validación ocurre antes de
//! truncar el registro de una corrida anterior.
use chrono::Utc;
use log::{debug, error, info, warn};
use mc_condor::{submit_job, BatchScheduler, JobHandle, JobLog, JobRecord, SubmissionOutcome};
use mc_core::{GammaSpectrum, MacroBuilder, MacroSpec, RunKey, SubmitDescriptor, SubmitDescriptorBuilder};
use mc_domain::{generate_seeds, Confinement, DecayDataSource, Isotope, IsotopeResolver, SeedPair};
use std::fs;
use std::path::PathBuf;
use std::thread;

use crate::config::AppConfig;
use crate::errors::AppError;

/// Qué se simula en cada iteración.
#[derive(Debug, Clone, PartialEq)]
pub enum RunKind {
    Ion {
        isotope: String,
        /// Semiejes "X Y Z" en metros.
        position: String,
        confine: String,
    },
    GammaBackground {
        /// Espectro propio (`energía tasa` por línea); sin él se usa el
        /// incorporado.
        spectrum: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct RunPlan {
    pub kind: RunKind,
    pub macros_folder: PathBuf,
    pub submit_folder: PathBuf,
    pub num_events: u64,
    pub times: u32,
}

impl RunPlan {
    /// Ruta del registro de jobs de la corrida.
    pub fn log_path(&self) -> PathBuf {
        let name = match &self.kind {
            RunKind::Ion { isotope, .. } => format!("macro_generation_{isotope}.log"),
            RunKind::GammaBackground { .. } => "macro_generation.log".to_string(),
        };
        self.submit_folder.join(name)
    }
}

#[derive(Debug, Default)]
pub struct RunSummary {
    pub log_path: PathBuf,
    pub macros: Vec<PathBuf>,
    pub submitted: Vec<JobHandle>,
    pub failed: usize,
}

/// Fuente de macros de una corrida ya validada.
enum Source {
    Ion(Isotope, Confinement),
    Gamma(Option<GammaSpectrum>),
}

impl Source {
    fn builder(&self, timestamp: i64) -> MacroBuilder {
        match self {
            Source::Ion(isotope, confinement) => MacroBuilder::ion(isotope, confinement, timestamp),
            Source::Gamma(Some(spectrum)) => MacroBuilder::gamma_background_with(spectrum.clone(), timestamp),
            Source::Gamma(None) => MacroBuilder::gamma_background(timestamp),
        }
    }
}

pub struct RunDriver<'a, S: BatchScheduler + ?Sized> {
    config: &'a AppConfig,
    scheduler: &'a S,
}

impl<'a, S: BatchScheduler + ?Sized> RunDriver<'a, S> {
    pub fn new(config: &'a AppConfig, scheduler: &'a S) -> Self {
        Self { config, scheduler }
    }

    /// Ejecuta la corrida con el resolver de isótopos por defecto (nativo, o
    /// `radioactivedecay` con la feature `python`).
    pub fn run(&self, plan: &RunPlan) -> Result<RunSummary, AppError> {
        #[cfg(feature = "python")]
        let resolver = IsotopeResolver::with_source(decayengine::NuclideEngine::init_python().map_err(mc_domain::DomainError::from)?);
        #[cfg(not(feature = "python"))]
        let resolver = IsotopeResolver::new()?;
        self.run_with(plan, &resolver)
    }

    pub fn run_with<D: DecayDataSource>(&self,
                                        plan: &RunPlan,
                                        resolver: &IsotopeResolver<D>)
                                        -> Result<RunSummary, AppError> {
        if plan.times == 0 {
            return Err(AppError::InvalidArgument("times must be at least 1".into()));
        }
        if plan.num_events == 0 {
            return Err(AppError::InvalidArgument("num_events must be positive".into()));
        }
        let source = match &plan.kind {
            RunKind::Ion { isotope, position, confine } => {
                let isotope = resolver.resolve(isotope)?;
                let confinement = Confinement::from_position(position, confine)?;
                if isotope.excitation().is_fallback() {
                    warn!("run:isotope {} has no tabulated excitation energy; macros use 0 keV",
                          isotope.symbol());
                }
                info!("Generating {} macros for {}", plan.times, isotope);
                Source::Ion(isotope, confinement)
            }
            RunKind::GammaBackground { spectrum } => {
                let spectrum = match spectrum {
                    Some(path) => Some(GammaSpectrum::parse(&fs::read_to_string(path)?)?),
                    None => None,
                };
                info!("Generating {} gamma background macros", plan.times);
                Source::Gamma(spectrum)
            }
        };

        // Macro y descriptor de prueba: un nombre inválido falla aquí, con el
        // registro anterior intacto.
        let dry = self.macro_spec(plan, &source, Utc::now().timestamp(), SeedPair::from_millis(0))?;
        self.descriptor(dry.key().clone())?;

        let mut log = JobLog::create(&plan.log_path())?;
        let mut summary = RunSummary { log_path: log.path().to_path_buf(),
                                       ..RunSummary::default() };
        for i in 1..=plan.times {
            self.iteration(plan, &source, i, &mut log, &mut summary)?;
            if i < plan.times {
                thread::sleep(self.config.submit_delay);
            }
        }
        info!("run:done submitted={} failed={} log={}",
              summary.submitted.len(),
              summary.failed,
              summary.log_path.display());
        Ok(summary)
    }

    fn iteration(&self,
                 plan: &RunPlan,
                 source: &Source,
                 i: u32,
                 log: &mut JobLog,
                 summary: &mut RunSummary)
                 -> Result<(), AppError> {
        let seeds = generate_seeds();
        let spec = self.macro_spec(plan, source, Utc::now().timestamp(), seeds)?;
        let macro_path = spec.write(&plan.macros_folder)?;
        debug!("run:macro i={i} path={}", macro_path.display());

        self.descriptor(spec.key().clone())?.write(&plan.submit_folder)?;
        let outcome = match submit_job(self.scheduler, &plan.submit_folder, spec.key()) {
            Ok(handle) => {
                info!("Condor job {handle} submitted successfully.");
                summary.submitted.push(handle.clone());
                SubmissionOutcome::Submitted(handle)
            }
            Err(e) => {
                error!("Failed to submit Condor job: {e}");
                summary.failed += 1;
                SubmissionOutcome::Failed
            }
        };
        log.append(&JobRecord { seeds,
                                num_events: plan.num_events,
                                info: format!("Macro {i}/{}", plan.times),
                                macro_file: spec.file_name(),
                                outcome })?;
        summary.macros.push(macro_path);
        Ok(())
    }

    fn macro_spec(&self,
                  plan: &RunPlan,
                  source: &Source,
                  timestamp: i64,
                  seeds: SeedPair)
                  -> Result<MacroSpec, AppError> {
        Ok(source.builder(timestamp)
                 .seeds(seeds)
                 .num_events(plan.num_events)
                 .build()?)
    }

    fn descriptor(&self, key: RunKey) -> Result<SubmitDescriptor, AppError> {
        Ok(SubmitDescriptorBuilder::new(key).executable(&self.config.executable)
                                            .transfer_inputs(self.config.transfer_inputs.iter())
                                            .build()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_path_per_kind() {
        let mut plan = RunPlan { kind: RunKind::GammaBackground { spectrum: None },
                                 macros_folder: PathBuf::from("m"),
                                 submit_folder: PathBuf::from("s"),
                                 num_events: 1,
                                 times: 1 };
        assert_eq!(plan.log_path(), PathBuf::from("s/macro_generation.log"));
        plan.kind = RunKind::Ion { isotope: "Cs137".into(),
                                   position: "1 1 1".into(),
                                   confine: "vessel".into() };
        assert_eq!(plan.log_path(), PathBuf::from("s/macro_generation_Cs137.log"));
    }
}
