//! Configuración central de la aplicación.
//! Carga variables de entorno (.env) una sola vez y expone una estructura
//! inmutable (`CONFIG`). Todos los valores tienen un valor por defecto igual al
//! del despliegue actual; un valor no parseable se ignora con un aviso.
use log::warn;
use mc_condor::CondorCli;
use mc_core::constants::{DEFAULT_EXECUTABLE, DEFAULT_TRANSFER_INPUTS};
use once_cell::sync::Lazy;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Pausa por defecto entre iteraciones; es lo que separa los timestamps.
pub const DEFAULT_SUBMIT_DELAY_MS: u64 = 1000;

/// Configuración global de la aplicación.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Script ejecutado por cada job.
    pub executable: String,
    /// Ficheros que HTCondor transfiere al nodo de ejecución.
    pub transfer_inputs: Vec<String>,
    /// Carpeta de descriptores y registros si la CLI no indica otra.
    pub submit_folder: PathBuf,
    pub submit_delay: Duration,
    /// Binarios de HTCondor.
    pub condor: CondorCli,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self { executable: DEFAULT_EXECUTABLE.to_string(),
               transfer_inputs: DEFAULT_TRANSFER_INPUTS.iter().map(|s| s.to_string()).collect(),
               submit_folder: PathBuf::from("."),
               submit_delay: Duration::from_millis(DEFAULT_SUBMIT_DELAY_MS),
               condor: CondorCli::default() }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|k| env::var(k).ok())
    }

    /// Construye la configuración a partir de una función de búsqueda
    /// (`from_env` usa el entorno del proceso).
    pub fn from_lookup<F: Fn(&str) -> Option<String>>(lookup: F) -> Self {
        let defaults = Self::default();
        let var = |k: &str| lookup(k).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let transfer_inputs = var("CYGNO_TRANSFER_INPUT_FILES").map(|v| {
                                                                   v.split(',')
                                                                    .map(str::trim)
                                                                    .filter(|s| !s.is_empty())
                                                                    .map(String::from)
                                                                    .collect()
                                                               })
                                                               .unwrap_or(defaults.transfer_inputs);
        let submit_delay = match var("CYGNO_SUBMIT_DELAY_MS") {
            Some(v) => match v.parse::<u64>() {
                Ok(ms) => Duration::from_millis(ms),
                Err(_) => {
                    warn!("config: CYGNO_SUBMIT_DELAY_MS='{v}' no es un entero; usando {DEFAULT_SUBMIT_DELAY_MS}");
                    defaults.submit_delay
                }
            },
            None => defaults.submit_delay,
        };

        Self { executable: var("CYGNO_EXECUTABLE").unwrap_or(defaults.executable),
               transfer_inputs,
               submit_folder: var("CYGNO_SUBMIT_FOLDER").map(PathBuf::from)
                                                        .unwrap_or(defaults.submit_folder),
               submit_delay,
               condor: CondorCli { submit_bin: var("CONDOR_SUBMIT_BIN").unwrap_or(defaults.condor.submit_bin),
                                   q_bin: var("CONDOR_Q_BIN").unwrap_or(defaults.condor.q_bin),
                                   transfer_bin: var("CONDOR_TRANSFER_BIN").unwrap_or(defaults.condor.transfer_bin),
                                   rm_bin: var("CONDOR_RM_BIN").unwrap_or(defaults.condor.rm_bin) } }
    }
}

/// Instancia global perezosa de configuración, evaluada una sola vez.
pub static CONFIG: Lazy<AppConfig> = Lazy::new(|| {
    // Un .env ausente no es un error.
    let _ = dotenvy::dotenv();
    AppConfig::from_env()
});

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |k| map.get(k).cloned()
    }

    #[test]
    fn test_defaults_without_env() {
        let cfg = AppConfig::from_lookup(|_| None);
        assert_eq!(cfg.executable, DEFAULT_EXECUTABLE);
        assert_eq!(cfg.transfer_inputs.len(), DEFAULT_TRANSFER_INPUTS.len());
        assert_eq!(cfg.submit_folder, PathBuf::from("."));
        assert_eq!(cfg.submit_delay, Duration::from_millis(1000));
        assert_eq!(cfg.condor, CondorCli::default());
    }

    #[test]
    fn test_overrides() {
        let cfg = AppConfig::from_lookup(lookup(&[("CYGNO_EXECUTABLE", "/opt/run.sh"),
                                                  ("CYGNO_TRANSFER_INPUT_FILES", " a, b ,,c "),
                                                  ("CYGNO_SUBMIT_DELAY_MS", "0"),
                                                  ("CONDOR_Q_BIN", "/usr/bin/condor_q")]));
        assert_eq!(cfg.executable, "/opt/run.sh");
        assert_eq!(cfg.transfer_inputs, vec!["a", "b", "c"]);
        assert_eq!(cfg.submit_delay, Duration::ZERO);
        assert_eq!(cfg.condor.q_bin, "/usr/bin/condor_q");
        assert_eq!(cfg.condor.rm_bin, "condor_rm");
    }

    #[test]
    fn test_bad_delay_falls_back() {
        let cfg = AppConfig::from_lookup(lookup(&[("CYGNO_SUBMIT_DELAY_MS", "soon")]));
        assert_eq!(cfg.submit_delay, Duration::from_millis(DEFAULT_SUBMIT_DELAY_MS));
    }
}
