//! Descriptores de submit de HTCondor (`key = value`).
//!
//! El descriptor referencia exactamente una macro (como argumento del
//! ejecutable) y declara un único fichero de salida a transferir. No se
//! verifica que las rutas referenciadas existan.
use std::path::{Path, PathBuf};

use crate::artifact::write_artifact;
use crate::constants::{CONDOR_ATTRIBUTES, DEFAULT_EXECUTABLE, DEFAULT_TRANSFER_INPUTS};
use crate::naming::RunKey;
use crate::CoreError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitDescriptor {
    key: RunKey,
    executable: String,
    transfer_inputs: Vec<String>,
    attributes: Vec<(String, String)>,
}

#[derive(Debug, Clone)]
pub struct SubmitDescriptorBuilder {
    key: RunKey,
    executable: String,
    transfer_inputs: Vec<String>,
    attributes: Vec<(String, String)>,
}

impl SubmitDescriptorBuilder {
    /// Builder con el ejecutable, entradas y atributos por defecto.
    pub fn new(key: RunKey) -> Self {
        Self { key,
               executable: DEFAULT_EXECUTABLE.to_string(),
               transfer_inputs: DEFAULT_TRANSFER_INPUTS.iter().map(|s| s.to_string()).collect(),
               attributes: CONDOR_ATTRIBUTES.iter()
                                            .map(|(k, v)| (k.to_string(), v.to_string()))
                                            .collect() }
    }

    pub fn executable(mut self, executable: &str) -> Self {
        self.executable = executable.to_string();
        self
    }

    pub fn transfer_inputs<I, S>(mut self, inputs: I) -> Self
        where I: IntoIterator<Item = S>,
              S: Into<String>
    {
        self.transfer_inputs = inputs.into_iter().map(Into::into).collect();
        self
    }

    /// Añade o reemplaza un atributo `+name = value`.
    pub fn attribute(mut self, name: &str, value: &str) -> Self {
        match self.attributes.iter_mut().find(|(k, _)| k == name) {
            Some(slot) => slot.1 = value.to_string(),
            None => self.attributes.push((name.to_string(), value.to_string())),
        }
        self
    }

    pub fn build(self) -> Result<SubmitDescriptor, CoreError> {
        self.key.validate()?;
        if self.executable.trim().is_empty() {
            return Err(CoreError::Validation("executable path is empty".into()));
        }
        if self.transfer_inputs.iter().any(|p| p.trim().is_empty() || p.contains(',')) {
            return Err(CoreError::Validation("transfer input paths must be non-empty and comma-free".into()));
        }
        Ok(SubmitDescriptor { key: self.key,
                              executable: self.executable,
                              transfer_inputs: self.transfer_inputs,
                              attributes: self.attributes })
    }
}

impl SubmitDescriptor {
    pub fn key(&self) -> &RunKey { &self.key }
    pub fn file_name(&self) -> String { self.key.submit_file() }

    pub fn render(&self) -> String {
        let key = &self.key;
        let mut lines = vec!["universe   = vanilla".to_string(),
                             format!("executable = {}", self.executable),
                             format!("arguments  = {}", key.macro_file()),
                             String::new(),
                             format!("log        = {}", key.condor_log_file()),
                             format!("output     = {}", key.stdout_file()),
                             format!("error      = {}", key.stderr_file()),
                             String::new(),
                             "getenv = True".to_string(),
                             format!("transfer_input_files = {}", self.transfer_inputs.join(", ")),
                             format!("transfer_output_files  = {}", key.output_file()),
                             String::new()];
        for (name, value) in &self.attributes {
            lines.push(format!("+{name} = {value}"));
        }
        lines.push(String::new());
        lines.push("queue".to_string());
        let mut text = lines.join("\n");
        text.push('\n');
        text
    }

    /// Escribe `{stem}.submit` en `folder` y devuelve su ruta.
    pub fn write(&self, folder: &Path) -> Result<PathBuf, CoreError> {
        write_artifact(folder, &self.file_name(), &self.render())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_descriptor_fields() {
        let d = SubmitDescriptorBuilder::new(RunKey::gamma_background(99)).build().unwrap();
        let text = d.render();
        assert!(text.starts_with("universe   = vanilla\n"));
        assert!(text.contains(&format!("executable = {DEFAULT_EXECUTABLE}\n")));
        assert!(text.contains("arguments  = gamma_bkg_99.mac\n"));
        assert!(text.contains("+CygnoUser = \"$ENV(USERNAME)\"\n"));
        assert!(text.contains("+OWNER = \"condor\"\n"));
        assert!(text.ends_with("queue\n"));
    }

    #[test]
    fn test_builder_overrides() {
        let d = SubmitDescriptorBuilder::new(RunKey::ion("Fe55", "gas", 3)).executable("/opt/run.sh")
                                                                           .transfer_inputs(["/a", "/b"])
                                                                           .attribute("OWNER", "\"me\"")
                                                                           .build()
                                                                           .unwrap();
        let text = d.render();
        assert!(text.contains("executable = /opt/run.sh\n"));
        assert!(text.contains("transfer_input_files = /a, /b\n"));
        assert!(text.contains("+OWNER = \"me\"\n"));
        assert_eq!(text.matches("+OWNER").count(), 1);
    }

    #[test]
    fn test_build_rejects_empty_executable() {
        let r = SubmitDescriptorBuilder::new(RunKey::gamma_background(1)).executable(" ").build();
        assert!(matches!(r, Err(CoreError::Validation(_))));
    }
}
