//! Macros de control GEANT4.
//!
//! `MacroBuilder` recibe campos explícitos, `build()` los valida y
//! `MacroSpec::render()` es la única rutina que produce el texto. El orden de
//! directivas que consume la simulación es fijo:
//!
//! 1. (opcional) límites de cadena de decaimiento, antes de inicializar
//! 2. `/run/initialize`
//! 3. definición de la fuente (ion confinado o gamma en superficie esférica)
//! 4. flags de guardado y verbosidad, frecuencia de reporte
//! 5. `/CYGNO/outfile`
//! 6. `/random/setSeeds`
//! 7. `/run/beamOn`
use log::debug;
use mc_domain::{Confinement, Isotope, SeedPair};
use std::path::{Path, PathBuf};

use crate::artifact::spectrum::GammaSpectrum;
use crate::artifact::write_artifact;
use crate::constants::{nucleus_limits_for, NucleusLimits, GAMMA_SPHERE_RADIUS_M, REPORTING_FREQUENCY, SOURCE_CENTRE};
use crate::naming::RunKey;
use crate::CoreError;

/// Descripción de la fuente de partículas.
#[derive(Debug, Clone, PartialEq)]
pub enum SourceSpec {
    Ion {
        z: u32,
        a: u32,
        excitation_kev: f64,
        confinement: Confinement,
        nucleus_limits: Option<NucleusLimits>,
    },
    GammaBackground { radius_m: f64, spectrum: GammaSpectrum },
}

/// Macro validada, lista para renderizar.
#[derive(Debug, Clone, PartialEq)]
pub struct MacroSpec {
    key: RunKey,
    source: SourceSpec,
    seeds: SeedPair,
    num_events: u64,
}

#[derive(Debug, Clone)]
enum PendingSource {
    Ion { isotope: Isotope, confinement: Confinement },
    Gamma { spectrum: Option<GammaSpectrum> },
}

#[derive(Debug, Clone)]
pub struct MacroBuilder {
    timestamp: i64,
    source: PendingSource,
    seeds: Option<SeedPair>,
    num_events: Option<u64>,
}

impl MacroBuilder {
    /// Variante ion radiactivo confinado en un volumen.
    pub fn ion(isotope: &Isotope, confinement: &Confinement, timestamp: i64) -> Self {
        Self { timestamp,
               source: PendingSource::Ion { isotope: isotope.clone(),
                                            confinement: confinement.clone() },
               seeds: None,
               num_events: None }
    }

    /// Variante fondo gamma isotrópico (espectro incorporado).
    pub fn gamma_background(timestamp: i64) -> Self {
        Self { timestamp,
               source: PendingSource::Gamma { spectrum: None },
               seeds: None,
               num_events: None }
    }

    /// Variante fondo gamma con un espectro propio.
    pub fn gamma_background_with(spectrum: GammaSpectrum, timestamp: i64) -> Self {
        Self { timestamp,
               source: PendingSource::Gamma { spectrum: Some(spectrum) },
               seeds: None,
               num_events: None }
    }

    pub fn seeds(mut self, seeds: SeedPair) -> Self {
        self.seeds = Some(seeds);
        self
    }

    pub fn num_events(mut self, num_events: u64) -> Self {
        self.num_events = Some(num_events);
        self
    }

    pub fn build(self) -> Result<MacroSpec, CoreError> {
        let seeds = self.seeds
                        .ok_or_else(|| CoreError::Validation("seeds not set".into()))?;
        let num_events = match self.num_events {
            Some(n) if n > 0 => n,
            Some(_) => return Err(CoreError::Validation("num_events must be > 0".into())),
            None => return Err(CoreError::Validation("num_events not set".into())),
        };
        let (key, source) = match self.source {
            PendingSource::Ion { isotope, confinement } => {
                let key = RunKey::ion(isotope.symbol(), confinement.volume(), self.timestamp);
                let excitation_kev = isotope.excitation_kev();
                if !excitation_kev.is_finite() || excitation_kev < 0.0 {
                    return Err(CoreError::Validation(format!("invalid excitation energy {excitation_kev} keV")));
                }
                let source = SourceSpec::Ion { z: isotope.z(),
                                               a: isotope.a(),
                                               excitation_kev,
                                               nucleus_limits: nucleus_limits_for(isotope.z(),
                                                                                  isotope.a(),
                                                                                  isotope.is_ground()),
                                               confinement };
                (key, source)
            }
            PendingSource::Gamma { spectrum } => {
                let spectrum = match spectrum {
                    Some(s) => s,
                    None => GammaSpectrum::bundled()?.clone(),
                };
                (RunKey::gamma_background(self.timestamp),
                 SourceSpec::GammaBackground { radius_m: GAMMA_SPHERE_RADIUS_M,
                                               spectrum })
            }
        };
        key.validate()?;
        Ok(MacroSpec { key,
                       source,
                       seeds,
                       num_events })
    }
}

impl MacroSpec {
    pub fn key(&self) -> &RunKey { &self.key }
    pub fn seeds(&self) -> SeedPair { self.seeds }
    pub fn num_events(&self) -> u64 { self.num_events }
    pub fn file_name(&self) -> String { self.key.macro_file() }

    pub fn render(&self) -> String {
        let mut lines: Vec<String> = Vec::new();
        match &self.source {
            SourceSpec::Ion { z,
                              a,
                              excitation_kev,
                              confinement,
                              nucleus_limits, } => {
                lines.push("# GENERATION OF RADIOACTIVE PARTICLES".into());
                lines.push(format!("# run {}", self.key));
                lines.push(String::new());
                if let Some(l) = nucleus_limits {
                    lines.push("# restrict the decay chain".into());
                    lines.push(format!("/grdm/nucleusLimits {} {} {} {}", l.a_min, l.a_max, l.z_min, l.z_max));
                }
                lines.push("/run/initialize".into());
                lines.push(String::new());
                lines.push("# define particle or ion (Z A Q E[keV])".into());
                lines.push("/gps/particle ion".into());
                lines.push(format!("/gps/ion {z} {a} 0 {excitation_kev}"));
                lines.push(String::new());
                lines.push("# define energy (set 0 for radioactive decaying nuclei)".into());
                lines.push("/gps/energy 0. keV".into());
                lines.push("/gps/pos/shape Para".into());
                lines.push(format!("/gps/pos/centre {SOURCE_CENTRE}"));
                lines.push(format!("/gps/pos/halfx {} m", confinement.half_x()));
                lines.push(format!("/gps/pos/halfy {} m", confinement.half_y()));
                lines.push(format!("/gps/pos/halfz {} m", confinement.half_z()));
                lines.push("#".into());
                lines.push("/gps/pos/type Volume".into());
                lines.push(format!("/gps/pos/confine {}", confinement.volume()));
            }
            SourceSpec::GammaBackground { radius_m, spectrum } => {
                lines.push("# GENERATION OF ISOTROPIC GAMMA BACKGROUND".into());
                lines.push(format!("# run {}", self.key));
                lines.push(String::new());
                lines.push("/run/initialize".into());
                lines.push(String::new());
                lines.push("/gps/particle gamma".into());
                lines.push("/gps/pos/type Surface".into());
                lines.push("/gps/pos/shape Sphere".into());
                lines.push(format!("/gps/pos/centre {SOURCE_CENTRE}"));
                lines.push(format!("/gps/pos/radius {radius_m} m"));
                lines.push("/gps/ang/type iso".into());
                lines.push(String::new());
                lines.push("# energy spectrum (MeV, differential rate)".into());
                lines.push("/gps/ene/type User".into());
                lines.push("/gps/hist/type energy".into());
                for (energy, rate) in spectrum.points() {
                    lines.push(format!("/gps/hist/point {energy} {rate}"));
                }
            }
        }
        lines.push("#".into());
        lines.push("# Save only events that have hits in the sensitive gas".into());
        lines.push("/CYGNO/cutoutfile 1".into());
        lines.push("/CYGNO/save_hits_branches 0".into());
        lines.push("/CYGNO/registeron 0".into());
        lines.push("#".into());
        lines.push("# change these for debug".into());
        lines.push("/run/verbose 0".into());
        lines.push("/event/verbose 0".into());
        lines.push("/tracking/verbose 0".into());
        lines.push(format!("/CYGNO/reportingfrequency {REPORTING_FREQUENCY}"));
        lines.push("# Output file name".into());
        lines.push(format!("/CYGNO/outfile {}", self.key.output_file()));
        lines.push(format!("/random/setSeeds {} {}", self.seeds.seed1, self.seeds.seed2));
        lines.push(String::new());
        lines.push("# define number of events to be generated".into());
        lines.push(format!("/run/beamOn {}", self.num_events));
        let mut text = lines.join("\n");
        text.push('\n');
        text
    }

    /// Escribe la macro en `folder` y devuelve su ruta.
    pub fn write(&self, folder: &Path) -> Result<PathBuf, CoreError> {
        let path = write_artifact(folder, &self.file_name(), &self.render())?;
        debug!("macro:written key={} events={}", self.key, self.num_events);
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mc_domain::{EnergyState, Excitation};

    fn cs137() -> Isotope {
        Isotope::new("Cs137", 55, 137, EnergyState::Ground, Excitation::Ground)
    }

    #[test]
    fn test_build_requires_seeds_and_events() {
        let conf = Confinement::new(1.0, 1.0, 1.0, "vessel").unwrap();
        let no_seeds = MacroBuilder::ion(&cs137(), &conf, 1).num_events(10).build();
        assert!(matches!(no_seeds, Err(CoreError::Validation(_))));
        let zero = MacroBuilder::ion(&cs137(), &conf, 1).seeds(SeedPair { seed1: 1, seed2: 2 })
                                                      .num_events(0)
                                                      .build();
        assert!(matches!(zero, Err(CoreError::Validation(_))));
    }

    #[test]
    fn test_ion_directive_order() {
        let conf = Confinement::new(1.0, 2.0, 3.0, "vessel").unwrap();
        let spec = MacroBuilder::ion(&cs137(), &conf, 1_700_000_000).seeds(SeedPair { seed1: 11, seed2: 5 })
                                                                    .num_events(1000)
                                                                    .build()
                                                                    .unwrap();
        let text = spec.render();
        let pos = |needle: &str| text.find(needle).unwrap_or_else(|| panic!("missing {needle}"));
        assert!(pos("/run/initialize") < pos("/gps/ion 55 137 0 0"));
        assert!(pos("/gps/pos/confine vessel") < pos("/run/verbose 0"));
        assert!(pos("/run/verbose 0") < pos("/CYGNO/outfile Cs137_vessel_1700000000.root"));
        assert!(pos("/CYGNO/outfile") < pos("/random/setSeeds 11 5"));
        assert!(pos("/random/setSeeds") < pos("/run/beamOn 1000"));
        assert!(text.contains("/gps/pos/halfy 2 m"));
        assert!(text.ends_with("/run/beamOn 1000\n"));
    }

    #[test]
    fn test_gamma_macro_copies_spectrum_verbatim() {
        let spec = MacroBuilder::gamma_background(7).seeds(SeedPair { seed1: 1, seed2: 2 })
                                                    .num_events(50)
                                                    .build()
                                                    .unwrap();
        assert_eq!(spec.file_name(), "gamma_bkg_7.mac");
        let text = spec.render();
        let bundled = GammaSpectrum::bundled().unwrap();
        let hist_lines = text.lines().filter(|l| l.starts_with("/gps/hist/point ")).count();
        assert_eq!(hist_lines, bundled.len());
        for (e, r) in bundled.points() {
            assert!(text.contains(&format!("/gps/hist/point {e} {r}\n")));
        }
        assert!(!text.contains("/gps/ion"));
        assert!(text.contains("/CYGNO/outfile gamma_bkg_7.root"));
    }

    #[test]
    fn test_gamma_macro_with_own_spectrum() {
        let spectrum = GammaSpectrum::parse("0.5 1.0\n1.5 0.25\n").unwrap();
        let spec = MacroBuilder::gamma_background_with(spectrum, 8).seeds(SeedPair { seed1: 1, seed2: 2 })
                                                                   .num_events(5)
                                                                   .build()
                                                                   .unwrap();
        let text = spec.render();
        let points: Vec<&str> = text.lines().filter(|l| l.starts_with("/gps/hist/point ")).collect();
        assert_eq!(points, vec!["/gps/hist/point 0.5 1.0", "/gps/hist/point 1.5 0.25"]);
    }
}
