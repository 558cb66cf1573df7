use serde::{Deserialize, Serialize};
use std::fmt;

/// Estado energético del núcleo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnergyState {
    Ground,
    /// Etiqueta del estado metaestable ("m", "n").
    Metastable(String),
}

/// Origen de la energía de excitación usada en la macro.
///
/// `MissingOverride` se renderiza como 0 keV: es el fallback conocido para
/// metaestables sin entrada en la tabla y queda visible para quien lo use.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Excitation {
    Ground,
    Tabulated(f64),
    MissingOverride,
}

impl Excitation {
    /// Energía en keV que se escribe en `/gps/ion`.
    pub fn kev(&self) -> f64 {
        match self {
            Excitation::Tabulated(e) => *e,
            Excitation::Ground | Excitation::MissingOverride => 0.0,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Excitation::MissingOverride)
    }
}

/// Descriptor de isótopo resuelto. No se persiste.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Isotope {
    symbol: String,
    z: u32,
    a: u32,
    state: EnergyState,
    excitation: Excitation,
}

impl Isotope {
    pub fn new(symbol: &str, z: u32, a: u32, state: EnergyState, excitation: Excitation) -> Self {
        Self { symbol: symbol.to_string(),
               z,
               a,
               state,
               excitation }
    }
    /// Símbolo tal como lo indicó el operador (forma parte del nombre de los
    /// artifacts).
    pub fn symbol(&self) -> &str { &self.symbol }
    pub fn z(&self) -> u32 { self.z }
    pub fn a(&self) -> u32 { self.a }
    pub fn state(&self) -> &EnergyState { &self.state }
    pub fn excitation(&self) -> Excitation { self.excitation }
    pub fn excitation_kev(&self) -> f64 { self.excitation.kev() }
    pub fn is_ground(&self) -> bool { self.state == EnergyState::Ground }
}

impl fmt::Display for Isotope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}: Z={}, A={}, E={} keV>", self.symbol, self.z, self.a, self.excitation_kev())
    }
}
