//! Parser nativo de símbolos de nucleidos.
//!
//! Acepta las mismas formas que la librería `radioactivedecay`:
//! `U238`, `U-238`, `238U`, `Ag108m`, `Ag-108m`, `108mAg`. El símbolo del
//! elemento no distingue mayúsculas (`ag108m` == `Ag108m`).
//!
//! Sólo se valida la sintaxis, el elemento y que `A >= Z`; no se comprueba
//! que el nucleido exista en un dataset de decaimientos.
use serde::{Deserialize, Serialize};

use crate::EngineError;

/// Tabla periódica indexada por `Z - 1`.
pub const ELEMENTS: [&str; 118] = [
    "H", "He", "Li", "Be", "B", "C", "N", "O", "F", "Ne", "Na", "Mg", "Al", "Si", "P", "S", "Cl", "Ar", "K", "Ca",
    "Sc", "Ti", "V", "Cr", "Mn", "Fe", "Co", "Ni", "Cu", "Zn", "Ga", "Ge", "As", "Se", "Br", "Kr", "Rb", "Sr", "Y",
    "Zr", "Nb", "Mo", "Tc", "Ru", "Rh", "Pd", "Ag", "Cd", "In", "Sn", "Sb", "Te", "I", "Xe", "Cs", "Ba", "La", "Ce",
    "Pr", "Nd", "Pm", "Sm", "Eu", "Gd", "Tb", "Dy", "Ho", "Er", "Tm", "Yb", "Lu", "Hf", "Ta", "W", "Re", "Os", "Ir",
    "Pt", "Au", "Hg", "Tl", "Pb", "Bi", "Po", "At", "Rn", "Fr", "Ra", "Ac", "Th", "Pa", "U", "Np", "Pu", "Am", "Cm",
    "Bk", "Cf", "Es", "Fm", "Md", "No", "Lr", "Rf", "Db", "Sg", "Bh", "Hs", "Mt", "Ds", "Rg", "Cn", "Nh", "Fl", "Mc",
    "Lv", "Ts", "Og",
];

/// Número másico máximo aceptado por el parser.
const MAX_MASS_NUMBER: u32 = 300;

/// Estados energéticos aceptados tras el número másico.
const STATES: [&str; 2] = ["m", "n"];

/// Nucleido resuelto. `state` es "" para el estado fundamental.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Nuclide {
    pub symbol: String,
    pub z: u32,
    pub a: u32,
    pub state: String,
}

impl Nuclide {
    /// Forma compacta `Ag108m`, usada como clave de tablas.
    pub fn compact(&self) -> String {
        let element = self.z
                          .checked_sub(1)
                          .and_then(|i| ELEMENTS.get(i as usize))
                          .copied()
                          .unwrap_or("?");
        format!("{}{}{}", element, self.a, self.state)
    }

    pub fn is_ground(&self) -> bool {
        self.state.is_empty()
    }
}

/// Devuelve Z para un símbolo de elemento (sin distinguir mayúsculas).
pub fn atomic_number(element: &str) -> Option<u32> {
    ELEMENTS.iter()
            .position(|e| e.eq_ignore_ascii_case(element))
            .map(|i| i as u32 + 1)
}

/// Parsea un símbolo de nucleido.
pub fn parse_nuclide(input: &str) -> Result<Nuclide, EngineError> {
    let s = input.trim();
    if s.is_empty() {
        return Err(EngineError::InvalidSymbol(input.to_string()));
    }
    let (element, mass, state) = if s.starts_with(|c: char| c.is_ascii_digit()) {
        split_mass_first(s)?
    } else {
        split_element_first(s)?
    };

    let z = atomic_number(element).ok_or_else(|| EngineError::UnknownElement(element.to_string()))?;
    let a: u32 = mass.parse().map_err(|_| EngineError::InvalidMass(input.to_string()))?;
    if a < z || a > MAX_MASS_NUMBER {
        return Err(EngineError::InvalidMass(input.to_string()));
    }
    let state = state.to_ascii_lowercase();
    if !state.is_empty() && !STATES.contains(&state.as_str()) {
        return Err(EngineError::InvalidSymbol(input.to_string()));
    }

    let element = ELEMENTS[(z - 1) as usize];
    Ok(Nuclide { symbol: format!("{element}-{a}{state}"),
                 z,
                 a,
                 state })
}

// `Ag-108m`, `Ag108m`, `U238`
fn split_element_first(s: &str) -> Result<(&str, &str, &str), EngineError> {
    let elem_end = s.find(|c: char| !c.is_ascii_alphabetic())
                    .ok_or_else(|| EngineError::InvalidSymbol(s.to_string()))?;
    let element = &s[..elem_end];
    let rest = s[elem_end..].strip_prefix('-').unwrap_or(&s[elem_end..]);
    let mass_end = rest.find(|c: char| !c.is_ascii_digit()).unwrap_or(rest.len());
    if mass_end == 0 {
        return Err(EngineError::InvalidSymbol(s.to_string()));
    }
    Ok((element, &rest[..mass_end], &rest[mass_end..]))
}

// `108mAg`, `238U`
fn split_mass_first(s: &str) -> Result<(&str, &str, &str), EngineError> {
    let mass_end = s.find(|c: char| !c.is_ascii_digit())
                    .ok_or_else(|| EngineError::InvalidSymbol(s.to_string()))?;
    let mass = &s[..mass_end];
    let rest = &s[mass_end..];
    // Un estado va en minúscula y precede a un elemento en mayúscula.
    let mut chars = rest.chars();
    let (state, element) = match (chars.next(), chars.next()) {
        (Some(st), Some(next)) if STATES.contains(&st.to_string().as_str()) && next.is_ascii_uppercase() => {
            (&rest[..1], &rest[1..])
        }
        _ => ("", rest),
    };
    if element.is_empty() || !element.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(EngineError::InvalidSymbol(s.to_string()));
    }
    Ok((element, mass, state))
}
