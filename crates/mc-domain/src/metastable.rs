//! Tabla de energías de excitación de estados metaestables conocidos.
//!
//! Se carga una sola vez (`METASTABLE_ENERGIES`) y es inmutable. Un fallo de
//! búsqueda devuelve `None`; el resolver decide el fallback y lo deja
//! registrado.
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Entradas (isótopo en forma compacta, estado, energía en keV).
const BUILTIN: &[(&str, &str, f64)] = &[("Ag108m", "m", 109.466),
                                        ("Ag110m", "m", 117.59),
                                        ("Kr83m", "m", 41.5575),
                                        ("Tc99m", "m", 142.6836),
                                        ("In113m", "m", 391.698),
                                        ("Ba137m", "m", 661.659),
                                        ("Pa234m", "m", 73.92),
                                        ("Am242m", "m", 48.60)];

pub static METASTABLE_ENERGIES: Lazy<MetastableTable> = Lazy::new(MetastableTable::builtin);

#[derive(Debug, Clone, Default)]
pub struct MetastableTable {
    entries: HashMap<(String, String), f64>,
}

impl MetastableTable {
    pub fn builtin() -> Self {
        let mut table = Self::default();
        for (isotope, state, kev) in BUILTIN {
            table.insert(isotope, state, *kev);
        }
        table
    }

    pub fn insert(&mut self, isotope: &str, state: &str, kev: f64) {
        self.entries.insert((isotope.to_string(), state.to_string()), kev);
    }

    pub fn lookup(&self, isotope: &str, state: &str) -> Option<f64> {
        self.entries.get(&(isotope.to_string(), state.to_string())).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entradas ordenadas por isótopo (para listados deterministas).
    pub fn entries(&self) -> Vec<(&str, &str, f64)> {
        let mut v: Vec<_> = self.entries
                                .iter()
                                .map(|((iso, st), kev)| (iso.as_str(), st.as_str(), *kev))
                                .collect();
        v.sort_by(|a, b| a.0.cmp(b.0).then(a.1.cmp(b.1)));
        v
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_contains_ag108m() {
        assert_eq!(METASTABLE_ENERGIES.lookup("Ag108m", "m"), Some(109.466));
        assert_eq!(METASTABLE_ENERGIES.len(), BUILTIN.len());
    }

    #[test]
    fn test_lookup_miss_is_none() {
        assert_eq!(METASTABLE_ENERGIES.lookup("Ag108m", "n"), None);
        assert_eq!(METASTABLE_ENERGIES.lookup("Cs137", "m"), None);
    }

    #[test]
    fn test_entries_sorted() {
        let entries = METASTABLE_ENERGIES.entries();
        let names: Vec<&str> = entries.iter().map(|e| e.0).collect();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
    }
}
