//! Resolución símbolo → (Z, A, energía de excitación).
//!
//! El resolver combina dos fuentes:
//! - un `DecayDataSource` externo que entrega Z, A y la etiqueta de estado;
//! - la tabla estática de metaestables (`MetastableTable`).
//!
//! Resultados posibles:
//! - estado fundamental → `Excitation::Ground`;
//! - metaestable tabulado → `Excitation::Tabulated(keV)`;
//! - metaestable sin entrada → `Excitation::MissingOverride` + `warn!`;
//! - símbolo irresoluble → `DomainError::UnknownIsotope` + `warn!`.
use decayengine::{Nuclide, NuclideEngine};
use log::{debug, warn};

use crate::isotope::{EnergyState, Excitation, Isotope};
use crate::metastable::{MetastableTable, METASTABLE_ENERGIES};
use crate::DomainError;

/// Fuente externa de datos de decaimiento.
pub trait DecayDataSource {
    fn lookup(&self, symbol: &str) -> Result<Nuclide, DomainError>;
}

impl DecayDataSource for NuclideEngine {
    fn lookup(&self, symbol: &str) -> Result<Nuclide, DomainError> {
        self.get_nuclide(symbol)
            .map_err(|e| DomainError::UnknownIsotope { symbol: symbol.to_string(),
                                                       reason: e.to_string() })
    }
}

pub struct IsotopeResolver<S: DecayDataSource = NuclideEngine> {
    source: S,
    table: MetastableTable,
}

impl IsotopeResolver<NuclideEngine> {
    /// Resolver con el engine nativo y la tabla incorporada.
    pub fn new() -> Result<Self, DomainError> {
        Ok(Self::with_source(NuclideEngine::init()?))
    }
}

impl<S: DecayDataSource> IsotopeResolver<S> {
    pub fn with_source(source: S) -> Self {
        Self { source,
               table: METASTABLE_ENERGIES.clone() }
    }

    pub fn with_table(mut self, table: MetastableTable) -> Self {
        self.table = table;
        self
    }

    pub fn resolve(&self, symbol: &str) -> Result<Isotope, DomainError> {
        let nuclide = self.source.lookup(symbol).inspect_err(|e| {
                                                       warn!("isotope:unresolved symbol={symbol} err={e}");
                                                   })?;
        if nuclide.is_ground() {
            debug!("isotope:ground symbol={symbol} z={} a={}", nuclide.z, nuclide.a);
            return Ok(Isotope::new(symbol, nuclide.z, nuclide.a, EnergyState::Ground, Excitation::Ground));
        }

        let excitation = match self.table.lookup(&nuclide.compact(), &nuclide.state) {
            Some(kev) => Excitation::Tabulated(kev),
            None => {
                warn!("isotope:metastable energy unknown symbol={symbol} state={} -> using 0 keV",
                      nuclide.state);
                Excitation::MissingOverride
            }
        };
        debug!("isotope:metastable symbol={symbol} z={} a={} excitation={:?}",
               nuclide.z, nuclide.a, excitation);
        Ok(Isotope::new(symbol,
                        nuclide.z,
                        nuclide.a,
                        EnergyState::Metastable(nuclide.state.clone()),
                        excitation))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedSource(Nuclide);
    impl DecayDataSource for FixedSource {
        fn lookup(&self, _symbol: &str) -> Result<Nuclide, DomainError> {
            Ok(self.0.clone())
        }
    }

    #[test]
    fn test_resolve_with_custom_table() {
        let source = FixedSource(Nuclide { symbol: "Sn-119m".into(),
                                           z: 50,
                                           a: 119,
                                           state: "m".into() });
        let mut table = MetastableTable::default();
        table.insert("Sn119m", "m", 89.531);
        let resolver = IsotopeResolver::with_source(source).with_table(table);
        let iso = resolver.resolve("Sn119m").unwrap();
        assert_eq!(iso.excitation(), Excitation::Tabulated(89.531));
    }

    #[test]
    fn test_unresolved_symbol_is_error() {
        let resolver = IsotopeResolver::new().unwrap();
        let err = resolver.resolve("Nope").unwrap_err();
        assert!(matches!(err, DomainError::UnknownIsotope { ref symbol, .. } if symbol == "Nope"));
    }
}
