//! Espectro de energía del fondo gamma.
//!
//! Recurso constante (`data/gamma_bkg_spectrum.dat`) embebido en el binario.
//! Los puntos se guardan como texto para copiarlos tal cual en cada macro;
//! al cargar se comprueba que sean numéricos y que la energía sea creciente.
use log::warn;
use once_cell::sync::Lazy;

use crate::CoreError;

const BUNDLED_SPECTRUM: &str = include_str!("../../data/gamma_bkg_spectrum.dat");

static BUNDLED: Lazy<Result<GammaSpectrum, String>> = Lazy::new(|| {
    warn!("spectrum:bundled placeholder shape, not a measured spectrum; pass --spectrum to use one");
    GammaSpectrum::parse(BUNDLED_SPECTRUM).map_err(|e| e.to_string())
});

#[derive(Debug, Clone, PartialEq)]
pub struct GammaSpectrum {
    points: Vec<(String, String)>,
}

impl GammaSpectrum {
    /// Espectro incorporado en el crate.
    pub fn bundled() -> Result<&'static GammaSpectrum, CoreError> {
        BUNDLED.as_ref().map_err(|e| CoreError::Resource(e.clone()))
    }

    /// Parsea líneas `energía tasa`; `#` inicia comentario.
    pub fn parse(text: &str) -> Result<Self, CoreError> {
        let mut points = Vec::new();
        let mut last_energy = f64::NEG_INFINITY;
        for (n, raw) in text.lines().enumerate() {
            let line = raw.split('#').next().unwrap_or("").trim();
            if line.is_empty() {
                continue;
            }
            let fields: Vec<&str> = line.split_whitespace().collect();
            let [energy, rate] = fields.as_slice() else {
                return Err(CoreError::Resource(format!("spectrum line {}: expected 2 columns", n + 1)));
            };
            let e: f64 = energy.parse()
                               .map_err(|_| CoreError::Resource(format!("spectrum line {}: bad energy", n + 1)))?;
            let r: f64 = rate.parse()
                             .map_err(|_| CoreError::Resource(format!("spectrum line {}: bad rate", n + 1)))?;
            if e <= last_energy || r < 0.0 {
                return Err(CoreError::Resource(format!("spectrum line {}: energy must increase and rate be >= 0",
                                                       n + 1)));
            }
            last_energy = e;
            points.push((energy.to_string(), rate.to_string()));
        }
        if points.len() < 2 {
            return Err(CoreError::Resource("spectrum needs at least two points".into()));
        }
        Ok(Self { points })
    }

    /// Puntos (energía MeV, tasa diferencial) tal como aparecen en el recurso.
    pub fn points(&self) -> &[(String, String)] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
