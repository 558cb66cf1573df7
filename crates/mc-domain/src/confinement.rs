use serde::{Deserialize, Serialize};

use crate::DomainError;

/// Región de confinamiento de la fuente: semiejes (m) y nombre del volumen.
///
/// El nombre del volumen no se valida contra la geometría de la simulación.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Confinement {
    half_x: f64,
    half_y: f64,
    half_z: f64,
    volume: String,
}

impl Confinement {
    pub fn new(half_x: f64, half_y: f64, half_z: f64, volume: &str) -> Result<Self, DomainError> {
        for (axis, v) in [("x", half_x), ("y", half_y), ("z", half_z)] {
            if !v.is_finite() || v <= 0.0 {
                return Err(DomainError::ValidationError(format!("half{axis} must be a positive length, got {v}")));
            }
        }
        let volume = volume.trim();
        if volume.is_empty() || volume.contains(char::is_whitespace) {
            return Err(DomainError::ValidationError(format!("invalid confinement volume name '{volume}'")));
        }
        Ok(Self { half_x,
                  half_y,
                  half_z,
                  volume: volume.to_string() })
    }

    /// Construye desde el string de posición de la CLI: "X Y Z".
    pub fn from_position(position: &str, volume: &str) -> Result<Self, DomainError> {
        let parts: Vec<&str> = position.split_whitespace().collect();
        if parts.len() != 3 {
            return Err(DomainError::ValidationError(format!("position must have three half-extents, got '{position}'")));
        }
        let mut values = [0.0f64; 3];
        for (slot, raw) in values.iter_mut().zip(&parts) {
            *slot = raw.parse()
                       .map_err(|_| DomainError::ValidationError(format!("invalid half-extent '{raw}'")))?;
        }
        Self::new(values[0], values[1], values[2], volume)
    }

    pub fn half_x(&self) -> f64 { self.half_x }
    pub fn half_y(&self) -> f64 { self.half_y }
    pub fn half_z(&self) -> f64 { self.half_z }
    pub fn volume(&self) -> &str { &self.volume }
}
