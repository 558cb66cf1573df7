//! Generación de semillas para `/random/setSeeds`.
//!
//! seed1 = ms % 4294967295, seed2 = (ms / 2) % 4294967295 sobre el mismo
//! instante. Tras leer el reloj se duerme 1 ms para que dos llamadas seguidas
//! nunca observen el mismo milisegundo. No es criptográfico.
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::thread;
use std::time::Duration;

/// Máximo de un entero sin signo de 32 bits, usado como módulo.
pub const SEED_MODULUS: i64 = 4_294_967_295;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedPair {
    pub seed1: u32,
    pub seed2: u32,
}

impl SeedPair {
    /// Derivación pura a partir de un timestamp en milisegundos.
    pub fn from_millis(ms: i64) -> Self {
        let seed1 = ms.rem_euclid(SEED_MODULUS) as u32;
        let seed2 = (ms.div_euclid(2)).rem_euclid(SEED_MODULUS) as u32;
        Self { seed1, seed2 }
    }
}

pub fn generate_seeds() -> SeedPair {
    let now_ms = Utc::now().timestamp_millis();
    thread::sleep(Duration::from_millis(1));
    SeedPair::from_millis(now_ms)
}
