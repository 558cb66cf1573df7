use pyo3::prelude::*;

use crate::nuclide::Nuclide;

/// Comprueba que `radioactivedecay` es importable.
pub fn init_python() -> PyResult<()> {
    Python::attach(|py| {
        py.import("radioactivedecay")?;
        Ok(())
    })
}

/// Resuelve el símbolo con `radioactivedecay.Nuclide`.
pub fn get_nuclide(symbol: &str) -> PyResult<Nuclide> {
    Python::attach(|py| {
        let rd = py.import("radioactivedecay")?;
        let nuclide = rd.getattr("Nuclide")?.call1((symbol,))?;
        Ok(Nuclide { symbol: nuclide.getattr("nuclide")?.extract()?,
                     z: nuclide.getattr("Z")?.extract()?,
                     a: nuclide.getattr("A")?.extract()?,
                     state: nuclide.getattr("state")?.extract()? })
    })
}
