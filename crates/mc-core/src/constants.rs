//! Constantes del despliegue CYGNO.
//!
//! Forman parte del contenido de cada artifact; cambiarlas altera las macros
//! generadas a partir de ese momento.

/// Punto de referencia donde se centra la fuente (coordenadas GEANT4).
pub const SOURCE_CENTRE: &str = "0. 97. 0. cm";

/// Radio de la esfera de la fuente de fondo gamma (m).
pub const GAMMA_SPHERE_RADIUS_M: f64 = 1.5;

/// Frecuencia de reporte de progreso de la simulación.
pub const REPORTING_FREQUENCY: u32 = 100_000;

/// Prefijo de los artifacts de fondo gamma.
pub const GAMMA_BKG_PREFIX: &str = "gamma_bkg";

/// Marca escrita en el registro cuando el submit falla.
pub const FAILED_SUBMISSION_MARKER: &str = "Failed to submit job";

/// Atributos propios de HTCondor añadidos a cada descriptor.
pub const CONDOR_ATTRIBUTES: &[(&str, &str)] = &[("CygnoUser", "\"$ENV(USERNAME)\""), ("OWNER", "\"condor\"")];

/// Ejecutable remoto por defecto.
pub const DEFAULT_EXECUTABLE: &str = "/jupyter-workspace/private/CYGNO_04/CYGNO-MC-build/run_simulation.sh";

/// Entradas transferidas por defecto al nodo de ejecución.
pub const DEFAULT_TRANSFER_INPUTS: &[&str] = &["/jupyter-workspace/private/CYGNO_04/CYGNO-MC-build/CYGNO",
                                               "/jupyter-workspace/private/CYGNO_04/CYGNO-MC-build/macros",
                                               "/jupyter-workspace/private/CYGNO_04/geometry",
                                               "/usr/local/lib/libcadmesh.so"];

/// Rango de núcleos (A y Z) a seguir en la cadena de decaimiento.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NucleusLimits {
    pub a_min: u32,
    pub a_max: u32,
    pub z_min: u32,
    pub z_max: u32,
}

/// Cadena de U238 cortada en U234 (equilibrio secular roto).
pub const U238_NUCLEUS_LIMITS: NucleusLimits = NucleusLimits { a_min: 234,
                                                               a_max: 238,
                                                               z_min: 90,
                                                               z_max: 92 };

/// Límites de cadena para un isótopo. Sólo U238 (estado fundamental) los
/// requiere.
pub fn nucleus_limits_for(z: u32, a: u32, ground: bool) -> Option<NucleusLimits> {
    match (z, a, ground) {
        (92, 238, true) => Some(U238_NUCLEUS_LIMITS),
        _ => None,
    }
}
