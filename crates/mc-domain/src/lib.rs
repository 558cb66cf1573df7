// mc-domain library entry point
pub mod confinement;
pub mod error;
pub mod isotope;
pub mod metastable;
pub mod resolver;
pub mod seeds;
pub use confinement::Confinement;
pub use error::DomainError;
pub use isotope::{EnergyState, Excitation, Isotope};
pub use metastable::{MetastableTable, METASTABLE_ENERGIES};
pub use resolver::{DecayDataSource, IsotopeResolver};
pub use seeds::{generate_seeds, SeedPair, SEED_MODULUS};
