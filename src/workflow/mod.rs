pub mod driver;

pub use driver::{RunDriver, RunKind, RunPlan, RunSummary};
