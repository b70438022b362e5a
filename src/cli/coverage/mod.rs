pub use run::run;

pub mod args;
mod run;

pub const NAME: &str = "coverage";
pub const ABOUT: &str = "Pileup depth distribution, optionally restricted to reads above mapping quality thresholds";
