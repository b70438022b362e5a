pub use run::run;

pub mod args;
mod run;

pub const NAME: &str = "rgroups";
pub const ABOUT: &str = "Mapped/unmapped read counts per read group, with header metadata";
