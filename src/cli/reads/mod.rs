pub use run::run;

pub mod args;
mod run;

pub const NAME: &str = "reads";
pub const ABOUT: &str = "Per-read statistics: mapping quality distribution and flag bit counts";
