use clap::Arg;

use crate::cli::shared::args::core;

pub fn args<'a>() -> Vec<Arg<'a>> {
    core::args()
}
