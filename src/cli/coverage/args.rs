use clap::{Arg, ArgSettings};

use crate::cli::shared::args::{core, defaults};
use crate::cli::shared::validate;

pub const AT_MAPQ: &str = "at-mapq";

pub const SECTION_NAME: &str = "Coverage";

pub fn args<'a>() -> Vec<Arg<'a>> {
    let args = vec![Arg::new(AT_MAPQ)
        .long(AT_MAPQ)
        .settings(&defaults())
        .multiple(true)
        .validator(validate::numeric(0u8, 254u8))
        .long_about("Report the depth distribution counting only reads with mapping quality >= the threshold. May be specified several times; the input is still streamed only once. A threshold of 0 reproduces the unfiltered distribution.")];
    core::args()
        .into_iter()
        .chain(args.into_iter().map(|x| x.help_heading(Some(SECTION_NAME))))
        .collect()
}
