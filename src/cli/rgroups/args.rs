use clap::{Arg, ArgSettings};

use crate::cli::shared::args::{core, defaults};
use crate::cli::shared::validate;

pub const ABOVE_MAPQ: &str = "above-mapq";

pub const SECTION_NAME: &str = "Read groups";

pub fn args<'a>() -> Vec<Arg<'a>> {
    let args = vec![Arg::new(ABOVE_MAPQ)
        .long(ABOVE_MAPQ)
        .settings(&defaults())
        .validator(validate::numeric(0u8, 254u8))
        .long_about("Additionally count, per read group, the mapped reads with mapping quality strictly greater than the threshold. The extra column is present only when this option is supplied.")];
    core::args()
        .into_iter()
        .chain(args.into_iter().map(|x| x.help_heading(Some(SECTION_NAME))))
        .collect()
}
