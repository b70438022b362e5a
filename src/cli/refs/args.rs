use clap::{Arg, ArgSettings};

use crate::cli::shared::args::{core, defaults};
use crate::cli::shared::validate;

pub const NMOST: &str = "n-most";
pub const MAX_RPKM: &str = "max-rpkm";

pub const SECTION_NAME: &str = "Reference statistics";

pub fn args<'a>() -> Vec<Arg<'a>> {
    let args = vec![
        Arg::new(NMOST)
            .short('n')
            .long(NMOST)
            .settings(&defaults())
            .validator(validate::numeric(1usize, usize::MAX))
            .default_value("10")
            .long_about("Report the N references with the highest RPKM. Ties are resolved by the header order."),
        Arg::new(MAX_RPKM)
            .long(MAX_RPKM)
            .settings(&defaults())
            .validator(validate::numeric(0f64, f64::MAX))
            .long_about("Ceiling for the RPKM histogram axis. Useful when the expected dynamic range is known ahead of time and the axis should not shrink to the observed maximum."),
    ];
    core::args()
        .into_iter()
        .chain(args.into_iter().map(|x| x.help_heading(Some(SECTION_NAME))))
        .collect()
}
