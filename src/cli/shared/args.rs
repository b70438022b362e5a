use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use clap::{Arg, ArgMatches, ArgSettings};
use indicatif::ProgressBar;

use super::{parse, validate};
use crate::core::io::hts::HtsSource;

pub fn reqdefaults() -> Vec<ArgSettings> {
    vec![ArgSettings::Required, ArgSettings::TakesValue]
}

pub fn defaults() -> Vec<ArgSettings> {
    vec![ArgSettings::TakesValue]
}

pub mod core {
    use super::*;

    pub const INPUT: &str = "input";
    pub const SAVETO: &str = "saveto";
    pub const THREADS: &str = "threads";
    pub const BINS: &str = "bins";

    pub const SECTION_NAME: &str = "Core";

    pub fn args<'a>() -> Vec<Arg<'a>> {
        let args = vec![
            Arg::new(INPUT)
                .short('i')
                .long(INPUT)
                .settings(&reqdefaults())
                .multiple(true)
                .validator(validate::path)
                .long_about("Path to the indexed BAM file(s). May contain a space-separated list of files, in which case they are treated as technical replicates and pooled together."),
            Arg::new(SAVETO)
                .short('o')
                .long(SAVETO)
                .settings(&defaults())
                .validator(validate::writable)
                .default_value("/dev/stdout")
                .long_about("Path to the output file. By default, the report is printed to stdout."),
            Arg::new(BINS)
                .short('b')
                .long(BINS)
                .settings(&defaults())
                .validator(validate::numeric(1usize, 10_000usize))
                .default_value("20")
                .long_about("Number of equal-width buckets in the rendered histograms."),
            Arg::new(THREADS)
                .short('t')
                .long(THREADS)
                .settings(&defaults())
                .validator(validate::numeric(1usize, usize::MAX))
                .default_value("1")
                .long_about("Maximum number of threads to spawn at once."),
        ];
        args.into_iter().map(|x| x.help_heading(Some(SECTION_NAME))).collect()
    }
}

pub struct CoreArgs {
    pub bamfiles: Vec<PathBuf>,
    pub sources: Vec<HtsSource>,
    pub bins: usize,
    pub threads: usize,
    pub saveto: BufWriter<File>,
}

impl CoreArgs {
    pub fn new(args: &ArgMatches, factory: impl Fn() -> ProgressBar) -> Self {
        let bamfiles = parse::bamfiles(factory(), args);
        let sources = parse::sources(factory(), &bamfiles);
        Self {
            bamfiles,
            sources,
            bins: parse::bins(factory(), args),
            threads: parse::threads(factory(), args),
            saveto: parse::saveto(factory(), args),
        }
    }
}
