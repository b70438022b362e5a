use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use clap::ArgMatches;
use indicatif::ProgressBar;
use itertools::Itertools;

use super::args;
use crate::core::io::hts::HtsSource;
use crate::core::source::AlignmentSource;

pub fn bamfiles(pbar: ProgressBar, matches: &ArgMatches) -> Vec<PathBuf> {
    pbar.set_message("Parsing paths to the input files...");
    let result: Vec<PathBuf> = matches.values_of(args::core::INPUT).unwrap().map(|x| x.into()).collect();
    if result.len() == 1 {
        pbar.finish_with_message(format!("Input file path: {}", result[0].display()));
    } else {
        let paths = result.iter().map(|x| x.display()).join(" ");
        pbar.finish_with_message(format!("Input files that will be pooled: {}", paths));
    }
    result
}

pub fn sources(pbar: ProgressBar, bamfiles: &[PathBuf]) -> Vec<HtsSource> {
    pbar.set_message("Opening input files...");
    let sources = bamfiles
        .iter()
        .map(|path| {
            HtsSource::open(path).unwrap_or_else(|_| {
                panic!(
                    "Failed to open file {}\n\
                    Possible reasons: BAM file was not indexed (samtools index); you don't have read permissions",
                    path.display()
                )
            })
        })
        .collect_vec();
    let references = sources.first().map(|src| src.references().len()).unwrap_or(0);
    pbar.finish_with_message(format!("Opened {} file(s), {} reference sequence(s)", sources.len(), references));
    sources
}

pub fn saveto(pbar: ProgressBar, matches: &ArgMatches) -> BufWriter<File> {
    pbar.set_message("Parsing output path...");
    let result = matches.value_of(args::core::SAVETO).unwrap();
    let file = BufWriter::new(File::create(result).unwrap_or_else(|_| panic!("Failed to create {}", result)));
    pbar.finish_with_message(format!("Result will be saved to {}", result));
    file
}

pub fn bins(pbar: ProgressBar, matches: &ArgMatches) -> usize {
    pbar.set_message("Parsing histogram options...");
    let result = matches.value_of(args::core::BINS).and_then(|x| x.parse().ok()).unwrap();
    pbar.finish_with_message(format!("Histograms will use {} bins", result));
    result
}

pub fn threads(pbar: ProgressBar, matches: &ArgMatches) -> usize {
    pbar.set_message("Parsing number of threads allowed to launch...");
    let result = matches.value_of(args::core::THREADS).and_then(|x| x.parse().ok()).unwrap();
    pbar.finish_with_message(format!("Using thread pool with at most {} threads", result));
    result
}
