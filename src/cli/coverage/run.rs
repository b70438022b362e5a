use std::io::Write;

use clap::ArgMatches;
use indicatif::ProgressBar;
use rayon::prelude::*;

use super::args;
use crate::cli::report::{self, Labels};
use crate::cli::shared::args::CoreArgs;
use crate::cli::shared::style;
use crate::core::coverage::{CoverageCounter, GenomeCoverage};
use crate::core::describe::{Describe, FrequencyTable};

const OUTPUT_IO_ERROR: &str = "Failed to write to the output file.";

pub fn run(matches: &ArgMatches, mut core: CoreArgs, factory: impl Fn() -> ProgressBar) {
    let thresholds: Vec<u8> = matches
        .values_of(args::AT_MAPQ)
        .map(|values| values.map(|x| x.parse().unwrap()).collect())
        .unwrap_or_default();

    let pbar = factory();
    pbar.set_message("Streaming pileup columns...");

    let saveto = &mut core.saveto;
    if thresholds.is_empty() {
        let cov = CoverageCounter::new(&mut core.sources).expect("Failed to compute the depth distribution");
        pbar.set_style(style::run::finished());
        pbar.finish_with_message(format!("Processed {} pileup columns", cov.depths().count()));

        writeln!(saveto, "Coverage depth\n--------------").expect(OUTPUT_IO_ERROR);
        write!(saveto, "{}", report::render(cov.depths(), &Labels::default())).expect(OUTPUT_IO_ERROR);
        return;
    }

    let genome = GenomeCoverage::new(&mut core.sources).expect("Failed to compute the depth distribution");
    // The arena is immutable once populated; thresholds are pure filters over
    // it and can run in parallel
    let tables: Vec<(u8, FrequencyTable)> =
        thresholds.par_iter().map(|&mapq| (mapq, genome.at_threshold(mapq))).collect();

    pbar.set_style(style::run::finished());
    pbar.finish_with_message(format!(
        "Processed {} pileup columns at {} threshold(s)",
        tables.first().map(|(_, table)| table.count()).unwrap_or(0),
        tables.len()
    ));

    for (mapq, table) in &tables {
        writeln!(saveto, "Coverage depth (mapq >= {})\n--------------------------", mapq).expect(OUTPUT_IO_ERROR);
        write!(saveto, "{}", report::render(table, &Labels::default())).expect(OUTPUT_IO_ERROR);
        writeln!(saveto).expect(OUTPUT_IO_ERROR);
    }
    writeln!(saveto, "Uncovered reference positions: {}", genome.uncovered()).expect(OUTPUT_IO_ERROR);
}
