use std::io::Write;

use clap::ArgMatches;
use indicatif::ProgressBar;

use crate::cli::report::{self, Labels};
use crate::cli::shared::args::CoreArgs;
use crate::cli::shared::style;
use crate::core::describe::Describe;
use crate::core::flags::FLAGS;
use crate::core::readstats::ReadStats;

const OUTPUT_IO_ERROR: &str = "Failed to write to the output file.";

pub fn run(_matches: &ArgMatches, mut core: CoreArgs, factory: impl Fn() -> ProgressBar) {
    let pbar = factory();
    pbar.set_message("Streaming reads...");
    let stats = ReadStats::new(&mut core.sources).expect("Failed to compute per-read statistics");
    pbar.set_style(style::run::finished());
    pbar.finish_with_message(format!("Processed {} reads", stats.mapqs().count()));

    let saveto = &mut core.saveto;
    writeln!(saveto, "Mapping qualities\n-----------------").expect(OUTPUT_IO_ERROR);
    write!(saveto, "{}", report::render(stats.mapqs(), &Labels::default())).expect(OUTPUT_IO_ERROR);

    writeln!(saveto, "\nFlag counts\n-----------").expect(OUTPUT_IO_ERROR);
    let counts = stats.flag_counts();
    for (_, label) in &FLAGS {
        writeln!(saveto, "{}: {}", label, counts[label]).expect(OUTPUT_IO_ERROR);
    }
}
