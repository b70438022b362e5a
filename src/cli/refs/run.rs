use std::io::Write;

use clap::ArgMatches;
use indicatif::ProgressBar;

use super::args;
use crate::cli::report::{self, Labels};
use crate::cli::shared::args::CoreArgs;
use crate::cli::shared::style;
use crate::core::describe::Describe;
use crate::core::refstats::ReferenceStats;

const OUTPUT_IO_ERROR: &str = "Failed to write to the output file.";

pub fn run(matches: &ArgMatches, mut core: CoreArgs, factory: impl Fn() -> ProgressBar) {
    let nmost = matches.value_of(args::NMOST).unwrap().parse().unwrap();
    let max_rpkm = matches.value_of(args::MAX_RPKM).map(|x| x.parse().unwrap());

    let pbar = factory();
    pbar.set_message("Counting reads per reference...");
    let stats = ReferenceStats::new(&mut core.sources, nmost, max_rpkm, core.bins)
        .expect("Failed to compute per-reference statistics");
    pbar.set_style(style::run::finished());
    pbar.finish_with_message(format!("Counted reads over {} references", stats.rpkms().count()));

    let saveto = &mut core.saveto;
    writeln!(saveto, "RPKMs\n-----").expect(OUTPUT_IO_ERROR);
    write!(saveto, "{}", report::render(stats.rpkms(), &Labels::default())).expect(OUTPUT_IO_ERROR);

    writeln!(saveto, "\nMost represented references\n---------------------------").expect(OUTPUT_IO_ERROR);
    let mut tsv = csv::WriterBuilder::new().delimiter(b'\t').from_writer(&mut *saveto);
    for record in stats.most_abundant() {
        tsv.serialize(record).expect(OUTPUT_IO_ERROR);
    }
    tsv.flush().expect(OUTPUT_IO_ERROR);
    drop(tsv);

    writeln!(saveto, "\nReference lengths\n-----------------").expect(OUTPUT_IO_ERROR);
    write!(saveto, "{}", report::render(stats.lengths(), &Labels::default())).expect(OUTPUT_IO_ERROR);
}
