use std::io::Write;

use clap::ArgMatches;
use indicatif::ProgressBar;

use crate::cli::shared::args::CoreArgs;
use crate::cli::shared::style;
use crate::core::io::hts::index_counts;

const OUTPUT_IO_ERROR: &str = "Failed to write to the output file.";
const MISSING: &str = "*";

pub fn run(_matches: &ArgMatches, mut core: CoreArgs, factory: impl Fn() -> ProgressBar) {
    let pbar = factory();
    pbar.set_message("Reading index statistics...");

    let saveto = &mut core.saveto;
    writeln!(saveto, "file\treference\tlength\tmapped\tunmapped").expect(OUTPUT_IO_ERROR);

    let mut total = 0;
    for path in &core.bamfiles {
        let rows = index_counts(path)
            .unwrap_or_else(|_| panic!("Failed to read the index statistics for {}", path.display()));
        total += rows.len();
        for row in rows {
            writeln!(
                saveto,
                "{}\t{}\t{}\t{}\t{}",
                path.display(),
                row.reference.as_deref().unwrap_or(MISSING),
                row.length.map(|x| x.to_string()).unwrap_or_else(|| MISSING.to_owned()),
                row.mapped,
                row.unmapped
            )
            .expect(OUTPUT_IO_ERROR);
        }
    }

    pbar.set_style(style::run::finished());
    pbar.finish_with_message(format!("Reported {} reference(s) from {} file(s)", total, core.bamfiles.len()));
}
