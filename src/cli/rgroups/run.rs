use std::io::Write;

use clap::ArgMatches;
use indicatif::ProgressBar;

use super::args;
use crate::cli::shared::args::CoreArgs;
use crate::cli::shared::style;
use crate::core::rgcounts::ReadGroupCounts;
use crate::core::source::ReadGroupInfo;

const OUTPUT_IO_ERROR: &str = "Failed to write to the output file.";
const MISSING: &str = ".";

pub fn run(matches: &ArgMatches, mut core: CoreArgs, factory: impl Fn() -> ProgressBar) {
    let above_mapq: Option<u8> = matches.value_of(args::ABOVE_MAPQ).map(|x| x.parse().unwrap());

    let pbar = factory();
    pbar.set_message("Counting reads per read group...");
    let counts =
        ReadGroupCounts::new(&mut core.sources, above_mapq).expect("Failed to count reads per read group");
    pbar.set_style(style::run::finished());
    pbar.finish_with_message(format!("Found {} read group(s)", counts.tallies().len()));

    let saveto = &mut core.saveto;
    match above_mapq {
        Some(mapq) => writeln!(
            saveto,
            "read_group\tplatform\tlibrary\tsample\tmapped\tunmapped\tmapq_above_{}",
            mapq
        )
        .expect(OUTPUT_IO_ERROR),
        None => writeln!(saveto, "read_group\tplatform\tlibrary\tsample\tmapped\tunmapped").expect(OUTPUT_IO_ERROR),
    }

    for (group, tally) in counts.tallies() {
        let meta = counts.metadata().get(group);
        let field = |get: fn(&ReadGroupInfo) -> Option<&String>| {
            meta.and_then(get).map(|x| x.as_str()).unwrap_or(MISSING)
        };
        write!(
            saveto,
            "{}\t{}\t{}\t{}\t{}\t{}",
            group,
            field(|m| m.platform.as_ref()),
            field(|m| m.library.as_ref()),
            field(|m| m.sample.as_ref()),
            tally.mapped,
            tally.unmapped
        )
        .expect(OUTPUT_IO_ERROR);
        match tally.above_mapq {
            Some(above) => writeln!(saveto, "\t{}", above).expect(OUTPUT_IO_ERROR),
            None => writeln!(saveto).expect(OUTPUT_IO_ERROR),
        }
    }
}
