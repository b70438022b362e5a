use clap::{App, AppSettings};
use indicatif::{MultiProgress, ProgressBar};
use rayon::ThreadPoolBuilder;

use bamstats::cli;
use bamstats::cli::shared::args::CoreArgs;

fn main() {
    let matches = App::new("bamstats")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Summary statistics for indexed BAM files")
        .max_term_width(120)
        .setting(AppSettings::DeriveDisplayOrder)
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .subcommand(App::new(cli::refs::NAME).about(cli::refs::ABOUT).args(cli::refs::args::args()))
        .subcommand(App::new(cli::reads::NAME).about(cli::reads::ABOUT).args(cli::reads::args::args()))
        .subcommand(App::new(cli::coverage::NAME).about(cli::coverage::ABOUT).args(cli::coverage::args::args()))
        .subcommand(App::new(cli::rgroups::NAME).about(cli::rgroups::ABOUT).args(cli::rgroups::args::args()))
        .subcommand(App::new(cli::idx::NAME).about(cli::idx::ABOUT).args(cli::idx::args::args()))
        .get_matches();

    let (subcommand, matches) = matches.subcommand().expect("A subcommand is required");

    let masterbar = MultiProgress::new();
    let style = cli::shared::style::parse::with_progress();
    let factory = || masterbar.add(ProgressBar::new_spinner().with_style(style.clone()));

    let core = CoreArgs::new(matches, &factory);
    ThreadPoolBuilder::new().num_threads(core.threads).build_global().expect("Failed to initialize thread pool");

    rayon::scope(|s| {
        s.spawn(|_| match subcommand {
            cli::refs::NAME => cli::refs::run(matches, core, &factory),
            cli::reads::NAME => cli::reads::run(matches, core, &factory),
            cli::coverage::NAME => cli::coverage::run(matches, core, &factory),
            cli::rgroups::NAME => cli::rgroups::run(matches, core, &factory),
            cli::idx::NAME => cli::idx::run(matches, core, &factory),
            _ => unreachable!(),
        });
        masterbar.join().expect("Failed to render progress bars");
    });
}
