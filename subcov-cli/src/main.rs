mod options;
mod report;
mod stats;

use anyhow::Result;
use clap::Command;
use env_logger::Env;

pub mod consts {
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");
    pub const BIN_NAME: &str = "subcov";
}

fn build_parser() -> Command {
    Command::new(consts::BIN_NAME)
        .bin_name(consts::BIN_NAME)
        .version(consts::VERSION)
        .author("Databio")
        .about("Find genes in a targeted panel whose bases are not covered to the required read depth.")
        .subcommand_required(true)
        .subcommand(report::cli::create_report_cli())
        .subcommand(stats::cli::create_stats_cli())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let app = build_parser();
    let matches = app.get_matches();

    match matches.subcommand() {
        //
        // SUBOPTIMAL GENE REPORT
        //
        Some((report::cli::REPORT_CMD, matches)) => {
            report::handlers::run_report(matches)?;
        }

        //
        // PER GENE STATISTICS
        //
        Some((stats::cli::STATS_CMD, matches)) => {
            stats::handlers::run_stats(matches)?;
        }

        _ => unreachable!("Subcommand not found"),
    };

    Ok(())
}
