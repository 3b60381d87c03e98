use clap::{Command, arg};

use crate::options::loader_args;

pub const REPORT_CMD: &str = "report";

pub fn create_report_cli() -> Command {
    Command::new(REPORT_CMD)
        .about("Report genes with suboptimal coverage at a read depth.")
        .arg_required_else_help(true)
        .args(loader_args())
        .arg(arg!(-c --cutoff <cutoff> "Percentage covered below which a gene is suboptimal [default: 100]").required(false))
        .arg(arg!(-m --mode <mode> "Classification strategy: gene (weighted average) or exon (any exon below cutoff) [default: gene]").required(false))
        .arg(arg!(-f --format <format> "Report body: table, symbols or verbose [default: table]").required(false))
        .arg(arg!(-v --verbose "Per-exon breakdown for every flagged gene (same as --format verbose)"))
        .arg(arg!(-o --output <output> "Report path, .gz compresses, - writes to stdout [default: <sample>.suboptimal.txt]").required(false))
}
