use clap::{Command, arg};

use crate::options::loader_args;

pub const STATS_CMD: &str = "stats";

pub fn create_stats_cli() -> Command {
    Command::new(STATS_CMD)
        .about("Compute the length-weighted coverage percentage of every gene.")
        .arg_required_else_help(true)
        .args(loader_args())
        .arg(arg!(-o --output <output> "Output path (default: stdout)").required(false))
        .arg(arg!(--json "Write JSON instead of a tab separated table"))
}
