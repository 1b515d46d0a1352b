use std::path::PathBuf;

use clap::Args;
use taskflow_core::{bucket_by_day, Granularity};

use super::{print_json, read_intervals, WindowArgs};

#[derive(Args)]
pub struct AgendaArgs {
    #[command(flatten)]
    pub window: WindowArgs,
    /// JSON file with an array of intervals ("-" or omitted: stdin)
    #[arg(long)]
    pub input: Option<PathBuf>,
}

pub fn run(args: AgendaArgs) -> Result<(), Box<dyn std::error::Error>> {
    let window = args.window.window(Granularity::Day)?;
    let intervals = read_intervals(args.input.as_deref())?;
    let buckets = bucket_by_day(&intervals, &window)?;
    print_json(&buckets)
}
