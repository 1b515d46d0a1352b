use std::path::PathBuf;

use clap::Args;
use taskflow_core::{position_all, position_instant, Granularity};

use super::{parse_instant, print_json, read_intervals, WindowArgs};

#[derive(Args)]
pub struct PositionArgs {
    #[command(flatten)]
    pub window: WindowArgs,
    /// JSON file with an array of intervals ("-" or omitted: stdin)
    #[arg(long)]
    pub input: Option<PathBuf>,
    /// Also report where this instant falls (RFC 3339 or YYYY-MM-DD)
    #[arg(long, value_parser = parse_instant)]
    pub now: Option<chrono::DateTime<chrono::Utc>>,
}

pub fn run(args: PositionArgs) -> Result<(), Box<dyn std::error::Error>> {
    let window = args.window.window(Granularity::Day)?;
    let intervals = read_intervals(args.input.as_deref())?;
    let rows = position_all(&intervals, &window)?;

    match args.now {
        Some(now) => print_json(&serde_json::json!({
            "rows": rows,
            "now_fraction": position_instant(now, &window)?,
        })),
        None => print_json(&rows),
    }
}
