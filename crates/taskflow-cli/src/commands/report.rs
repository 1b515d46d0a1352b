use std::path::PathBuf;

use clap::Args;
use serde::Serialize;
use taskflow_core::{
    format_duration, group_by_start_day, sum_durations, totals_by_key, Config, DayGroup, KeyTotal,
};

use super::{print_json, read_intervals};

#[derive(Args)]
pub struct ReportArgs {
    /// JSON file with an array of intervals ("-" or omitted: stdin)
    #[arg(long)]
    pub input: Option<PathBuf>,
    /// Also total by this metadata field (e.g. "project")
    #[arg(long)]
    pub by: Option<String>,
    /// List days oldest first instead of the configured order
    #[arg(long)]
    pub oldest_first: bool,
}

#[derive(Serialize)]
struct ReportOutput {
    total_minutes: i64,
    formatted_total: String,
    days: Vec<DayGroup>,
    #[serde(skip_serializing_if = "Option::is_none")]
    totals: Option<Vec<KeyTotal>>,
}

pub fn run(args: ReportArgs, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let entries = read_intervals(args.input.as_deref())?;
    let newest_first = config.report.newest_first && !args.oldest_first;

    let total_minutes = sum_durations(&entries)?;
    let days = group_by_start_day(&entries, newest_first)?;
    let totals = args
        .by
        .as_deref()
        .map(|key| totals_by_key(&entries, key))
        .transpose()?;

    print_json(&ReportOutput {
        total_minutes,
        formatted_total: format_duration(total_minutes),
        days,
        totals,
    })
}
