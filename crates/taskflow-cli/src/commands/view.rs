use chrono::{DateTime, Utc};
use clap::Args;
use serde::Serialize;
use taskflow_core::timeline::is_today;
use taskflow_core::{position_instant, Config, Granularity, TimelineWindow};

use super::{parse_instant, print_json};

#[derive(Args)]
pub struct ViewArgs {
    /// Day the view is centered on (defaults to now)
    #[arg(long, value_parser = parse_instant)]
    pub anchor: Option<DateTime<Utc>>,
    /// Clock used for the "today" marker (defaults to the system clock)
    #[arg(long, value_parser = parse_instant)]
    pub now: Option<DateTime<Utc>>,
    /// day, week or month (defaults to the configured granularity)
    #[arg(long)]
    pub granularity: Option<Granularity>,
}

#[derive(Serialize)]
struct ViewDay {
    date: chrono::NaiveDate,
    today: bool,
}

#[derive(Serialize)]
struct ViewOutput {
    window: TimelineWindow,
    days: Vec<ViewDay>,
    now_fraction: Option<f64>,
}

pub fn run(args: ViewArgs, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let now = args.now.unwrap_or_else(Utc::now);
    let anchor = args.anchor.unwrap_or(now);
    let granularity = args.granularity.unwrap_or(config.default_granularity);

    let window = TimelineWindow::for_view(anchor, granularity, &config.view)?;
    let days = window
        .days()?
        .into_iter()
        .map(|date| ViewDay {
            date,
            today: is_today(date, now),
        })
        .collect();
    let now_fraction = position_instant(now, &window)?;

    print_json(&ViewOutput {
        window,
        days,
        now_fraction,
    })
}
