use clap::Args;
use taskflow_core::{generate_ticks, Config, Granularity};

use super::{print_json, WindowArgs};

#[derive(Args)]
pub struct TicksArgs {
    #[command(flatten)]
    pub window: WindowArgs,
    /// day, week or month (defaults to the configured granularity)
    #[arg(long)]
    pub granularity: Option<Granularity>,
}

pub fn run(args: TicksArgs, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let granularity = args.granularity.unwrap_or(config.default_granularity);
    let window = args.window.window(granularity)?;
    let ticks: Vec<_> = generate_ticks(&window, granularity)?.collect();
    print_json(&ticks)
}
