use clap::Args;
use taskflow_core::{shift_window, Direction, Granularity};

use super::{print_json, WindowArgs};

#[derive(Args)]
pub struct ShiftArgs {
    #[command(flatten)]
    pub window: WindowArgs,
    /// day, week or month
    #[arg(long)]
    pub granularity: Granularity,
    /// prev or next
    #[arg(long)]
    pub direction: Direction,
}

pub fn run(args: ShiftArgs) -> Result<(), Box<dyn std::error::Error>> {
    let window = args.window.window(args.granularity)?;
    let shifted = shift_window(&window, args.granularity, args.direction)?;
    print_json(&shifted)
}
