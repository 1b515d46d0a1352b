use clap::{Parser, Subcommand};
use taskflow_core::Config;

mod commands;

#[derive(Parser)]
#[command(name = "taskflow-cli", version, about = "TaskFlow timeline CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Position intervals inside a window (Gantt rows)
    Position(commands::position::PositionArgs),
    /// List axis ticks for a window
    Ticks(commands::ticks::TicksArgs),
    /// Move a window by one granularity unit
    Shift(commands::shift::ShiftArgs),
    /// Show the window a view displays around an anchor
    View(commands::view::ViewArgs),
    /// Bucket intervals by calendar day (agenda)
    Agenda(commands::agenda::AgendaArgs),
    /// Time-tracking report over raw durations
    Report(commands::report::ReportArgs),
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn init_logging(level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .compact();

    let _ = subscriber.try_init();
}

fn main() {
    let cli = Cli::parse();
    // Logging needs the configured level, so a load failure is reported after init
    let (config, load_error) = match Config::load() {
        Ok(config) => (config, None),
        Err(err) => (Config::default(), Some(err)),
    };
    init_logging(&config.log_level);
    if let Some(err) = load_error {
        tracing::warn!(%err, "falling back to default config");
    }

    let result = match cli.command {
        Commands::Position(args) => commands::position::run(args),
        Commands::Ticks(args) => commands::ticks::run(args, &config),
        Commands::Shift(args) => commands::shift::run(args),
        Commands::View(args) => commands::view::run(args, &config),
        Commands::Agenda(args) => commands::agenda::run(args),
        Commands::Report(args) => commands::report::run(args, &config),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
