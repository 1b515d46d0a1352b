use clap::Subcommand;
use taskflow_core::Config;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print one setting (e.g. "default_granularity", "view.week_view_span_days")
    Get { key: String },
    /// Change one setting and save
    Set { key: String, value: String },
    /// Print every setting as `key = value`
    List,
    /// Print the config file location
    Path,
    /// Overwrite the config file with defaults
    Reset,
}

/// Reject keys the config does not have, listing the ones it does.
fn known_key(key: &str) -> Result<(), Box<dyn std::error::Error>> {
    Config::check_key(key).map_err(|err| {
        format!("{err} (known keys: {})", Config::default().keys().join(", ")).into()
    })
}

pub fn run(action: ConfigAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ConfigAction::Get { key } => {
            known_key(&key)?;
            let config = Config::load()?;
            let value = config
                .get(&key)
                .ok_or_else(|| format!("no value for {key}"))?;
            println!("{value}");
        }
        ConfigAction::Set { key, value } => {
            known_key(&key)?;
            let mut config = Config::load()?;
            config.set(&key, &value)?;
            tracing::info!(%key, %value, "config updated");
            println!("{key} = {}", config.get(&key).unwrap_or(value));
        }
        ConfigAction::List => {
            let config = Config::load()?;
            for key in config.keys() {
                println!("{key} = {}", config.get(&key).unwrap_or_default());
            }
        }
        ConfigAction::Path => {
            println!("{}", Config::file_path()?.display());
        }
        ConfigAction::Reset => {
            Config::default().save()?;
            println!("config reset to defaults");
        }
    }
    Ok(())
}
