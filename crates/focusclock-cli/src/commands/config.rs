use clap::Subcommand;
use focusclock_core::{AppConfig, ConfigError};

use crate::context::Context;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Get a config value
    Get {
        /// Config key (e.g. "notifications.bell", "logging.filter")
        key: String,
    },
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// New value
        value: String,
    },
    /// List all config values
    List,
    /// Reset config to defaults
    Reset,
}

pub fn run(ctx: &Context, action: ConfigAction) -> Result<(), Box<dyn std::error::Error>> {
    let dir = ctx.data_dir()?;
    match action {
        ConfigAction::Get { key } => {
            match ctx.config().get(&key) {
                Some(value) => println!("{value}"),
                None => return Err(ConfigError::UnknownKey(key).into()),
            }
        }
        ConfigAction::Set { key, value } => {
            let mut config = AppConfig::load_from(&dir)?;
            config.set(&key, &value)?;
            config.save_to(&dir)?;
            println!("ok");
        }
        ConfigAction::List => {
            let json = serde_json::to_string_pretty(ctx.config())?;
            println!("{json}");
        }
        ConfigAction::Reset => {
            AppConfig::default().save_to(&dir)?;
            println!("config reset to defaults");
        }
    }
    Ok(())
}
