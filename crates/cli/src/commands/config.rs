//! Configuration inspection commands

use anyhow::Result;
use colored::*;
use handdrive_engine::GestureConfig;

use crate::commands::ConfigCommands;
use crate::config::{ConfigArgs, load_file};
use crate::error::CliError;
use crate::output;

/// Execute config command
pub fn execute(cmd: &ConfigCommands, args: &ConfigArgs, json: bool) -> Result<()> {
    match cmd {
        ConfigCommands::Show => show(&args.load()?, json),
        ConfigCommands::Validate { path } => {
            let path = path
                .as_deref()
                .or(args.config.as_deref())
                .ok_or_else(|| CliError::config("no configuration file given"))?;
            let config = load_file(path)?;
            config
                .validate()
                .map_err(|err| CliError::config(err.to_string()))?;
            if json {
                return output::print_json("config", &config);
            }
            println!("{} {}", "✓".green(), format!("{} is valid", path.display()).bold());
            Ok(())
        }
    }
}

fn show(config: &GestureConfig, json: bool) -> Result<()> {
    if json {
        return output::print_json("config", config);
    }
    print!("{}", serde_yaml::to_string(config)?);
    Ok(())
}
