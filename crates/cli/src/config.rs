//! Effective configuration: file, then flag/environment overrides.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;
use handdrive_engine::{GestureConfig, secs};
use tracing::debug;

use crate::error::CliError;

/// Configuration source and per-field overrides, shared by every command.
#[derive(Args, Debug, Clone, Default)]
pub struct ConfigArgs {
    /// YAML or JSON configuration file
    #[arg(long, global = true, env = "HANDDRIVE_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Identical frames needed before a gesture is stable
    #[arg(long, global = true, env = "HANDDRIVE_STABLE_FRAMES", value_name = "N")]
    pub stable_frames: Option<usize>,

    /// Seconds a gesture must be held to change state
    #[arg(long, global = true, env = "HANDDRIVE_TRIGGER_HOLD", value_name = "SECS")]
    pub trigger_hold: Option<f64>,

    /// Seconds to wait after selecting a motor before sending commands
    #[arg(long, global = true, env = "HANDDRIVE_SELECTION_DELAY", value_name = "SECS")]
    pub selection_delay: Option<f64>,

    /// Minimum seconds between direction status lines
    #[arg(long, global = true, env = "HANDDRIVE_CONSOLE_INTERVAL", value_name = "SECS")]
    pub console_interval: Option<f64>,
}

impl ConfigArgs {
    /// Load the file (if any), apply overrides and validate.
    pub fn load(&self) -> Result<GestureConfig, CliError> {
        let mut config = match &self.config {
            Some(path) => load_file(path)?,
            None => GestureConfig::default(),
        };
        self.apply_overrides(&mut config)?;
        config
            .validate()
            .map_err(|err| CliError::config(err.to_string()))?;
        debug!(?config, "effective configuration");
        Ok(config)
    }

    fn apply_overrides(&self, config: &mut GestureConfig) -> Result<(), CliError> {
        if let Some(frames) = self.stable_frames {
            config.stable_frames_required = frames;
        }
        if let Some(value) = self.trigger_hold {
            config.trigger_hold = override_secs("trigger-hold", value)?;
        }
        if let Some(value) = self.selection_delay {
            config.selection_delay = override_secs("selection-delay", value)?;
        }
        if let Some(value) = self.console_interval {
            config.console_update_interval = override_secs("console-interval", value)?;
        }
        Ok(())
    }
}

fn override_secs(name: &str, value: f64) -> Result<std::time::Duration, CliError> {
    secs(value).map_err(|err| CliError::config(format!("--{name}: {err}")))
}

/// Parse a configuration file, choosing the format by extension.
pub fn load_file(path: &Path) -> Result<GestureConfig, CliError> {
    let text = fs::read_to_string(path)
        .map_err(|err| CliError::config(format!("cannot read {}: {err}", path.display())))?;
    parse_config(path, &text)
}

fn parse_config(path: &Path, text: &str) -> Result<GestureConfig, CliError> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    match extension.as_deref() {
        Some("yaml" | "yml") => serde_yaml::from_str(text)
            .map_err(|err| CliError::config(format!("{}: {err}", path.display()))),
        Some("json") => serde_json::from_str(text)
            .map_err(|err| CliError::config(format!("{}: {err}", path.display()))),
        _ => Err(CliError::config(format!(
            "{}: unsupported config format (expected .yaml, .yml or .json)",
            path.display()
        ))),
    }
}
