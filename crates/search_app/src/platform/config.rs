//! Optional RON configuration read from the working directory.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use search_bridge::BackendCommand;
use search_core::RenderPolicy;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::logging::LogDestination;

pub const CONFIG_FILENAME: &str = "search_ui.ron";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub backend: BackendConfig,
    pub render_policy: RenderPolicyConfig,
    pub log_destination: LogDestination,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    pub program: String,
    pub args: Vec<String>,
}

impl Default for BackendConfig {
    fn default() -> Self {
        let command = BackendCommand::default();
        Self {
            program: command.program,
            args: command.args,
        }
    }
}

impl From<BackendConfig> for BackendCommand {
    fn from(config: BackendConfig) -> Self {
        BackendCommand {
            program: config.program,
            args: config.args,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RenderPolicyConfig {
    ArrivalOrder,
    #[default]
    LatestOnly,
}

impl From<RenderPolicyConfig> for RenderPolicy {
    fn from(policy: RenderPolicyConfig) -> Self {
        match policy {
            RenderPolicyConfig::ArrivalOrder => RenderPolicy::ArrivalOrder,
            RenderPolicyConfig::LatestOnly => RenderPolicy::LatestOnly,
        }
    }
}

/// Load `{dir}/search_ui.ron`; a missing file yields the defaults.
pub fn load_config(dir: &Path) -> Result<AppConfig, ConfigError> {
    let path = dir.join(CONFIG_FILENAME);
    let content = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(AppConfig::default()),
        Err(source) => return Err(ConfigError::Read { path, source }),
    };

    ron::from_str(&content).map_err(|source| ConfigError::Parse { path, source })
}
