//! Configuration handling
use std::{fs::read_to_string, path::PathBuf};

use home::home_dir;
use serde::{Deserialize, Serialize};

use crate::{
    cli::ToghCli,
    errors::{ToghError, ToghErrorKind},
    github::config::GithubConfig,
};

/// Configuration of a run
#[derive(Default, Clone, Debug)]
pub struct ToghConfig {
    /// path to the configuration file
    pub config_path: PathBuf,

    /// actual configuration data
    pub config_data: ConfigData,

    /// CLI arguments
    pub cli_args: ToghCli,
}

/// Content of the configuration file
#[derive(Deserialize, Serialize, Default, Clone, Debug, PartialEq, Eq)]
pub struct ConfigData {
    /// Github configuration
    pub github: Option<GithubConfig>,
}

impl ToghConfig {
    /// Create a new Config object, reading the config file if there is one.
    /// A missing default config file is not an error; a missing file given
    /// on the command line is.
    /// # Errors
    /// Error if the config file can't be read or parsed
    pub fn try_new(cli_args: ToghCli) -> Result<Self, ToghError> {
        let (config_path, explicit) = match cli_args.config.clone() {
            Some(p) => (p, true),
            None => (Self::get_config_path()?, false),
        };
        let config_data = if explicit || config_path.exists() {
            let contents = read_to_string(&config_path).map_err(|e| {
                ToghError::new(ToghErrorKind::Config)
                    .with_text(&format!("Unable to open '{}': {e}", config_path.display()))
            })?;
            toml::from_str(&contents)?
        } else {
            ConfigData::default()
        };
        Ok(ToghConfig {
            config_path,
            config_data,
            cli_args,
        })
    }

    /// Get the path to the config file
    /// # Errors
    /// Error if the home directory can't be found
    pub fn get_config_path() -> Result<PathBuf, ToghError> {
        let home_dir = match home_dir() {
            Some(path) if !path.as_os_str().is_empty() => path,
            _ => return Err("Unable to get your home dir! home::home_dir() isn't working".into()),
        };
        Ok(home_dir.join(".config").join("togh").join("config.toml"))
    }
}
