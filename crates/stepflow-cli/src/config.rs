//! Locating and reading the TOML configuration.
//!
//! A configuration is looked up, in order, at the `--config` path, at
//! `stepflow/config.toml` under the working directory, and at `config.toml`
//! in the platform configuration directory. The first file found is used
//! whole; when none exists the built-in defaults apply.

use std::{
    fs,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, info};

use stepflow::config::AppConfig;

use crate::error::CliError;

const LOCAL_CONFIG: &str = "stepflow/config.toml";
const CONFIG_FILE_NAME: &str = "config.toml";

/// Where a configuration file came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfigOrigin {
    Explicit,
    WorkingDirectory,
    Platform,
}

/// Loads the configuration that applies to this run.
///
/// # Errors
///
/// Returns [`CliError::MissingConfig`] if `explicit_path` does not exist,
/// [`CliError::Io`] if the file cannot be read, and
/// [`CliError::ConfigParse`] (pointing into the file) if it is not a valid
/// configuration.
pub fn load_config(explicit_path: Option<&str>) -> Result<AppConfig, CliError> {
    let Some((origin, path)) = find_config(explicit_path.map(Path::new))? else {
        debug!("No configuration file found, using default configuration");
        return Ok(AppConfig::default());
    };

    info!(origin:?, path = path.display().to_string(); "Loading configuration");
    let content =
        fs::read_to_string(&path).map_err(|err| CliError::io(path.display().to_string(), err))?;
    toml::from_str(&content).map_err(|err| CliError::config_parse(&path, &content, &err))
}

fn find_config(explicit: Option<&Path>) -> Result<Option<(ConfigOrigin, PathBuf)>, CliError> {
    if let Some(path) = explicit {
        if !path.is_file() {
            return Err(CliError::MissingConfig(path.to_path_buf()));
        }
        return Ok(Some((ConfigOrigin::Explicit, path.to_path_buf())));
    }

    let local = PathBuf::from(LOCAL_CONFIG);
    if local.is_file() {
        return Ok(Some((ConfigOrigin::WorkingDirectory, local)));
    }

    let Some(dirs) = ProjectDirs::from("com", "stepflow", "stepflow") else {
        debug!("Could not determine platform-specific config directory");
        return Ok(None);
    };
    let platform = dirs.config_dir().join(CONFIG_FILE_NAME);
    if platform.is_file() {
        return Ok(Some((ConfigOrigin::Platform, platform)));
    }
    debug!(path = platform.display().to_string(); "Platform configuration file not found");
    Ok(None)
}
