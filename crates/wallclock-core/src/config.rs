use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use log::{info, warn};

pub use wallclock_proto::config::*;

/// Errors that can occur while resolving and reading the config file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to expand config path: {0}")]
    Expand(#[from] shellexpand::LookupError<std::env::VarError>),
    #[error("config file does not exist: {}", path.display())]
    NotFound { path: PathBuf },
    #[error("failed to create config directory: {0}")]
    CreateDir(#[source] std::io::Error),
    #[error("failed to read config file: {0}")]
    Read(#[source] std::io::Error),
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Resolve the config file and load it.
///
/// An explicitly provided path must exist; the default path is created on
/// demand. In both cases an unreadable or unparsable file degrades to the
/// default configuration with a warning, so a broken config never prevents
/// the clock from starting.
pub fn get_config(path: Option<PathBuf>) -> Result<(Config, PathBuf), ConfigError> {
    match path {
        Some(path) => {
            info!("Config path provided {path:?}");
            let expanded = expand_path(&path)?;

            if !expanded.exists() {
                return Err(ConfigError::NotFound { path: expanded });
            }

            Ok((load_or_default(&expanded), expanded))
        }
        None => {
            let expanded = expand_path(Path::new(DEFAULT_CONFIG_FILE_PATH))?;

            if let Some(parent) = expanded.parent()
                && !parent.exists()
            {
                std::fs::create_dir_all(parent).map_err(ConfigError::CreateDir)?;
            }

            Ok((load_or_default(&expanded), expanded))
        }
    }
}

fn expand_path(path: &Path) -> Result<PathBuf, ConfigError> {
    let str_path = path.to_string_lossy();
    let expanded = shellexpand::full(str_path.as_ref())?;

    Ok(PathBuf::from(expanded.to_string()))
}

fn load_or_default(path: &Path) -> Config {
    read_config(path).unwrap_or_else(|err| {
        warn!("Falling back to default config: {err}");
        Config::default()
    })
}

fn read_config(path: &Path) -> Result<Config, ConfigError> {
    let mut content = String::new();
    File::open(path)
        .and_then(|mut file| file.read_to_string(&mut content))
        .map_err(ConfigError::Read)?;

    info!("Decoding config file {path:?}");
    let config = toml::from_str(&content)?;
    info!("Config file loaded successfully");

    Ok(config)
}
