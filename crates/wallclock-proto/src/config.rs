use serde::Deserialize;

pub const DEFAULT_CONFIG_FILE_PATH: &str = "~/.config/wallclock/config.toml";

/// Timezone used when decomposing a timestamp into hour/minute/second.
#[derive(Deserialize, Clone, Copy, Default, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Timezone {
    #[default]
    Local,
    Utc,
}

#[derive(Deserialize, Clone, Default, Debug, PartialEq, Eq)]
pub struct ClockModuleConfig {
    #[serde(default)]
    pub timezone: Timezone,
}

#[derive(Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Config {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub clock: ClockModuleConfig,
}

fn default_log_level() -> String {
    "warn".to_owned()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            clock: ClockModuleConfig::default(),
        }
    }
}
