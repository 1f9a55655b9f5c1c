use std::env;
use std::path::PathBuf;

use log::LevelFilter;

pub struct Config {
    pub dataset_path: PathBuf,
    pub api_host: String,
    pub api_port: u16,
    pub log_level: LevelFilter,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup, falling back to defaults
    /// for missing or unparsable values.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            dataset_path: lookup("DATASET_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("./spotify_data.csv")),
            api_host: lookup("API_HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            api_port: lookup("API_PORT")
                .and_then(|port| port.parse().ok())
                .unwrap_or(5000),
            log_level: lookup("LOG_LEVEL")
                .and_then(|level| level.parse().ok())
                .unwrap_or(LevelFilter::Info),
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.api_host, self.api_port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        let config = config_from(&[]);
        assert_eq!(config.dataset_path, PathBuf::from("./spotify_data.csv"));
        assert_eq!(config.bind_address(), "127.0.0.1:5000");
        assert_eq!(config.log_level, LevelFilter::Info);
    }

    #[test]
    fn reads_overrides() {
        let config = config_from(&[
            ("DATASET_PATH", "/data/tracks.csv"),
            ("API_HOST", "0.0.0.0"),
            ("API_PORT", "8080"),
            ("LOG_LEVEL", "debug"),
        ]);
        assert_eq!(config.dataset_path, PathBuf::from("/data/tracks.csv"));
        assert_eq!(config.bind_address(), "0.0.0.0:8080");
        assert_eq!(config.log_level, LevelFilter::Debug);
    }

    #[test]
    fn unparsable_values_fall_back() {
        let config = config_from(&[("API_PORT", "not-a-port"), ("LOG_LEVEL", "loud")]);
        assert_eq!(config.api_port, 5000);
        assert_eq!(config.log_level, LevelFilter::Info);
    }
}
