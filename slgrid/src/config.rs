use crate::error::{GridError, Result};
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_CAP_URL: &str =
    "https://cap.secondlife.com/cap/0/d661249b-2b5a-4436-966a-3d3b8d7a574f";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub cap_url: String,
    pub cache_file: PathBuf,
    pub input_file: PathBuf,
    pub output_file: PathBuf,
    pub lookup_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cap_url: DEFAULT_CAP_URL.to_string(),
            cache_file: PathBuf::from("region_cache.json"),
            input_file: PathBuf::from("stations.txt"),
            output_file: PathBuf::from("stations.json"),
            lookup_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let defaults = Self::default();

        let cap_url = dotenvy::var("CAP_URL")
            .ok()
            .filter(|s| !s.is_empty())
            .unwrap_or(defaults.cap_url);

        let timeout_secs = dotenvy::var("LOOKUP_TIMEOUT_SECS")
            .unwrap_or_else(|_| DEFAULT_TIMEOUT_SECS.to_string())
            .parse::<u64>()
            .ok()
            .filter(|secs| *secs > 0)
            .ok_or_else(|| GridError::Config("Invalid LOOKUP_TIMEOUT_SECS".to_string()))?;

        Ok(Config {
            cap_url,
            cache_file: env_path("REGION_CACHE_FILE", defaults.cache_file),
            input_file: env_path("STATIONS_INPUT", defaults.input_file),
            output_file: env_path("STATIONS_OUTPUT", defaults.output_file),
            lookup_timeout: Duration::from_secs(timeout_secs),
        })
    }
}

fn env_path(key: &str, default: PathBuf) -> PathBuf {
    dotenvy::var(key)
        .ok()
        .filter(|s| !s.is_empty())
        .map_or(default, PathBuf::from)
}
