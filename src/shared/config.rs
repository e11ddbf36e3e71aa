//! Application configuration. Data paths, draw seed, UI switches.

use serde::Deserialize;
use std::path::PathBuf;

pub const DEFAULT_DATA_DIR: &str = "./data";
pub const DEFAULT_STATE_FILE: &str = "state.json";

#[derive(Debug, Deserialize, Default)]
pub struct AppConfig {
    /// Directory holding the snapshot. Read from GOLD_DAY_DATA_DIR.
    #[serde(default)]
    pub data_dir: Option<String>,

    /// Snapshot file name, relative to `data_dir` unless absolute. Read from GOLD_DAY_STATE_FILE.
    #[serde(default)]
    pub state_file: Option<String>,

    /// Fixed seed for reproducible draws. Read from GOLD_DAY_SHUFFLE_SEED.
    #[serde(default)]
    pub shuffle_seed: Option<u64>,

    /// Show the welcome banner (default true). Read from GOLD_DAY_BANNER.
    #[serde(default)]
    pub banner: Option<bool>,
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenv::dotenv().ok();
        let mut c = config::Config::builder();
        c = c.add_source(config::Environment::with_prefix("GOLD_DAY").try_parsing(true));
        if let Ok(path) = std::env::var("GOLD_DAY_CONFIG") {
            c = c.add_source(config::File::with_name(&path));
        }
        c.build()?.try_deserialize()
    }

    pub fn data_dir_or_default(&self) -> PathBuf {
        PathBuf::from(self.data_dir.as_deref().unwrap_or(DEFAULT_DATA_DIR))
    }

    /// Full path of the snapshot file.
    pub fn state_path(&self) -> PathBuf {
        let file = self.state_file.as_deref().unwrap_or(DEFAULT_STATE_FILE);
        self.data_dir_or_default().join(file)
    }

    pub fn banner_enabled(&self) -> bool {
        self.banner.unwrap_or(true)
    }
}
