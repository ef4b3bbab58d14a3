use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotSettings {
    pub output: String,
    pub width: u32,
    pub height: u32,
}

impl Default for PlotSettings {
    fn default() -> Self {
        Self {
            output: "regression.svg".to_string(),
            width: 800,
            height: 600,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub data_dir: String,
    pub ranking_limit: usize,
    pub risk_free_rate: f64,
    pub plot: PlotSettings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: "data/prices".to_string(),
            ranking_limit: 20,
            risk_free_rate: 0.0,
            plot: PlotSettings::default(),
        }
    }
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Box<dyn std::error::Error>> {
        let contents = fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&contents)?;
        Ok(config)
    }

    /// Load `path`, falling back to defaults when the file does not exist.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, Box<dyn std::error::Error>> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }
}
