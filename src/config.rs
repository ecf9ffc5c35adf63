use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::generator::GeneratorLimits;

pub const DEFAULT_BLANK_PLACEHOLDER: &str = "_____";

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_learning_exercise_count")]
    pub learning_exercise_count: usize,
    #[serde(default = "default_test_exercise_count")]
    pub test_exercise_count: usize,
    #[serde(default = "default_test_duration_secs")]
    pub test_duration_secs: u64,
    #[serde(default = "default_feedback_delay_ms")]
    pub feedback_delay_ms: u64,
    #[serde(default = "default_blank_placeholder")]
    pub blank_placeholder: String,
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
}

fn default_learning_exercise_count() -> usize {
    10
}
fn default_test_exercise_count() -> usize {
    15
}
fn default_test_duration_secs() -> u64 {
    300
}
fn default_feedback_delay_ms() -> u64 {
    2000
}
fn default_blank_placeholder() -> String {
    DEFAULT_BLANK_PLACEHOLDER.to_string()
}
fn default_data_dir() -> String {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("wordrill")
        .to_string_lossy()
        .to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            learning_exercise_count: default_learning_exercise_count(),
            test_exercise_count: default_test_exercise_count(),
            test_duration_secs: default_test_duration_secs(),
            feedback_delay_ms: default_feedback_delay_ms(),
            blank_placeholder: default_blank_placeholder(),
            data_dir: default_data_dir(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        if path.exists() {
            let content = fs::read_to_string(&path)?;
            let mut config: Config = toml::from_str(&content)?;
            config.validate();
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        Ok(())
    }

    fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("wordrill")
            .join("config.toml")
    }

    /// Clamp hand-edited values back into a usable range.
    pub fn validate(&mut self) {
        self.learning_exercise_count = self.learning_exercise_count.clamp(1, 50);
        self.test_exercise_count = self.test_exercise_count.clamp(1, 50);
        self.test_duration_secs = self.test_duration_secs.clamp(30, 3600);
        if self.blank_placeholder.trim().is_empty() {
            self.blank_placeholder = default_blank_placeholder();
        }
    }

    pub fn generator_limits(&self) -> GeneratorLimits {
        GeneratorLimits {
            learning: self.learning_exercise_count,
            test: self.test_exercise_count,
            blank_placeholder: self.blank_placeholder.clone(),
        }
    }

    pub fn data_path(&self) -> PathBuf {
        PathBuf::from(&self.data_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_serde_defaults_from_empty() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.learning_exercise_count, 10);
        assert_eq!(config.test_exercise_count, 15);
        assert_eq!(config.test_duration_secs, 300);
        assert_eq!(config.feedback_delay_ms, 2000);
        assert_eq!(config.blank_placeholder, "_____");
        assert!(config.data_dir.contains("wordrill"));
    }

    #[test]
    fn test_config_serde_partial_file() {
        let toml_str = r#"
test_duration_secs = 120
blank_placeholder = "..."
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.test_duration_secs, 120);
        assert_eq!(config.blank_placeholder, "...");
        assert_eq!(config.learning_exercise_count, 10);
    }

    #[test]
    fn test_config_serde_roundtrip() {
        let config = Config::default();
        let serialized = toml::to_string_pretty(&config).unwrap();
        let deserialized: Config = toml::from_str(&serialized).unwrap();
        assert_eq!(config.test_exercise_count, deserialized.test_exercise_count);
        assert_eq!(config.data_dir, deserialized.data_dir);
    }

    #[test]
    fn test_validate_clamps_values() {
        let mut config = Config::default();
        config.learning_exercise_count = 0;
        config.test_exercise_count = 999;
        config.test_duration_secs = 5;
        config.blank_placeholder = "   ".to_string();
        config.validate();

        assert_eq!(config.learning_exercise_count, 1);
        assert_eq!(config.test_exercise_count, 50);
        assert_eq!(config.test_duration_secs, 30);
        assert_eq!(config.blank_placeholder, DEFAULT_BLANK_PLACEHOLDER);
    }

    #[test]
    fn test_generator_limits_follow_config() {
        let mut config = Config::default();
        config.learning_exercise_count = 7;
        let limits = config.generator_limits();
        assert_eq!(limits.learning, 7);
        assert_eq!(limits.test, 15);
    }
}
