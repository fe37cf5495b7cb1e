//! Configuration management for the resume screener

use crate::error::{Result, ScreenerError};
use crate::processing::skills::SkillVocabulary;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub analysis: AnalysisConfig,
    pub skills: SkillsConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Shortest token the similarity scorer counts
    pub min_token_length: usize,
    pub preview_chars: usize,
    pub excellent_threshold: f64,
    pub good_threshold: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillsConfig {
    pub include_defaults: bool,
    pub additional_skills: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub color_output: bool,
    pub pretty_json: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            analysis: AnalysisConfig {
                min_token_length: 2,
                preview_chars: 1000,
                excellent_threshold: 75.0,
                good_threshold: 50.0,
            },
            skills: SkillsConfig {
                include_defaults: true,
                additional_skills: Vec::new(),
            },
            output: OutputConfig {
                format: OutputFormat::Console,
                color_output: true,
                pretty_json: true,
            },
        }
    }
}

impl Config {
    /// Load the user configuration, writing the defaults on first run
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            let config = Self::default();
            config.save()?;
            Ok(config)
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| ScreenerError::Configuration(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| ScreenerError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("resume-screener")
            .join("config.toml")
    }

    /// The explicit `--config` file when given, else the per-user location
    pub fn resolve_path(explicit: Option<&Path>) -> PathBuf {
        explicit
            .map(Path::to_path_buf)
            .unwrap_or_else(Self::config_path)
    }

    /// Overwrite whatever is at `path` with the defaults; never reads the old file
    pub fn reset_at(path: &Path) -> Result<Self> {
        let config = Self::default();
        config.save_to(path)?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let analysis = &self.analysis;

        if analysis.min_token_length == 0 {
            return Err(ScreenerError::Configuration(
                "analysis.min_token_length must be at least 1".to_string(),
            ));
        }

        for (name, value) in [
            ("excellent_threshold", analysis.excellent_threshold),
            ("good_threshold", analysis.good_threshold),
        ] {
            if !(0.0..=100.0).contains(&value) {
                return Err(ScreenerError::Configuration(format!(
                    "analysis.{} must be within 0..=100, got {}",
                    name, value
                )));
            }
        }

        if analysis.good_threshold > analysis.excellent_threshold {
            return Err(ScreenerError::Configuration(
                "analysis.good_threshold cannot exceed analysis.excellent_threshold".to_string(),
            ));
        }

        Ok(())
    }

    /// Build the skill vocabulary described by the `skills` section
    pub fn vocabulary(&self) -> SkillVocabulary {
        let mut vocabulary = if self.skills.include_defaults {
            SkillVocabulary::default()
        } else {
            SkillVocabulary::new(Vec::<String>::new())
        };
        vocabulary.extend(self.skills.additional_skills.iter().cloned());
        vocabulary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.analysis.min_token_length, 2);
        assert_eq!(config.output.format, OutputFormat::Console);
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.skills.additional_skills = vec!["terraform".to_string()];
        config.output.format = OutputFormat::Markdown;
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.skills.additional_skills, vec!["terraform".to_string()]);
        assert_eq!(loaded.output.format, OutputFormat::Markdown);
    }

    #[test]
    fn test_invalid_thresholds_rejected() {
        let mut config = Config::default();
        config.analysis.good_threshold = 90.0;
        assert!(config.validate().is_err());

        config.analysis.good_threshold = 50.0;
        config.analysis.excellent_threshold = 120.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_malformed_file_is_configuration_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "analysis = 3").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, ScreenerError::Configuration(_)));
    }

    #[test]
    fn test_reset_repairs_corrupted_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[analysis\nmin_token_length = ").unwrap();
        assert!(Config::load_from(&path).is_err());

        Config::reset_at(&path).unwrap();

        let repaired = Config::load_from(&path).unwrap();
        assert_eq!(repaired.analysis.min_token_length, 2);
        assert_eq!(repaired.output.format, OutputFormat::Console);
    }

    #[test]
    fn test_reset_creates_missing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("fresh").join("config.toml");

        Config::reset_at(&path).unwrap();
        assert!(Config::load_from(&path).is_ok());
    }

    #[test]
    fn test_resolve_path_prefers_explicit_file() {
        let explicit = Path::new("/tmp/custom.toml");
        assert_eq!(Config::resolve_path(Some(explicit)), PathBuf::from("/tmp/custom.toml"));
        assert_eq!(Config::resolve_path(None), Config::config_path());
    }

    #[test]
    fn test_vocabulary_extends_defaults() {
        let mut config = Config::default();
        config.skills.additional_skills = vec!["Terraform".to_string()];
        let vocabulary = config.vocabulary();
        assert!(vocabulary.contains("python"));
        assert!(vocabulary.contains("terraform"));

        config.skills.include_defaults = false;
        let custom = config.vocabulary();
        assert_eq!(custom.len(), 1);
    }
}
