//! Configuration for a narrative session, loaded from TOML.
//!
//! ```toml
//! seed = 42
//! depth = 3
//!
//! [palette]
//! themes = ["redemption", "mystery"]
//! locations = ["an abandoned castle", "a misty valley"]
//! characters = ["the Wanderer", "the Shadow"]
//! ```
//!
//! Resolution order (highest priority first):
//! 1. Environment variables (`NARRATIVE_SEED`, `NARRATIVE_DEPTH`)
//! 2. The TOML file
//! 3. Compiled defaults (`depth = 3`, no seed)

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::palette::StoryPalette;

/// Depth used when a config does not name one.
pub const DEFAULT_DEPTH: u32 = 3;

/// Environment variable overriding the seed.
pub const SEED_ENV: &str = "NARRATIVE_SEED";

/// Environment variable overriding the depth.
pub const DEPTH_ENV: &str = "NARRATIVE_DEPTH";

/// Errors raised while loading or validating configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("cannot read config file {path}: {message}")]
    Io { path: String, message: String },

    #[error("invalid TOML in {path}: {message}")]
    Parse { path: String, message: String },

    #[error("invalid value for {field}: {message}")]
    ValidationFailed { field: String, message: String },
}

/// Everything needed to start a narrative session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NarrativeConfig {
    pub palette: StoryPalette,

    /// `None` seeds the random stream from platform entropy.
    #[serde(default)]
    pub seed: Option<u64>,

    #[serde(default = "default_depth")]
    pub depth: u32,
}

fn default_depth() -> u32 {
    DEFAULT_DEPTH
}

impl NarrativeConfig {
    /// Create a config with the default depth and no seed.
    pub fn new(palette: StoryPalette) -> Self {
        Self {
            palette,
            seed: None,
            depth: DEFAULT_DEPTH,
        }
    }

    /// Set the seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the tree depth.
    pub fn with_depth(mut self, depth: u32) -> Self {
        self.depth = depth;
        self
    }

    /// Load a config file and apply environment overrides.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        let mut config = Self::parse(&content, &path.display().to_string())?;
        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML string (no environment overrides).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config = Self::parse(toml_str, "<string>")?;
        config.validate()?;
        Ok(config)
    }

    fn parse(toml_str: &str, origin: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::Parse {
            path: origin.to_string(),
            message: e.to_string(),
        })
    }

    /// Apply `NARRATIVE_SEED` / `NARRATIVE_DEPTH` from the process environment.
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary variable lookup.
    pub fn apply_overrides_from<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup(SEED_ENV) {
            let seed = raw.trim().parse::<u64>().map_err(|e| ConfigError::ValidationFailed {
                field: SEED_ENV.to_string(),
                message: e.to_string(),
            })?;
            self.seed = Some(seed);
        }

        if let Some(raw) = lookup(DEPTH_ENV) {
            let depth = raw.trim().parse::<u32>().map_err(|e| ConfigError::ValidationFailed {
                field: DEPTH_ENV.to_string(),
                message: e.to_string(),
            })?;
            self.depth = depth;
        }

        Ok(())
    }

    /// Validate the configuration values.
    ///
    /// The palette validates itself on construction; only the depth is left.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.depth < 1 {
            return Err(ConfigError::ValidationFailed {
                field: "depth".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
        seed = 7
        depth = 2

        [palette]
        themes = ["mystery"]
        locations = ["a misty valley"]
        characters = ["the Shadow", "the Wanderer"]
    "#;

    #[test]
    fn test_from_toml() {
        let config = NarrativeConfig::from_toml(SAMPLE).unwrap();

        assert_eq!(config.seed, Some(7));
        assert_eq!(config.depth, 2);
        assert_eq!(config.palette.characters().len(), 2);
    }

    #[test]
    fn test_defaults_applied() {
        let config = NarrativeConfig::from_toml(
            r#"
            [palette]
            themes = ["mystery"]
            locations = ["castle"]
            characters = ["Wanderer"]
            "#,
        )
        .unwrap();

        assert_eq!(config.seed, None);
        assert_eq!(config.depth, DEFAULT_DEPTH);
    }

    #[test]
    fn test_empty_palette_is_parse_error() {
        let err = NarrativeConfig::from_toml(
            r#"
            [palette]
            themes = []
            locations = ["castle"]
            characters = ["Wanderer"]
            "#,
        )
        .unwrap_err();

        match err {
            ConfigError::Parse { message, .. } => assert!(message.contains("themes")),
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_zero_depth_rejected() {
        let err = NarrativeConfig::from_toml(&SAMPLE.replace("depth = 2", "depth = 0")).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationFailed { ref field, .. } if field == "depth"));
    }

    #[test]
    fn test_overrides() {
        let mut config = NarrativeConfig::from_toml(SAMPLE).unwrap();

        config
            .apply_overrides_from(|key| match key {
                SEED_ENV => Some("99".to_string()),
                DEPTH_ENV => Some(" 4 ".to_string()),
                _ => None,
            })
            .unwrap();

        assert_eq!(config.seed, Some(99));
        assert_eq!(config.depth, 4);
    }

    #[test]
    fn test_bad_override_rejected() {
        let mut config = NarrativeConfig::from_toml(SAMPLE).unwrap();

        let err = config
            .apply_overrides_from(|key| (key == SEED_ENV).then(|| "not-a-number".to_string()))
            .unwrap_err();

        assert!(matches!(err, ConfigError::ValidationFailed { ref field, .. } if field == SEED_ENV));
        assert_eq!(config.seed, Some(7));
    }

    #[test]
    fn test_load_missing_file() {
        let err = NarrativeConfig::load(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_builder_methods() {
        let palette = StoryPalette::new(["a"], ["b"], ["c"]).unwrap();
        let config = NarrativeConfig::new(palette).with_seed(3).with_depth(5);

        assert_eq!(config.seed, Some(3));
        assert_eq!(config.depth, 5);
        assert!(config.validate().is_ok());
    }
}
