//! Configuration loading from TOML files

mod constants;

pub use constants::{
    CombatConstants, GameConstants, PlayerConstants, ProgressionConstants, ShopConstants,
};

use std::fs;
use std::path::Path;
use thiserror::Error;

/// Configuration loading error
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Configuration validation error: {0}")]
    ValidationError(String),
}

/// Load a TOML file and deserialize it
pub fn load_toml<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: T = toml::from_str(&content)?;
    Ok(config)
}

/// Load a TOML string and deserialize it
pub fn parse_toml<T: serde::de::DeserializeOwned>(content: &str) -> Result<T, ConfigError> {
    let config: T = toml::from_str(content)?;
    Ok(config)
}

/// Load game constants from a file and validate them
pub fn load_constants(path: &Path) -> Result<GameConstants, ConfigError> {
    let constants: GameConstants = load_toml(path)?;
    constants.validate()?;
    tracing::info!("Loaded game constants from {}", path.display());
    Ok(constants)
}

const BUNDLED_CONSTANTS: &str = include_str!("../../config/game.toml");

/// Constants bundled with the crate
pub fn default_constants() -> GameConstants {
    constants_or_default(BUNDLED_CONSTANTS)
}

/// Parse and validate constants, falling back to the built-in defaults
fn constants_or_default(content: &str) -> GameConstants {
    let parsed = parse_toml::<GameConstants>(content)
        .and_then(|constants| constants.validate().map(|()| constants));
    match parsed {
        Ok(constants) => constants,
        Err(e) => {
            tracing::warn!("Bundled game constants are invalid, using defaults: {}", e);
            GameConstants::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_bundled_constants_match_defaults() {
        let bundled = default_constants();
        let defaults = GameConstants::default();
        assert_eq!(bundled, defaults);
    }

    #[test]
    fn test_bundled_constants_parse_cleanly() {
        let constants: GameConstants = parse_toml(BUNDLED_CONSTANTS).unwrap();
        constants.validate().unwrap();
    }

    #[test]
    fn test_broken_constants_fall_back_to_defaults() {
        assert_eq!(constants_or_default("[combat"), GameConstants::default());
        assert_eq!(
            constants_or_default("[progression]\nexp_per_level = 0"),
            GameConstants::default()
        );
        let tuned = constants_or_default("[combat]\nescape_chance = 75");
        assert_eq!(tuned.combat.escape_chance, 75);
    }

    #[test]
    fn test_load_constants_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[combat]\nescape_chance = 75").unwrap();

        let constants = load_constants(file.path()).unwrap();
        assert_eq!(constants.combat.escape_chance, 75);
        assert_eq!(constants.combat.max_start_distance, 60);
    }

    #[test]
    fn test_invalid_constants_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[progression]\nexp_per_level = 0").unwrap();

        let err = load_constants(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = load_constants(Path::new("/nonexistent/game.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::IoError(_)));
    }
}
