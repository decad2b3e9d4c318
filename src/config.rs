//! Engine configuration file.
//!
//! Every key is optional; missing keys take their defaults.
//!
//! ```toml
//! [game]
//! board_size = 9
//! walls_per_player = 10
//!
//! [search]
//! strategy = "alpha_beta"
//! budget = { unit = "nodes", value = 50000 }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::{EngineError, GameConfig, Result};
use crate::search::SearchConfig;

/// Board and search settings handed to the engine at startup.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub game: GameConfig,
    pub search: SearchConfig,
}

impl EngineConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: EngineConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| EngineError::io(path, e))?;
        Self::from_toml_str(&text)
    }

    /// Check the board and search settings.
    pub fn validate(&self) -> Result<()> {
        self.game.validate()?;
        self.search.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Position;
    use crate::search::{SearchBudget, Strategy};

    #[test]
    fn test_empty_document_is_default() {
        assert_eq!(EngineConfig::from_toml_str("").unwrap(), EngineConfig::default());
    }

    #[test]
    fn test_full_document() {
        let config = EngineConfig::from_toml_str(
            r#"
            [game]
            board_size = 7
            walls_per_player = 6
            white_start = { row = 0, col = 3 }
            black_start = { row = 6, col = 3 }

            [search]
            strategy = "mcts"
            budget = { unit = "time_ms", value = 250 }

            [search.mcts]
            seed = 9
            "#,
        )
        .unwrap();

        assert_eq!(config.game.board_size, 7);
        assert_eq!(config.game.black_start, Position::new(6, 3));
        assert_eq!(config.search.strategy, Strategy::Mcts);
        assert_eq!(config.search.budget, SearchBudget::TimeMs(250));
        assert_eq!(config.search.mcts.seed, 9);
    }

    #[test]
    fn test_zero_budget_rejected() {
        let err = EngineConfig::from_toml_str("[search]\nbudget = { unit = \"nodes\", value = 0 }")
            .unwrap_err();
        assert!(matches!(err, EngineError::ZeroBudget));
    }

    #[test]
    fn test_oversized_weight_rejected() {
        let err = EngineConfig::from_toml_str("[search.weights]\npath = 50000").unwrap_err();
        assert!(matches!(err, EngineError::InvalidConfig { .. }));
    }

    #[test]
    fn test_bad_board_rejected() {
        let err = EngineConfig::from_toml_str("[game]\nboard_size = 12").unwrap_err();
        assert!(matches!(err, EngineError::InvalidConfig { .. }));
    }

    #[test]
    fn test_syntax_error() {
        let err = EngineConfig::from_toml_str("[game\nboard_size = 9").unwrap_err();
        assert!(matches!(err, EngineError::ConfigParse { .. }));
    }

    #[test]
    fn test_missing_file() {
        let err = EngineConfig::load("/nonexistent/quoridor.toml").unwrap_err();
        assert!(matches!(err, EngineError::Io { .. }));
    }
}
