//! Session configuration, read from a TOML file.

use std::path::Path;

use chess_core::{Rules, Side};
use serde::{Deserialize, Serialize};

use crate::error::PlayError;

pub const DEFAULT_CONFIG_PATH: &str = "chess.toml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlayConfig {
    /// Colour played from the terminal; the engine takes the other one.
    pub human_side: Side,
    pub king_safety: bool,
    /// Seed for the opponent. `None` draws one from the OS.
    pub seed: Option<u64>,
    /// Half-moves after which the game is called a draw.
    pub max_plies: u32,
    /// Log filter used when `RUST_LOG` is unset.
    pub log: String,
}

impl Default for PlayConfig {
    fn default() -> Self {
        Self {
            human_side: Side::White,
            king_safety: true,
            seed: None,
            max_plies: 400,
            log: "info".to_string(),
        }
    }
}

impl PlayConfig {
    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Reads `path`. A missing file is not an error: the defaults apply.
    pub fn load(path: &Path) -> Result<Self, PlayError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path).map_err(|source| PlayError::ReadConfig {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text).map_err(|source| PlayError::ParseConfig {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn rules(&self) -> Rules {
        if self.king_safety {
            Rules::standard()
        } else {
            Rules::geometric()
        }
    }
}
