use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::Validate;
use super::types::GameMode;

pub const DEFAULT_COMPUTER_DELAY_MS: u64 = 600;
pub const MAX_COMPUTER_DELAY_MS: u64 = 10_000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicTacToeSessionSettings {
    #[serde(default)]
    pub default_mode: Option<GameMode>,
    #[serde(default = "default_computer_delay_ms")]
    pub computer_delay_ms: u64,
    /// Fixed seed for the computer's random moves; fresh seed per run when absent.
    #[serde(default)]
    pub opponent_seed: Option<u64>,
}

fn default_computer_delay_ms() -> u64 {
    DEFAULT_COMPUTER_DELAY_MS
}

impl TicTacToeSessionSettings {
    pub fn computer_delay(&self) -> Duration {
        Duration::from_millis(self.computer_delay_ms)
    }
}

impl Default for TicTacToeSessionSettings {
    fn default() -> Self {
        Self {
            default_mode: None,
            computer_delay_ms: DEFAULT_COMPUTER_DELAY_MS,
            opponent_seed: None,
        }
    }
}

impl Validate for TicTacToeSessionSettings {
    fn validate(&self) -> Result<(), String> {
        if self.computer_delay_ms > MAX_COMPUTER_DELAY_MS {
            return Err(format!(
                "Computer delay ({} ms) cannot exceed {} ms",
                self.computer_delay_ms, MAX_COMPUTER_DELAY_MS
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ConfigSerializer, YamlConfigSerializer};

    #[test]
    fn test_default_settings_are_valid() {
        let settings = TicTacToeSessionSettings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.computer_delay(), Duration::from_millis(600));
    }

    #[test]
    fn test_delay_upper_bound() {
        let settings = TicTacToeSessionSettings {
            computer_delay_ms: MAX_COMPUTER_DELAY_MS + 1,
            ..TicTacToeSessionSettings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let serializer = YamlConfigSerializer::new();
        let settings: TicTacToeSessionSettings =
            serializer.deserialize("default_mode: single-player\n").unwrap();
        assert_eq!(settings.default_mode, Some(GameMode::SinglePlayer));
        assert_eq!(settings.computer_delay_ms, DEFAULT_COMPUTER_DELAY_MS);
        assert_eq!(settings.opponent_seed, None);
    }
}
