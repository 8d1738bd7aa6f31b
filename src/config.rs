//! Game tuning and the DOM contract.
//!
//! Defaults reproduce the birthday page: a 20 second round, a heart every
//! 650 ms, hearts living 2.5 s, 40 px targets.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    /// Round length in countdown ticks.
    pub duration_secs: u32,
    pub spawn_interval_ms: f64,
    pub countdown_interval_ms: f64,
    /// How long an uncaught heart stays on screen.
    pub heart_lifetime_ms: f64,
    pub heart_size_px: f64,
    pub heart_glyph: String,
    pub elements: ElementIds,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            duration_secs: 20,
            spawn_interval_ms: 650.0,
            countdown_interval_ms: 1000.0,
            heart_lifetime_ms: 2500.0,
            heart_size_px: 40.0,
            heart_glyph: "💗".to_string(),
            elements: ElementIds::default(),
        }
    }
}

impl GameConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.duration_secs == 0 {
            return Err(ConfigError::ZeroDuration);
        }
        for (name, value) in [
            ("spawn_interval_ms", self.spawn_interval_ms),
            ("countdown_interval_ms", self.countdown_interval_ms),
            ("heart_lifetime_ms", self.heart_lifetime_ms),
        ] {
            if value <= 0.0 || !value.is_finite() {
                return Err(ConfigError::NonPositiveInterval { name, value });
            }
        }
        if self.heart_size_px <= 0.0 || !self.heart_size_px.is_finite() {
            return Err(ConfigError::NonPositiveSize(self.heart_size_px));
        }
        self.elements.validate()
    }

    /// Parses a (possibly partial) JSON config; missing fields keep defaults.
    #[cfg(feature = "serde_json")]
    pub fn from_json(json: &str) -> Result<Self, crate::error::GameError> {
        let cfg: GameConfig = serde_json::from_str(json)
            .map_err(|e| crate::error::GameError::ConfigParse(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }
}

/// Element ids and class names the web binding looks up.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ElementIds {
    pub start_button: String,
    pub game_area: String,
    pub score: String,
    pub timer: String,
    pub message: String,
    /// Selector of the "press start" hint removed on first start.
    pub placeholder_selector: String,
    pub heart_class: String,
}

impl Default for ElementIds {
    fn default() -> Self {
        Self {
            start_button: "startGame".to_string(),
            game_area: "gameArea".to_string(),
            score: "gameScore".to_string(),
            timer: "gameTimer".to_string(),
            message: "gameMessage".to_string(),
            placeholder_selector: ".game-placeholder".to_string(),
            heart_class: "heart".to_string(),
        }
    }
}

impl ElementIds {
    fn validate(&self) -> Result<(), ConfigError> {
        // placeholder is optional, an empty selector disables it
        for (field, value) in [
            ("start_button", &self.start_button),
            ("game_area", &self.game_area),
            ("score", &self.score),
            ("timer", &self.timer),
            ("message", &self.message),
            ("heart_class", &self.heart_class),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::EmptyElementId(field));
            }
        }
        Ok(())
    }
}
