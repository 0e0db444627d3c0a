//! Game configuration. Every field has a default so pages can pass partial JSON.

use serde::Deserialize;

use crate::catalog::is_valid_word;
use crate::error::PenduError;

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct GameConfig {
    /// Wrong guesses allowed before the round is lost.
    pub max_wrong: usize,
    pub themes_url: String,
    pub words_url: String,
    /// Last-resort word when neither data file yields one.
    pub fallback_word: String,
    pub fallback_theme: String,
    pub victories_key: String,
    pub defeats_key: String,
    pub notification_ms: i32,
    /// Upper bound on redraws when the themed catalog yields unusable entries.
    pub max_draws: u32,
    pub vibrate_ms: u32,
    pub log_level: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            max_wrong: 6,
            themes_url: "theme.json".into(),
            words_url: "mots.json".into(),
            fallback_word: "javascript".into(),
            fallback_theme: "Programmation".into(),
            victories_key: "pendu_victories".into(),
            defeats_key: "pendu_defeats".into(),
            notification_ms: 2000,
            max_draws: 32,
            vibrate_ms: 100,
            log_level: "info".into(),
        }
    }
}

impl GameConfig {
    /// Parses partial JSON over the defaults and validates the result.
    pub fn from_json(text: &str) -> Result<Self, PenduError> {
        let config: GameConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), PenduError> {
        if self.max_wrong == 0 {
            return Err(PenduError::Config("max_wrong must be at least 1".into()));
        }
        if self.max_draws == 0 {
            return Err(PenduError::Config("max_draws must be at least 1".into()));
        }
        if !is_valid_word(&self.fallback_word) {
            return Err(PenduError::Config(format!(
                "fallback word {:?} is not a playable word",
                self.fallback_word
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg = GameConfig::from_json(r#"{ "max_wrong": 8, "themes_url": "data/themes.json" }"#)
            .unwrap();
        assert_eq!(cfg.max_wrong, 8);
        assert_eq!(cfg.themes_url, "data/themes.json");
        assert_eq!(cfg.words_url, "mots.json");
        assert_eq!(cfg.victories_key, "pendu_victories");
    }

    #[test]
    fn empty_object_is_default() {
        assert_eq!(GameConfig::from_json("{}").unwrap(), GameConfig::default());
    }

    #[test]
    fn rejects_zero_limits_and_bad_fallback() {
        assert!(matches!(
            GameConfig::from_json(r#"{ "max_wrong": 0 }"#),
            Err(PenduError::Config(_))
        ));
        assert!(matches!(
            GameConfig::from_json(r#"{ "max_draws": 0 }"#),
            Err(PenduError::Config(_))
        ));
        assert!(matches!(
            GameConfig::from_json(r#"{ "fallback_word": "c++" }"#),
            Err(PenduError::Config(_))
        ));
        assert!(matches!(
            GameConfig::from_json("[1, 2]"),
            Err(PenduError::Json(_))
        ));
    }
}
