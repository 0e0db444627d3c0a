//! Win/loss counters persisted under two fixed keys.

use std::collections::HashMap;

use crate::config::GameConfig;
use crate::error::PenduError;
use crate::round::Status;

/// Minimal string key-value store (`localStorage` in the browser).
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), PenduError>;
}

/// In-memory store, used when browser storage is unavailable.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PenduError> {
        self.entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Scoreboard {
    pub victories: u32,
    pub defeats: u32,
}

/// Reads a counter the way `parseInt` would: leading whitespace, optional
/// `+`, then as many digits as present.
pub fn parse_count(raw: &str) -> Option<u32> {
    let s = raw.trim_start();
    let s = s.strip_prefix('+').unwrap_or(s);
    let end = s
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map_or(s.len(), |(i, _)| i);
    s[..end].parse().ok()
}

impl Scoreboard {
    pub fn load(store: &dyn KeyValueStore, config: &GameConfig) -> Self {
        let read = |key: &str| {
            let raw = store.get(key)?;
            let value = parse_count(&raw);
            if value.is_none() {
                tracing::warn!(key, raw = %raw, "ignoring unreadable score");
            }
            value
        };
        Self {
            victories: read(config.victories_key.as_str()).unwrap_or(0),
            defeats: read(config.defeats_key.as_str()).unwrap_or(0),
        }
    }

    pub fn save(&self, store: &mut dyn KeyValueStore, config: &GameConfig) -> Result<(), PenduError> {
        store.set(&config.victories_key, &self.victories.to_string())?;
        store.set(&config.defeats_key, &self.defeats.to_string())
    }

    pub fn record(&mut self, status: Status) {
        match status {
            Status::Won => self.victories = self.victories.saturating_add(1),
            Status::Lost => self.defeats = self.defeats.saturating_add(1),
            Status::Playing => {}
        }
    }

    pub fn share_text(&self, last_word: &str) -> String {
        format!(
            "J'ai joué au Pendu ! Score: {} victoires, {} défaites. Mon dernier mot était \"{}\".",
            self.victories, self.defeats, last_word
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_like_parse_int() {
        assert_eq!(parse_count("12"), Some(12));
        assert_eq!(parse_count("  7abc"), Some(7));
        assert_eq!(parse_count("+3"), Some(3));
        assert_eq!(parse_count("abc"), None);
        assert_eq!(parse_count(""), None);
        assert_eq!(parse_count("-2"), None);
    }

    #[test]
    fn missing_or_bad_values_load_as_zero() {
        let cfg = GameConfig::default();
        let mut store = MemoryStore::default();
        assert_eq!(Scoreboard::load(&store, &cfg), Scoreboard::default());

        store.set("pendu_victories", "4").unwrap();
        store.set("pendu_defeats", "NaN").unwrap();
        assert_eq!(
            Scoreboard::load(&store, &cfg),
            Scoreboard {
                victories: 4,
                defeats: 0
            }
        );
    }

    #[test]
    fn record_and_save() {
        let cfg = GameConfig::default();
        let mut store = MemoryStore::default();
        let mut board = Scoreboard::default();
        board.record(Status::Won);
        board.record(Status::Won);
        board.record(Status::Lost);
        board.record(Status::Playing);
        board.save(&mut store, &cfg).unwrap();

        assert_eq!(store.get("pendu_victories").as_deref(), Some("2"));
        assert_eq!(store.get("pendu_defeats").as_deref(), Some("1"));
        assert_eq!(Scoreboard::load(&store, &cfg), board);
    }

    #[test]
    fn share_text_mentions_score_and_word() {
        let board = Scoreboard {
            victories: 3,
            defeats: 1,
        };
        assert_eq!(
            board.share_text("forêt"),
            "J'ai joué au Pendu ! Score: 3 victoires, 1 défaites. Mon dernier mot était \"forêt\"."
        );
    }
}
