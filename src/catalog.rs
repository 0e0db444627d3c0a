//! Word catalog: themed word lists, the alternate flat list and the built-in
//! default, plus the random draws over them.

use serde::Deserialize;

use crate::accents::{fold_accents, is_guessable};
use crate::config::GameConfig;
use crate::error::PenduError;

/// One theme of `theme.json`, e.g. "Animaux" with one list per initial letter.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Theme {
    #[serde(rename = "Thème_")]
    pub name: String,
    #[serde(rename = "Listes", default)]
    pub lists: Vec<LetterList>,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct LetterList {
    #[serde(rename = "Lettre")]
    pub letter: String,
    #[serde(rename = "Mots", default)]
    pub words: Vec<String>,
}

/// Which level of the fallback chain produced the word.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PickSource {
    Themes,
    Alternate,
    Builtin,
}

/// The hidden word of a round together with where it came from.
#[derive(Clone, Debug, PartialEq)]
pub struct Pick {
    /// Lowercased word as shown once revealed.
    pub word: String,
    /// `word` with accents folded.
    pub folded: String,
    pub theme: Option<String>,
    pub letter: Option<String>,
    pub source: PickSource,
}

impl Pick {
    fn new(word: &str, theme: Option<String>, letter: Option<String>, source: PickSource) -> Self {
        let word = word.to_lowercase();
        let folded = fold_accents(&word);
        Self {
            word,
            folded,
            theme,
            letter,
            source,
        }
    }

    pub fn builtin(config: &GameConfig) -> Self {
        Self::new(
            &config.fallback_word,
            Some(config.fallback_theme.clone()),
            None,
            PickSource::Builtin,
        )
    }
}

/// Source of uniformly distributed indices.
pub trait RandomIndex {
    /// Returns an index in `0..len`; `len` is never zero.
    fn pick(&mut self, len: usize) -> usize;
}

/// Browser-backed randomness (`crypto.getRandomValues` under wasm).
#[derive(Debug, Default)]
pub struct OsRandom;

impl RandomIndex for OsRandom {
    fn pick(&mut self, len: usize) -> usize {
        let mut buf = [0u8; 8];
        if let Err(err) = getrandom::getrandom(&mut buf) {
            tracing::warn!(%err, "random source unavailable, using first entry");
            return 0;
        }
        (u64::from_le_bytes(buf) % len as u64) as usize
    }
}

/// Letters (accented or not), spaces and hyphens only, with at least one letter.
pub fn is_valid_word(word: &str) -> bool {
    let mut letters = 0usize;
    for c in word.chars() {
        match c {
            ' ' | '-' => {}
            c if c.is_ascii_alphabetic() || ('\u{C0}'..='\u{FF}').contains(&c) => {
                if !c.to_lowercase().all(is_guessable) {
                    return false;
                }
                letters += 1;
            }
            _ => return false,
        }
    }
    letters > 0
}

pub fn parse_themes(text: &str) -> Result<Vec<Theme>, PenduError> {
    Ok(serde_json::from_str(text)?)
}

pub fn parse_word_list(text: &str) -> Result<Vec<String>, PenduError> {
    Ok(serde_json::from_str(text)?)
}

/// Draws theme, then letter list, then word. Lists keyed by a blank letter
/// and words with unsupported characters are redrawn, up to `max_draws` times.
pub fn select_from_themes(
    themes: &[Theme],
    rng: &mut dyn RandomIndex,
    max_draws: u32,
) -> Result<Pick, PenduError> {
    if themes.is_empty() {
        return Err(PenduError::EmptyCatalog);
    }
    for _ in 0..max_draws {
        let theme = &themes[rng.pick(themes.len())];
        if theme.lists.is_empty() {
            return Err(PenduError::NoWords);
        }
        let list = &theme.lists[rng.pick(theme.lists.len())];
        if list.letter == " " {
            tracing::debug!(theme = %theme.name, "blank letter list, drawing again");
            continue;
        }
        if list.words.is_empty() {
            return Err(PenduError::NoWords);
        }
        let word = &list.words[rng.pick(list.words.len())];
        if word.is_empty() {
            return Err(PenduError::NoWords);
        }
        if !is_valid_word(word) {
            tracing::error!(word = %word, "word is not valid, drawing again");
            continue;
        }
        let pick = Pick::new(
            word,
            Some(theme.name.clone()),
            Some(list.letter.clone()),
            PickSource::Themes,
        );
        tracing::debug!(
            theme = %theme.name,
            letter = %list.letter,
            word = %pick.word,
            folded = %pick.folded,
            "picked themed word"
        );
        return Ok(pick);
    }
    Err(PenduError::NoValidWord {
        attempts: max_draws,
    })
}

/// Draws from the flat alternate list. Entries are not filtered.
pub fn select_from_list(
    words: &[String],
    rng: &mut dyn RandomIndex,
    config: &GameConfig,
) -> Result<Pick, PenduError> {
    if words.is_empty() {
        return Err(PenduError::NoWords);
    }
    let word = &words[rng.pick(words.len())];
    let pick = Pick::new(
        word,
        Some(config.fallback_theme.clone()),
        None,
        PickSource::Alternate,
    );
    tracing::debug!(word = %pick.word, folded = %pick.folded, "picked alternate word");
    Ok(pick)
}

/// Three-level fallback: themed catalog, then the alternate list, then the
/// built-in word. Sources are futures so `alternate` is only loaded when the
/// themed catalog fails.
pub async fn resolve_chain<P, A>(
    primary: P,
    alternate: A,
    rng: &mut dyn RandomIndex,
    config: &GameConfig,
) -> Pick
where
    P: Future<Output = Result<Vec<Theme>, PenduError>>,
    A: Future<Output = Result<Vec<String>, PenduError>>,
{
    let err = match primary
        .await
        .and_then(|themes| select_from_themes(&themes, &mut *rng, config.max_draws))
    {
        Ok(pick) => return pick,
        Err(err) => err,
    };
    tracing::error!(%err, "themed catalog failed, trying alternate list");
    match alternate
        .await
        .and_then(|words| select_from_list(&words, &mut *rng, config))
    {
        Ok(pick) => pick,
        Err(err) => {
            tracing::error!(%err, "alternate list failed, using built-in word");
            Pick::builtin(config)
        }
    }
}
