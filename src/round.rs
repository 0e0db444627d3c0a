//! State of a single round: guessed letters, the masked word and the outcome.

use crate::accents::{fold_char, is_guessable, same_letter};
use crate::catalog::Pick;

/// Whether the theme hint is shown.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Difficulty {
    #[default]
    Easy,
    Hard,
}

impl Difficulty {
    /// Parses a `<select>` value; anything but `"easy"` plays hard.
    pub fn from_value(value: &str) -> Self {
        if value == "easy" {
            Difficulty::Easy
        } else {
            Difficulty::Hard
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    Playing,
    Won,
    Lost,
}

/// Masked view of one char of the hidden word.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Slot {
    Space,
    Hyphen,
    Hidden,
    Revealed(char),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GuessOutcome {
    /// Char positions of the word that the letter matched.
    Revealed { positions: Vec<usize> },
    Missed { wrong_count: usize },
    AlreadyTried,
    /// Round over or not a letter.
    Ignored,
}

pub struct Round {
    pick: Pick,
    correct: Vec<char>,
    wrong: Vec<char>,
    max_wrong: usize,
    status: Status,
}

/// Lowercases a DOM `KeyboardEvent.key` and keeps it only when it is a
/// single guessable letter (`a-z` or `à-ÿ`).
pub fn normalize_key(key: &str) -> Option<char> {
    let lower = key.to_lowercase();
    let mut chars = lower.chars();
    let c = chars.next()?;
    if chars.next().is_some() {
        return None;
    }
    let in_range = c.is_ascii_lowercase() || ('à'..='ÿ').contains(&c);
    (in_range && is_guessable(c)).then_some(c)
}

impl Round {
    /// A word with nothing to guess (only spaces and hyphens) starts won.
    pub fn new(pick: Pick, max_wrong: usize) -> Self {
        let mut round = Self {
            pick,
            correct: Vec::new(),
            wrong: Vec::new(),
            max_wrong,
            status: Status::Playing,
        };
        if round.is_solved() {
            round.status = Status::Won;
            tracing::info!(word = %round.pick.word, "round won without a guess");
        }
        round
    }

    pub fn pick(&self) -> &Pick {
        &self.pick
    }

    pub fn word(&self) -> &str {
        &self.pick.word
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn wrong_letters(&self) -> &[char] {
        &self.wrong
    }

    pub fn correct_letters(&self) -> &[char] {
        &self.correct
    }

    pub fn max_wrong(&self) -> usize {
        self.max_wrong
    }

    pub fn guess(&mut self, letter: char) -> GuessOutcome {
        if self.status != Status::Playing || !is_guessable(letter) {
            return GuessOutcome::Ignored;
        }

        let positions: Vec<usize> = self
            .pick
            .word
            .chars()
            .enumerate()
            .filter(|&(_, c)| same_letter(c, letter))
            .map(|(i, _)| i)
            .collect();

        if positions.is_empty() {
            if self.wrong.iter().any(|&w| same_letter(w, letter)) {
                return GuessOutcome::AlreadyTried;
            }
            self.wrong.push(letter);
            if self.wrong.len() >= self.max_wrong {
                self.status = Status::Lost;
                tracing::info!(word = %self.pick.word, "round lost");
            }
            return GuessOutcome::Missed {
                wrong_count: self.wrong.len(),
            };
        }

        if self.correct.iter().any(|&c| same_letter(c, letter)) {
            return GuessOutcome::AlreadyTried;
        }
        // Every accented variant present in the word is revealed at once.
        for c in self.pick.word.chars() {
            if same_letter(c, letter) && !self.correct.contains(&c) {
                self.correct.push(c);
            }
        }
        if !self.correct.contains(&letter) {
            self.correct.push(letter);
        }
        if self.is_solved() {
            self.status = Status::Won;
            tracing::info!(word = %self.pick.word, "round won");
        }
        GuessOutcome::Revealed { positions }
    }

    pub fn slots(&self) -> Vec<Slot> {
        self.pick
            .word
            .chars()
            .map(|c| match c {
                ' ' => Slot::Space,
                '-' => Slot::Hyphen,
                c if self.correct.contains(&c) => Slot::Revealed(c),
                _ => Slot::Hidden,
            })
            .collect()
    }

    pub fn is_solved(&self) -> bool {
        self.pick
            .word
            .chars()
            .all(|c| c == ' ' || c == '-' || self.correct.contains(&c))
    }

    /// Whether a keyboard letter was already played, accents ignored.
    pub fn is_letter_used(&self, letter: char) -> bool {
        let base = fold_char(letter);
        self.correct
            .iter()
            .chain(self.wrong.iter())
            .any(|&c| fold_char(c) == base)
    }

    pub fn theme_label(&self, difficulty: Difficulty) -> &str {
        match difficulty {
            Difficulty::Easy => self.pick.theme.as_deref().unwrap_or("Inconnu"),
            Difficulty::Hard => "Indisponible en mode difficile",
        }
    }

    /// Number of gallows parts to show.
    pub fn hangman_parts_visible(&self) -> usize {
        self.wrong.len()
    }
}
