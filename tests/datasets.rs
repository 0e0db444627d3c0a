// Invariants for the word files shipped in www/.
// These tests are native-friendly and avoid wasm/browser APIs.

use std::collections::HashSet;

use pendu::accents::fold_accents;
use pendu::catalog::{is_valid_word, parse_themes, parse_word_list};

const THEMES: &str = include_str!("../www/theme.json");
const WORDS: &str = include_str!("../www/mots.json");

#[test]
fn themed_words_are_playable() {
    let themes = parse_themes(THEMES).expect("theme.json parses");
    assert!(!themes.is_empty());
    for theme in &themes {
        assert!(!theme.name.is_empty(), "theme without name");
        assert!(!theme.lists.is_empty(), "theme '{}' has no lists", theme.name);
        for list in theme.lists.iter().filter(|l| l.letter != " ") {
            assert!(!list.words.is_empty(), "empty list '{}' in '{}'", list.letter, theme.name);
            for word in &list.words {
                assert!(is_valid_word(word), "unplayable word '{}' in '{}'", word, theme.name);
                let initial = fold_accents(&word.to_lowercase()).chars().next().unwrap();
                assert_eq!(
                    initial.to_string(),
                    list.letter.to_lowercase(),
                    "word '{}' filed under '{}'",
                    word,
                    list.letter
                );
            }
        }
    }
}

#[test]
fn theme_names_are_unique() {
    let themes = parse_themes(THEMES).unwrap();
    let mut seen = HashSet::new();
    for theme in &themes {
        assert!(seen.insert(theme.name.as_str()), "duplicate theme '{}'", theme.name);
    }
}

#[test]
fn alternate_list_is_playable_and_unique() {
    let words = parse_word_list(WORDS).expect("mots.json parses");
    assert!(!words.is_empty());
    let mut seen = HashSet::new();
    for word in &words {
        assert!(is_valid_word(word), "unplayable alternate word '{}'", word);
        assert!(seen.insert(word.as_str()), "duplicate alternate word '{}'", word);
    }
}
