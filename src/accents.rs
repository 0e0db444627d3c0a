//! Accent folding so that `e` finds `é`, `è`, `ê` and `ë` in the hidden word.

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Maps an accented Latin letter to its ASCII base letter (`ç` -> `c`).
/// Chars without such a base are returned unchanged.
pub fn fold_char(c: char) -> char {
    if c.is_ascii() {
        return c;
    }
    let mut parts = std::iter::once(c).nfd();
    match parts.next() {
        Some(base) if base.is_ascii() && parts.all(is_combining_mark) => base,
        _ => c,
    }
}

pub fn fold_accents(s: &str) -> String {
    s.chars().map(fold_char).collect()
}

/// True when the char folds to one of the 26 keyboard letters.
pub fn is_guessable(c: char) -> bool {
    fold_char(c).is_ascii_lowercase()
}

/// Accent-insensitive equality of two letters.
pub fn same_letter(a: char, b: char) -> bool {
    fold_char(a) == fold_char(b)
}
