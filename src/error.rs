//! Error type shared by the word catalog, score persistence and browser shell.

use wasm_bindgen::JsValue;

#[derive(Debug, thiserror::Error)]
pub enum PenduError {
    /// Static data file answered with a non-success status.
    #[error("HTTP error {status} while fetching {url}")]
    Http { url: String, status: u16 },

    /// A browser API rejected or threw.
    #[error("browser error: {0}")]
    Js(String),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("no theme found")]
    EmptyCatalog,

    #[error("no word in draw")]
    NoWords,

    /// Every draw produced a word with unsupported characters.
    #[error("no valid word after {attempts} draws")]
    NoValidWord { attempts: u32 },

    #[error("storage error: {0}")]
    Storage(String),

    #[error("missing page element {0}")]
    MissingElement(&'static str),

    #[error("configuration error: {0}")]
    Config(String),
}

impl PenduError {
    /// Wraps a thrown JS value, keeping its string form when there is one.
    pub fn from_js(value: &JsValue) -> Self {
        PenduError::Js(describe_js(value))
    }
}

impl From<PenduError> for JsValue {
    fn from(err: PenduError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

pub(crate) fn describe_js(value: &JsValue) -> String {
    value
        .as_string()
        .unwrap_or_else(|| format!("{value:?}"))
}
