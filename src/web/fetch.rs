use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Response, window};

use crate::catalog::{OsRandom, Pick, parse_themes, parse_word_list, resolve_chain};
use crate::config::GameConfig;
use crate::error::PenduError;

/// GETs `url` and returns the body. Non-2xx statuses are errors.
pub async fn fetch_text(url: &str) -> Result<String, PenduError> {
    let win = window().ok_or(PenduError::Js("no window".into()))?;
    let response: Response = JsFuture::from(win.fetch_with_str(url))
        .await
        .map_err(|e| PenduError::from_js(&e))?
        .dyn_into()
        .map_err(|v| PenduError::from_js(&v))?;
    if !response.ok() {
        return Err(PenduError::Http {
            url: url.to_owned(),
            status: response.status(),
        });
    }
    let body = response.text().map_err(|e| PenduError::from_js(&e))?;
    JsFuture::from(body)
        .await
        .map_err(|e| PenduError::from_js(&e))?
        .as_string()
        .ok_or_else(|| PenduError::Js(format!("body of {url} is not text")))
}

/// Word for the next round: themed catalog, alternate list, built-in word.
pub async fn load_pick(config: &GameConfig) -> Pick {
    let mut rng = OsRandom;
    resolve_chain(
        async { parse_themes(&fetch_text(&config.themes_url).await?) },
        async { parse_word_list(&fetch_text(&config.words_url).await?) },
        &mut rng,
        config,
    )
    .await
}
