//! Browser shell: wires a [`Round`] to the page markup, keyboard input,
//! local storage and the word fetch chain.
//!
//! State lives in a thread-local (the page is single-threaded). Event
//! closures are leaked with `forget()` since they live as long as the page.
//! Async word loads carry a generation number so a result arriving after
//! the player started another round is dropped.

use std::cell::RefCell;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::{JsFuture, spawn_local};
use web_sys::window;

use crate::catalog::Pick;
use crate::config::GameConfig;
use crate::error::PenduError;
use crate::round::{GuessOutcome, Round, Status, normalize_key};
use crate::scores::{KeyValueStore, MemoryStore, Scoreboard};

mod fetch;
mod storage;
mod view;

pub use storage::LocalStore;
use view::View;

const ALREADY_TRIED: &str = "Vous avez déjà essayé cette lettre !";
const COPIED: &str = "Score copié dans le presse-papier!";

struct App {
    config: GameConfig,
    view: View,
    store: Box<dyn KeyValueStore>,
    scores: Scoreboard,
    /// `None` while the next word is loading.
    round: Option<Round>,
    /// Word of the latest round, kept through the next load for sharing.
    last_word: String,
    generation: u64,
}

thread_local! {
    static APP: RefCell<Option<App>> = const { RefCell::new(None) };
}

fn with_app<R>(f: impl FnOnce(&mut App) -> R) -> Option<R> {
    APP.with(|cell| cell.borrow_mut().as_mut().map(f))
}

/// Logs DOM failures; a broken widget should not end the game.
fn report(what: &str, result: Result<(), JsValue>) {
    if let Err(err) = result {
        tracing::error!(what, error = %crate::error::describe_js(&err), "page update failed");
    }
}

pub fn start(config: GameConfig) -> Result<(), JsValue> {
    if APP.with(|cell| cell.borrow().is_some()) {
        tracing::warn!("game already started on this page");
        return Ok(());
    }
    crate::logging::init(&config.log_level);
    let win = window().ok_or_else(|| JsValue::from_str("no window"))?;
    let doc = win
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let view = View::locate(doc)?;

    view.build_keyboard(|button, letter| {
        let closure = Closure::wrap(Box::new(move |_evt: web_sys::MouseEvent| {
            guess_letter(letter);
        }) as Box<dyn FnMut(_)>);
        button.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    })?;

    let store: Box<dyn KeyValueStore> = match LocalStore::open() {
        Ok(store) => Box::new(store),
        Err(err) => {
            tracing::warn!(%err, "scores will not survive a reload");
            Box::new(MemoryStore::default())
        }
    };
    let scores = Scoreboard::load(store.as_ref(), &config);
    view.render_scores(&scores);
    tracing::info!(
        victories = scores.victories,
        defeats = scores.defeats,
        "pendu started"
    );

    register_listeners(&view)?;
    APP.with(|cell| {
        cell.replace(Some(App {
            config,
            view,
            store,
            scores,
            round: None,
            last_word: String::new(),
            generation: 0,
        }))
    });
    new_round();
    Ok(())
}

fn register_listeners(view: &View) -> Result<(), JsValue> {
    let win = window().ok_or_else(|| JsValue::from_str("no window"))?;

    // Physical keyboard: letters guess, Escape dismisses the result popup.
    {
        let closure = Closure::wrap(Box::new(move |evt: web_sys::KeyboardEvent| {
            let key = evt.key();
            if key == "Escape" {
                if with_app(|app| app.view.popup_visible()).unwrap_or(false) {
                    new_round();
                }
            } else if let Some(letter) = normalize_key(&key) {
                guess_letter(letter);
            }
        }) as Box<dyn FnMut(_)>);
        win.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    for target in [&view.play_button, &view.reset_button] {
        let closure = Closure::wrap(Box::new(move |_evt: web_sys::MouseEvent| {
            new_round();
        }) as Box<dyn FnMut(_)>);
        target.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    {
        let closure = Closure::wrap(Box::new(move |_evt: web_sys::Event| {
            new_round();
        }) as Box<dyn FnMut(_)>);
        view.difficulty_select()
            .add_event_listener_with_callback("change", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    {
        let closure = Closure::wrap(Box::new(move |_evt: web_sys::MouseEvent| {
            share_score();
        }) as Box<dyn FnMut(_)>);
        view.share_button
            .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }
    Ok(())
}

/// Resets the board and loads a fresh word in the background.
fn new_round() {
    let Some((generation, config)) = with_app(|app| {
        app.generation += 1;
        app.round = None;
        report("popup", app.view.hide_popup());
        report("misses", app.view.render_misses(None));
        report("keyboard", app.view.render_keyboard(None));
        report("loading", app.view.show_loading());
        (app.generation, app.config.clone())
    }) else {
        return;
    };

    spawn_local(async move {
        let pick = fetch::load_pick(&config).await;
        with_app(|app| {
            if app.generation != generation {
                tracing::debug!(word = %pick.word, "dropping word of a superseded round");
                return;
            }
            begin_round(app, pick);
        });
    });
}

fn begin_round(app: &mut App, pick: Pick) {
    tracing::info!(source = ?pick.source, theme = ?pick.theme, "new round");
    let round = Round::new(pick, app.config.max_wrong);
    report("word", app.view.render_word(&round));
    app.last_word = round.word().to_owned();
    let finished = round.status() != Status::Playing;
    app.round = Some(round);
    if finished {
        finish_round(app);
    }
}

/// Records the result of the current round and shows the popup.
fn finish_round(app: &mut App) {
    let Some(round) = app.round.as_ref() else {
        return;
    };
    let status = round.status();
    if status == Status::Playing {
        return;
    }
    app.scores.record(status);
    app.view.render_scores(&app.scores);
    if let Err(err) = app.scores.save(app.store.as_mut(), &app.config) {
        tracing::warn!(%err, "could not persist scores");
    }
    report("result", app.view.show_result(status, round.word()));
}

fn guess_letter(letter: char) {
    with_app(|app| {
        let Some(round) = app.round.as_mut() else {
            return;
        };
        let outcome = round.guess(letter);
        tracing::debug!(%letter, ?outcome, "guess");
        match outcome {
            GuessOutcome::Ignored => return,
            GuessOutcome::AlreadyTried => {
                report("notify", app.view.notify(ALREADY_TRIED, app.config.notification_ms));
                return;
            }
            GuessOutcome::Revealed { .. } => {
                report("word", app.view.render_word(round));
            }
            GuessOutcome::Missed { .. } => {
                report("misses", app.view.render_misses(Some(&*round)));
                vibrate(app.config.vibrate_ms);
            }
        }
        report("keyboard", app.view.render_keyboard(Some(&*round)));
        if round.status() != Status::Playing {
            finish_round(app);
        }
    });
}

fn vibrate(ms: u32) {
    let Some(navigator) = window().map(|w| w.navigator()) else {
        return;
    };
    if js_sys::Reflect::has(&navigator, &JsValue::from_str("vibrate")).unwrap_or(false) {
        navigator.vibrate_with_duration(ms);
    }
}

/// Calls `navigator.<method>(arg)` if the browser has it and awaits the promise.
async fn call_navigator(method: &str, arg: &JsValue) -> Result<(), PenduError> {
    let win = window().ok_or(PenduError::Js("no window".into()))?;
    let navigator = win.navigator();
    let (target, name) = match method.split_once('.') {
        Some((object, name)) => (
            js_sys::Reflect::get(&navigator, &JsValue::from_str(object))
                .map_err(|e| PenduError::from_js(&e))?,
            name,
        ),
        None => (navigator.into(), method),
    };
    let function: js_sys::Function = js_sys::Reflect::get(&target, &JsValue::from_str(name))
        .ok()
        .and_then(|f| f.dyn_into().ok())
        .ok_or_else(|| PenduError::Js(format!("navigator.{method} is not supported")))?;
    let promise: js_sys::Promise = function
        .call1(&target, arg)
        .map_err(|e| PenduError::from_js(&e))?
        .dyn_into()
        .map_err(|v| PenduError::from_js(&v))?;
    JsFuture::from(promise)
        .await
        .map(|_| ())
        .map_err(|e| PenduError::from_js(&e))
}

fn share_message() -> Option<String> {
    with_app(|app| app.scores.share_text(&app.last_word))
}

/// Web Share API when available, clipboard copy otherwise.
fn share_score() {
    let Some(text) = share_message() else {
        return;
    };

    spawn_local(async move {
        let data = js_sys::Object::new();
        let _ = js_sys::Reflect::set(&data, &"title".into(), &"Mon score au Pendu".into());
        let _ = js_sys::Reflect::set(&data, &"text".into(), &JsValue::from_str(&text));
        let shared = call_navigator("share", &data).await;
        let Err(err) = shared else {
            return;
        };
        tracing::info!(%err, "share unavailable, copying to clipboard");
        let copied = match call_navigator("clipboard.writeText", &JsValue::from_str(&text)).await {
            Ok(()) => true,
            Err(err) => {
                tracing::info!(%err, "clipboard unavailable, copying through a textarea");
                with_app(|app| app.view.copy_text(&text))
                    .unwrap_or(Ok(false))
                    .unwrap_or_else(|err| {
                        tracing::error!(error = %crate::error::describe_js(&err), "copy failed");
                        false
                    })
            }
        };
        if copied {
            with_app(|app| report("notify", app.view.notify(COPIED, app.config.notification_ms)));
        } else {
            tracing::error!("could not copy score");
        }
    });
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn document() -> web_sys::Document {
        window().unwrap().document().unwrap()
    }

    fn ensure_started() {
        if with_app(|_| ()).is_none() {
            document()
                .body()
                .unwrap()
                .set_inner_html(include_str!("../../www/index.html"));
            start(GameConfig::default()).unwrap();
        }
    }

    /// Installs `word` as the current round, superseding any pending load.
    fn load(word: &str) {
        let config = GameConfig {
            fallback_word: word.into(),
            ..GameConfig::default()
        };
        with_app(|app| {
            app.generation += 1;
            begin_round(app, Pick::builtin(&config));
        })
        .unwrap();
    }

    fn press(key: &str) {
        let init = web_sys::KeyboardEventInit::new();
        init.set_key(key);
        let event = web_sys::KeyboardEvent::new_with_keyboard_event_init_dict("keydown", &init).unwrap();
        window().unwrap().dispatch_event(&event).unwrap();
    }

    #[wasm_bindgen_test]
    fn second_start_does_not_double_listeners() {
        ensure_started();
        start(GameConfig::default()).unwrap();
        load("rust");
        let notif = document().query_selector(".notif").unwrap().unwrap();
        notif.class_list().remove_1("afficher").unwrap();

        press("R");

        let correct = with_app(|app| app.round.as_ref().unwrap().correct_letters().to_vec());
        assert_eq!(correct, Some(vec!['r']));
        assert!(!notif.class_list().contains("afficher"));
    }

    #[wasm_bindgen_test]
    fn share_keeps_previous_word_while_loading() {
        ensure_started();
        load("forêt");
        new_round();
        assert!(with_app(|app| app.round.is_none()).unwrap());
        assert!(share_message().unwrap().ends_with("\"forêt\"."));
    }

    #[wasm_bindgen_test]
    fn word_without_letters_is_recorded_on_arrival() {
        ensure_started();
        let before = with_app(|app| app.scores.victories).unwrap();
        load("-");
        assert_eq!(with_app(|app| app.scores.victories), Some(before + 1));
        assert!(with_app(|app| app.view.popup_visible()).unwrap());
    }

    #[wasm_bindgen_test]
    fn textarea_copy_leaves_no_element_behind() {
        ensure_started();
        assert!(with_app(|app| app.view.copy_text("score")).unwrap().is_ok());
        assert!(document().query_selector("textarea").unwrap().is_none());
    }
}
