// Browser tests, run with `wasm-pack test --headless --firefox`.
#![cfg(target_arch = "wasm32")]

use pendu::{GameConfig, KeyValueStore, LocalStore, Scoreboard, Status};
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn scores_survive_in_local_storage() {
    let config = GameConfig::default();
    let mut store = LocalStore::open().expect("localStorage available in test browser");
    store.set("pendu_victories", "5").unwrap();
    store.set("pendu_defeats", "2 perdues").unwrap();

    let mut scores = Scoreboard::load(&store, &config);
    assert_eq!(scores, Scoreboard { victories: 5, defeats: 2 });

    scores.record(Status::Lost);
    scores.save(&mut store, &config).unwrap();

    let reopened = LocalStore::open().unwrap();
    assert_eq!(reopened.get("pendu_defeats").as_deref(), Some("3"));
    assert_eq!(Scoreboard::load(&reopened, &config), scores);
}

#[wasm_bindgen_test]
fn start_game_reports_missing_markup() {
    // The test page has none of the game elements.
    assert!(pendu::start_game().is_err());
}
