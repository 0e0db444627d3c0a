// Integration tests (native) for the `pendu` crate.
// They drive whole rounds through the public API, including score persistence.

use pendu::catalog::{RandomIndex, parse_themes, select_from_themes};
use pendu::{GameConfig, GuessOutcome, MemoryStore, Pick, Round, Scoreboard, Slot, Status};
use pretty_assertions::assert_eq;

struct Fixed(usize);

impl RandomIndex for Fixed {
    fn pick(&mut self, len: usize) -> usize {
        self.0 % len
    }
}

fn round_for(word: &str) -> Round {
    let config = GameConfig {
        fallback_word: word.into(),
        ..GameConfig::default()
    };
    Round::new(Pick::builtin(&config), config.max_wrong)
}

#[test]
fn full_win_updates_and_persists_scores() {
    let config = GameConfig::default();
    let mut store = MemoryStore::default();
    let mut scores = Scoreboard::load(&store, &config);

    let mut round = round_for("pomme de terre");
    for c in "pomdetr".chars() {
        assert!(matches!(round.guess(c), GuessOutcome::Revealed { .. }), "{c}");
    }
    assert_eq!(round.status(), Status::Won);
    assert!(round.slots().iter().all(|s| !matches!(s, Slot::Hidden)));

    scores.record(round.status());
    scores.save(&mut store, &config).unwrap();
    assert_eq!(
        Scoreboard::load(&store, &config),
        Scoreboard {
            victories: 1,
            defeats: 0
        }
    );
}

#[test]
fn full_loss_with_custom_limit() {
    let config = GameConfig::from_json(r#"{ "max_wrong": 3 }"#).unwrap();
    let mut round = Round::new(Pick::builtin(&config), config.max_wrong);
    assert_eq!(round.word(), "javascript");
    for c in ['x', 'y', 'z'] {
        round.guess(c);
    }
    assert_eq!(round.status(), Status::Lost);
    assert_eq!(round.wrong_letters(), &['x', 'y', 'z']);

    let mut scores = Scoreboard::default();
    scores.record(round.status());
    assert_eq!(scores.defeats, 1);
    assert!(scores.share_text(round.word()).ends_with("\"javascript\"."));
}

#[test]
fn accented_word_from_catalog_is_solvable_with_plain_keys() {
    let themes = parse_themes(include_str!("../www/theme.json")).unwrap();
    // Fixed(1): theme "Fruits et légumes", list "F", word "fève"
    let pick = select_from_themes(&themes, &mut Fixed(1), 8).unwrap();
    assert_eq!(pick.word, "fève");
    assert_eq!(pick.folded, "feve");
    assert_eq!(pick.theme.as_deref(), Some("Fruits et légumes"));

    let mut round = Round::new(pick, 6);
    assert_eq!(
        round.guess('e'),
        GuessOutcome::Revealed {
            positions: vec![1, 3]
        }
    );
    round.guess('f');
    round.guess('v');
    assert_eq!(round.status(), Status::Won);
    assert_eq!(
        round.slots(),
        vec![
            Slot::Revealed('f'),
            Slot::Revealed('è'),
            Slot::Revealed('v'),
            Slot::Revealed('e'),
        ]
    );
}
