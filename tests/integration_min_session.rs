use typefall::{
    GameConfig, GameEvent, GameState, PhaseSpec, RankThresholds, Session, WordBank, WordGroup,
    WordRecord,
};

fn record(target: &str, value: u32) -> WordRecord {
    WordRecord {
        target: target.into(),
        display: target.into(),
        score_value: value,
    }
}

fn bank() -> WordBank {
    let mut bank = WordBank::new();
    bank.insert(WordGroup::new(
        "w",
        vec![record("ab", 100), record("cd", 100)],
    ));
    bank
}

fn score_phase(name: &str, transition_score: u32) -> PhaseSpec {
    PhaseSpec {
        name: name.into(),
        word_group: "w".into(),
        speed: 0.01,
        spawn_interval: 0.2,
        transition_score,
        duration: 0.0,
    }
}

fn score_gated_config() -> GameConfig {
    GameConfig {
        total_game_time: 120.0,
        phases: vec![
            score_phase("first", 100),
            score_phase("second", 300),
            score_phase("third", 600),
        ],
        combo_step: 0.1,
        max_combo_multiplier: 3.0,
        miss_penalty: 10,
        max_live_words: 3,
        lateral_band: 0.0,
        rank_thresholds: RankThresholds::default(),
    }
}

// Score-gated phases advance as the bot's combo builds:
// words are worth 100 * (1.1, 1.2, 1.3, ...) so the score passes 100,
// then 300, then 600, and the phase index follows without regressing.
#[test]
fn score_triggered_phases_advance_monotonically() {
    let mut session = Session::new();
    session.start_game(score_gated_config(), bank()).unwrap();
    session.drain_events();

    let mut indices = Vec::new();
    for _ in 0..500 {
        if let Some(expected) = session.matcher().expected_char() {
            session.key_char(expected);
        }
        session.update(0.2);
        indices.push(session.phase_index());
        if session.score() >= 650 {
            break;
        }
    }

    assert!(session.score() >= 650, "bot should pass the last threshold");
    assert_eq!(session.phase_index(), 2);
    assert!(indices.windows(2).all(|w| w[0] <= w[1]), "index regressed");
    assert!(indices.contains(&1), "middle phase should have been visited");
}

#[test]
fn miss_penalty_never_drives_score_negative() {
    let mut session = Session::new();
    session.start_game(score_gated_config(), bank()).unwrap();
    session.update(0.2); // spawn + target

    for _ in 0..5 {
        session.key_char('z'); // never matches "ab" or "cd"
        session.update(0.2);
    }

    assert_eq!(session.score(), 0);
    assert_eq!(session.scoring().miss_types(), 5);
    assert_eq!(session.scoring().combo(), 0);
}

#[test]
fn delete_signal_steps_cursor_back() {
    let mut session = Session::new();
    session.start_game(score_gated_config(), bank()).unwrap();
    session.update(0.2);

    let first = session.matcher().expected_char().unwrap();
    session.key_char(first);
    session.update(0.05);
    assert_eq!(session.matcher().cursor(), 1);

    session.delete_char();
    session.update(0.05);
    assert_eq!(session.matcher().cursor(), 0);

    // Deleting at zero is a no-op.
    session.delete_char();
    session.update(0.05);
    assert_eq!(session.matcher().cursor(), 0);
}

#[test]
fn command_cycle_emits_one_notification_per_transition() {
    let mut session = Session::new();
    session.start_game(score_gated_config(), bank()).unwrap();
    session.pause_game();
    session.resume_game();
    session.end_game();
    session.return_to_title();

    let states: Vec<GameState> = session
        .drain_events()
        .into_iter()
        .filter_map(|e| match e {
            GameEvent::StateChanged(s) => Some(s),
            _ => None,
        })
        .collect();

    assert_eq!(
        states,
        vec![
            GameState::Playing,
            GameState::Paused,
            GameState::Playing,
            GameState::Result,
            GameState::Title,
        ]
    );
}

#[test]
fn end_game_outside_playing_is_a_noop() {
    let mut session = Session::new();
    session.end_game();
    assert_eq!(session.state(), GameState::Title);
    assert!(session.drain_events().is_empty());
}

#[test]
fn restart_resets_score_and_phase() {
    let mut session = Session::new();
    session.start_game(score_gated_config(), bank()).unwrap();

    for _ in 0..200 {
        if let Some(expected) = session.matcher().expected_char() {
            session.key_char(expected);
        }
        session.update(0.2);
        if session.score() >= 110 {
            break;
        }
    }
    assert!(session.score() > 0);

    session.start_game(score_gated_config(), bank()).unwrap();
    assert_eq!(session.score(), 0);
    assert_eq!(session.phase_index(), 0);
    assert_eq!(session.scoring().cleared_words(), 0);
    assert_eq!(session.state(), GameState::Playing);
}
