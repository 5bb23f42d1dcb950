use rally_core::{Command, GameSession, GuessOutcome, Step};
use rally_types::{RoundResult, TeamDraft};

/// Creates a draft the way the upload form submits it
pub fn create_draft(name: &str, words: &str) -> TeamDraft {
    TeamDraft {
        name: name.to_string(),
        words: words.to_string(),
    }
}

/// Creates a session from two small word blocks with a known overlap
pub fn create_standard_session() -> GameSession {
    GameSession::new(
        &create_draft("A", "Cat\napple\nCAT\n"),
        &create_draft("B", "banana\n"),
    )
    .unwrap()
}

/// Creates a session with enough words for several full turns
pub fn create_deep_session() -> GameSession {
    let words: String = (0..30).map(|i| format!("word{i}\n")).collect();
    GameSession::new(&create_draft("A", &words), &create_draft("B", "")).unwrap()
}

/// Runs ticks until the live round ends, returning its record
pub fn drain_clock(game: &mut GameSession) -> RoundResult {
    loop {
        match game.apply(Command::Tick).unwrap() {
            Step::RoundOver(result) => return result,
            Step::Changed => {}
            Step::Ignored => panic!("tick ignored while the round is live"),
        }
    }
}

/// Plays one full turn: start, mark `correct` words correct, run out the clock
pub fn play_turn(game: &mut GameSession, correct: u32) -> RoundResult {
    game.apply(Command::Start).unwrap();
    for _ in 0..correct {
        game.apply(Command::Advance(GuessOutcome::Correct)).unwrap();
    }
    drain_clock(game)
}
