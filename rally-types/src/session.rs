use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::TeamColor;

/// Immutable record of one completed round, appended when the clock
/// reaches zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RoundResult {
    pub round_number: u32,
    /// Keyed by team display name; holds the turn score of the team that
    /// just played.
    pub team_scores: HashMap<String, u32>,
    pub words_guessed: u32,
    pub timestamp: String, // ISO 8601 string
}

/// Everything a console needs to render the session.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SessionState {
    pub is_playing: bool,
    pub current_round: u32,
    /// 0 or 1, indexing into the fixed two-team array.
    pub current_team: u32,
    pub current_word_index: u32,
    pub time_left: u32,
    /// Correct guesses in the turn underway; folded into the team score
    /// only when the round ends.
    pub round_score: u32,
    pub round_history: Vec<RoundResult>,
    pub results_visible: bool,
}

/// One row of the results modal.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TeamSummary {
    pub name: String,
    pub color: TeamColor,
    pub score: u32,
    pub rounds_played: u32,
    pub best_round: u32,
    pub average_words_per_round: f64,
}
