use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Which of the two fixed slots a team occupies. Slot A always plays the
/// first turn of every round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum TeamColor {
    A,
    B,
}

/// Lifetime tallies for one team, folded in once per completed round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TeamHistory {
    pub rounds_played: u32,
    pub total_words_guessed: u32,
    pub best_round: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Team {
    pub name: String,
    /// Words this team has not consumed yet. Seeded from the shared deck,
    /// then drained independently of the other team's queue.
    pub words: Vec<String>,
    pub score: u32,
    pub color: TeamColor,
    pub history: TeamHistory,
}
