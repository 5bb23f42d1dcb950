use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::{RoundResult, SessionState, Team, TeamSummary};

/// Raw operator input for one team: a display name and a newline-separated
/// word block, both exactly as typed into the upload form.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TeamDraft {
    pub name: String,
    pub words: String,
}

/// Messages from the console to the server.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum ClientMessage {
    CreateSession { team_one: TeamDraft, team_two: TeamDraft },
    Start,
    Pause,
    MarkCorrect,
    SkipWord,
    SwitchTeam,
    NextRound,
    ToggleResults,
    ResetSession,
    /// Ask for a fresh snapshot without changing anything.
    Refresh,
}

/// Messages from the server to every connected console.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum ServerMessage {
    SessionUpdate {
        state: SessionState,
        teams: [Team; 2],
        summaries: [TeamSummary; 2],
    },
    /// The clock hit zero and the turn was folded into the ledger.
    RoundEnded { result: RoundResult },
    SessionCleared,
    /// A command was understood but cannot apply to the current state.
    Warning { message: String },
    Error { message: String },
}
