use std::collections::HashMap;

use tracing::{debug, info};

use rally_types::{RoundResult, SessionError, SessionState, Team, TeamDraft};

use crate::{deck, ledger};

/// Fixed turn budget in seconds.
pub const ROUND_SECONDS: u32 = 90;

/// How the operator dismissed the word on display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuessOutcome {
    Correct,
    Skip,
}

/// Operator intents plus the service-driven clock tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    Pause,
    Tick,
    Advance(GuessOutcome),
    SwitchTeam,
    NextRound,
    ToggleResults,
}

/// What applying a command did to the session.
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    /// State changed; consoles need a fresh snapshot.
    Changed,
    /// The command does not apply to the current state. Consoles keep
    /// sending button presses that raced a transition; those are dropped.
    Ignored,
    /// The clock hit zero: the turn was recorded and folded into the
    /// playing team's ledger.
    RoundOver(RoundResult),
}

/// One live game: two team ledgers plus the turn state machine that
/// drains them.
#[derive(Debug)]
pub struct GameSession {
    teams: [Team; 2],
    state: SessionState,
}

impl GameSession {
    /// Build the shared deck from both word blocks and seed two
    /// independent team ledgers with it.
    pub fn new(team_one: &TeamDraft, team_two: &TeamDraft) -> Result<Self, SessionError> {
        let deck = deck::build_deck(&team_one.words, &team_two.words)?;
        info!("Session created with {} deck words", deck.len());
        Ok(Self {
            teams: ledger::seed_teams(deck, team_one, team_two),
            state: SessionState {
                is_playing: false,
                current_round: 1,
                current_team: 0,
                current_word_index: 0,
                time_left: ROUND_SECONDS,
                round_score: 0,
                round_history: Vec::new(),
                results_visible: false,
            },
        })
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn teams(&self) -> &[Team; 2] {
        &self.teams
    }

    pub fn is_playing(&self) -> bool {
        self.state.is_playing
    }

    pub fn current_team(&self) -> &Team {
        &self.teams[self.state.current_team as usize]
    }

    /// The transition table. Every `(state, command)` pairing not listed
    /// here is ignored rather than rejected.
    pub fn apply(&mut self, command: Command) -> Result<Step, SessionError> {
        match (self.state.is_playing, command) {
            (false, Command::Start) => self.start(),
            (true, Command::Pause) => Ok(self.pause()),
            (true, Command::Tick) => Ok(self.tick()),
            (true, Command::Advance(outcome)) => self.advance(outcome),
            (false, Command::SwitchTeam) => Ok(self.switch_team()),
            (false, Command::NextRound) => Ok(self.next_round()),
            (_, Command::ToggleResults) => Ok(self.toggle_results()),
            (_, command) => {
                debug!(
                    "Ignoring {:?} while is_playing={}",
                    command, self.state.is_playing
                );
                Ok(Step::Ignored)
            }
        }
    }

    fn start(&mut self) -> Result<Step, SessionError> {
        if self.current_team().words.is_empty() {
            return Err(SessionError::NoWordsRemaining);
        }
        // Starting is never a resume: a paused turn's remaining time and
        // partial score are discarded and the team gets a full budget.
        self.state.is_playing = true;
        self.state.time_left = ROUND_SECONDS;
        self.state.round_score = 0;
        info!(
            "Round {} started for {}",
            self.state.current_round,
            self.current_team().name
        );
        Ok(Step::Changed)
    }

    fn pause(&mut self) -> Step {
        // Keeps time_left, round_score and the word cursor; records nothing.
        self.state.is_playing = false;
        Step::Changed
    }

    fn tick(&mut self) -> Step {
        if self.state.time_left > 0 {
            self.state.time_left -= 1;
        }
        if self.state.time_left == 0 {
            return Step::RoundOver(self.end_round());
        }
        Step::Changed
    }

    fn advance(&mut self, outcome: GuessOutcome) -> Result<Step, SessionError> {
        let index = self.state.current_word_index as usize;
        let team = &mut self.teams[self.state.current_team as usize];
        if team.words.is_empty() {
            return Err(SessionError::NoWordsRemaining);
        }
        let word = team.words.remove(index);
        if outcome == GuessOutcome::Correct {
            self.state.round_score += 1;
        }
        // Removal shifts the next word into the cursor slot; wrap to the
        // front once the cursor runs past the shortened queue.
        if index >= self.current_team().words.len() {
            self.state.current_word_index = 0;
        }
        debug!("Word {:?} consumed as {:?}", word, outcome);
        Ok(Step::Changed)
    }

    fn end_round(&mut self) -> RoundResult {
        let round_score = self.state.round_score;
        let team = &mut self.teams[self.state.current_team as usize];
        ledger::record_round(team, round_score);
        info!(
            "Round {} over for {}: {} words guessed",
            self.state.current_round, team.name, round_score
        );
        let result = RoundResult {
            round_number: self.state.current_round,
            team_scores: HashMap::from([(team.name.clone(), round_score)]),
            words_guessed: round_score,
            timestamp: chrono::Utc::now().to_rfc3339(),
        };
        self.state.round_history.push(result.clone());
        self.state.is_playing = false;
        result
    }

    fn switch_team(&mut self) -> Step {
        self.state.current_team ^= 1;
        self.reset_turn();
        Step::Changed
    }

    fn next_round(&mut self) -> Step {
        self.state.current_round += 1;
        self.state.current_team = 0;
        self.reset_turn();
        Step::Changed
    }

    fn toggle_results(&mut self) -> Step {
        self.state.results_visible = !self.state.results_visible;
        Step::Changed
    }

    fn reset_turn(&mut self) {
        self.state.current_word_index = 0;
        self.state.time_left = ROUND_SECONDS;
        self.state.round_score = 0;
    }
}
