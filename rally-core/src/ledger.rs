use rally_types::{Team, TeamColor, TeamDraft, TeamHistory};

/// Display names used when the operator leaves a name field blank.
pub const DEFAULT_TEAM_NAMES: [&str; 2] = ["NOVA", "ENIGMA"];

/// Seed both team ledgers from one shared deck. The queues start with
/// identical content but are independent containers afterwards; draining
/// one never touches the other.
pub fn seed_teams(deck: Vec<String>, one: &TeamDraft, two: &TeamDraft) -> [Team; 2] {
    [
        new_team(display_name(&one.name, DEFAULT_TEAM_NAMES[0]), deck.clone(), TeamColor::A),
        new_team(display_name(&two.name, DEFAULT_TEAM_NAMES[1]), deck, TeamColor::B),
    ]
}

/// Fold a finished turn into the team's ledger. Called exactly once per
/// completed round, when the clock reaches zero.
pub fn record_round(team: &mut Team, round_score: u32) {
    team.score += round_score;
    team.history.rounds_played += 1;
    team.history.total_words_guessed += round_score;
    team.history.best_round = team.history.best_round.max(round_score);
}

fn new_team(name: String, words: Vec<String>, color: TeamColor) -> Team {
    Team {
        name,
        words,
        score: 0,
        color,
        history: TeamHistory {
            rounds_played: 0,
            total_words_guessed: 0,
            best_round: 0,
        },
    }
}

fn display_name(raw: &str, fallback: &str) -> String {
    let name = raw.trim();
    if name.is_empty() {
        fallback.to_string()
    } else {
        name.to_string()
    }
}
