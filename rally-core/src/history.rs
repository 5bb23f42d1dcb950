use rally_types::{RoundResult, Team, TeamSummary};

/// Reporting row for one team, derived from its ledger. The average is
/// zero until the team has actually played a round.
pub fn summarize(team: &Team) -> TeamSummary {
    let rounds_played = team.history.rounds_played;
    let average = if rounds_played == 0 {
        0.0
    } else {
        f64::from(team.history.total_words_guessed) / f64::from(rounds_played)
    };
    TeamSummary {
        name: team.name.clone(),
        color: team.color,
        score: team.score,
        rounds_played,
        best_round: team.history.best_round,
        average_words_per_round: average,
    }
}

pub fn summaries(teams: &[Team; 2]) -> [TeamSummary; 2] {
    [summarize(&teams[0]), summarize(&teams[1])]
}

/// Chronological slice of the result log that belongs to one team.
pub fn rounds_for_team<'a>(history: &'a [RoundResult], team_name: &str) -> Vec<&'a RoundResult> {
    history
        .iter()
        .filter(|round| round.team_scores.contains_key(team_name))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    use rally_types::{TeamColor, TeamHistory};

    fn team(name: &str, score: u32, history: TeamHistory) -> Team {
        Team {
            name: name.to_string(),
            words: Vec::new(),
            score,
            color: TeamColor::A,
            history,
        }
    }

    fn round(number: u32, team_name: &str, score: u32) -> RoundResult {
        RoundResult {
            round_number: number,
            team_scores: HashMap::from([(team_name.to_string(), score)]),
            words_guessed: score,
            timestamp: String::new(),
        }
    }

    #[test]
    fn test_summary_before_any_round() {
        let summary = summarize(&team(
            "Alpha",
            0,
            TeamHistory {
                rounds_played: 0,
                total_words_guessed: 0,
                best_round: 0,
            },
        ));

        assert_eq!(summary.rounds_played, 0);
        assert_eq!(summary.best_round, 0);
        // No division by zero: an unplayed team averages zero
        assert_eq!(summary.average_words_per_round, 0.0);
    }

    #[test]
    fn test_summary_averages_over_played_rounds() {
        let summary = summarize(&team(
            "Alpha",
            7,
            TeamHistory {
                rounds_played: 2,
                total_words_guessed: 7,
                best_round: 5,
            },
        ));

        assert_eq!(summary.name, "Alpha");
        assert_eq!(summary.score, 7);
        assert_eq!(summary.rounds_played, 2);
        assert_eq!(summary.best_round, 5);
        assert_eq!(summary.average_words_per_round, 3.5);
    }

    #[test]
    fn test_rounds_for_team_filters_by_name() {
        let history = vec![
            round(1, "Alpha", 3),
            round(1, "Beta", 2),
            round(2, "Alpha", 1),
        ];

        let alpha_rounds = rounds_for_team(&history, "Alpha");
        assert_eq!(alpha_rounds.len(), 2);
        assert_eq!(alpha_rounds[0].round_number, 1);
        assert_eq!(alpha_rounds[1].round_number, 2);
        assert!(rounds_for_team(&history, "Gamma").is_empty());
    }
}
