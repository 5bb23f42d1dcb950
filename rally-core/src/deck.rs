use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::thread_rng;

use rally_types::SessionError;

/// Hard ceiling on deck size. Input beyond this is dropped, not rejected.
pub const WORD_CAP: usize = 200;

/// Clean up one raw word block: one candidate per line, trimmed, blank
/// lines dropped, case-insensitive duplicates removed keeping the first
/// casing seen, truncated to [`WORD_CAP`] entries. Order is preserved, so
/// this doubles as the upload-form preview of what a block contributes.
pub fn normalize_words(raw: &str) -> Vec<String> {
    collect_unique(raw.lines())
}

/// Build the shared deck from both teams' word blocks. The first team's
/// lines are read before the second's, so on a cross-team duplicate the
/// first team's casing wins. The surviving words are shuffled in place.
pub fn build_deck(team_one: &str, team_two: &str) -> Result<Vec<String>, SessionError> {
    let mut deck = collect_unique(team_one.lines().chain(team_two.lines()));
    if deck.is_empty() {
        return Err(SessionError::EmptyDeck);
    }
    deck.shuffle(&mut thread_rng());
    Ok(deck)
}

fn collect_unique<'a>(lines: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut words = Vec::new();
    for line in lines {
        if words.len() >= WORD_CAP {
            break;
        }
        let word = line.trim();
        if word.is_empty() {
            continue;
        }
        if seen.insert(word.to_lowercase()) {
            words.push(word.to_string());
        }
    }
    words
}
