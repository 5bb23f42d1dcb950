/// Rejections a session command can produce. Everything else that cannot
/// apply to the current state is silently ignored rather than rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("Word list is empty after cleanup")]
    EmptyDeck,
    #[error("No words remaining for the current team")]
    NoWordsRemaining,
}
