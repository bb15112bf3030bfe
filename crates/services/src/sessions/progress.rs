/// `round(part / total * 100)` with halves rounded up; 0 for an empty total.
#[must_use]
pub fn percent(part: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    let part = part.min(total) as u128;
    let total = total as u128;
    let rounded = (part * 200 + total) / (total * 2);
    u32::try_from(rounded).unwrap_or(100)
}

/// Aggregated view of flashcard study progress, useful for UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlashcardProgress {
    pub total: usize,
    pub studied: usize,
    pub remaining: usize,
    pub percent: u32,
    /// 1-based position of the current card, `None` for an empty deck.
    pub position: Option<usize>,
}

/// Aggregated view of quiz progress, useful for UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizProgress {
    pub total: usize,
    /// 1-based number of the current question.
    pub position: usize,
    pub answered: usize,
    pub percent: Option<u32>,
    pub elapsed_seconds: u64,
}
