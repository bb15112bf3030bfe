use std::collections::HashSet;
use std::fmt;

use rand::Rng;
use study_core::model::{Card, CardId, Catalog};

use super::progress::{FlashcardProgress, percent};

/// The face of the current card that is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardFace<'a> {
    Front(&'a str),
    Back(&'a str),
}

impl CardFace<'_> {
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            CardFace::Front(text) | CardFace::Back(text) => text,
        }
    }
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// In-memory flashcard study session over one deck.
///
/// Navigation wraps in both directions and never terminates. An empty deck is a
/// valid session with no current card; every action on it is a no-op.
pub struct FlashcardSession {
    cards: Catalog<Card>,
    current: usize,
    flipped: bool,
    studied: HashSet<CardId>,
}

impl FlashcardSession {
    #[must_use]
    pub fn new(cards: Catalog<Card>) -> Self {
        log::debug!("flashcard session created over {} cards", cards.len());
        Self {
            cards,
            current: 0,
            flipped: false,
            studied: HashSet::new(),
        }
    }

    /// Throw away all progress and return to the first card.
    pub fn reset(&mut self) {
        self.current = 0;
        self.flipped = false;
        self.studied.clear();
    }

    #[must_use]
    pub fn cards(&self) -> &Catalog<Card> {
        &self.cards
    }

    #[must_use]
    pub fn total_cards(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn current_index(&self) -> Option<usize> {
        (!self.cards.is_empty()).then_some(self.current)
    }

    #[must_use]
    pub fn current_card(&self) -> Option<&Card> {
        self.cards.get(self.current)
    }

    #[must_use]
    pub fn is_flipped(&self) -> bool {
        self.flipped
    }

    #[must_use]
    pub fn visible_face(&self) -> Option<CardFace<'_>> {
        let card = self.current_card()?;
        Some(if self.flipped {
            CardFace::Back(card.back())
        } else {
            CardFace::Front(card.front())
        })
    }

    pub fn flip(&mut self) {
        self.flipped = !self.flipped;
    }

    pub fn next(&mut self) {
        let len = self.cards.len();
        if len == 0 {
            return;
        }
        self.current = (self.current + 1) % len;
        self.flipped = false;
    }

    pub fn previous(&mut self) {
        let len = self.cards.len();
        if len == 0 {
            return;
        }
        self.current = (self.current + len - 1) % len;
        self.flipped = false;
    }

    /// Record the current card as studied without moving.
    ///
    /// Returns `true` if the card was not studied before.
    pub fn mark_studied(&mut self) -> bool {
        let Some(id) = self.current_card().map(Card::id) else {
            return false;
        };
        let added = self.studied.insert(id);
        if added {
            log::debug!("card {id} studied ({}/{})", self.studied.len(), self.cards.len());
        }
        added
    }

    /// [`mark_studied`](Self::mark_studied) followed immediately by [`next`](Self::next).
    pub fn mark_studied_and_advance(&mut self) -> bool {
        let added = self.mark_studied();
        self.next();
        added
    }

    /// Jump to a uniformly random card; the current card may be picked again.
    pub fn shuffle(&mut self) {
        let mut rng = rand::rng();
        self.shuffle_with(&mut rng);
    }

    pub fn shuffle_with<R: Rng>(&mut self, rng: &mut R) {
        let len = self.cards.len();
        if len == 0 {
            return;
        }
        self.current = rng.random_range(0..len);
        self.flipped = false;
    }

    #[must_use]
    pub fn is_studied(&self, id: CardId) -> bool {
        self.studied.contains(&id)
    }

    #[must_use]
    pub fn is_current_studied(&self) -> bool {
        self.current_card()
            .is_some_and(|card| self.studied.contains(&card.id()))
    }

    #[must_use]
    pub fn studied_count(&self) -> usize {
        self.studied.len()
    }

    #[must_use]
    pub fn remaining_count(&self) -> usize {
        self.cards.len().saturating_sub(self.studied.len())
    }

    #[must_use]
    pub fn progress_percent(&self) -> u32 {
        percent(self.studied.len(), self.cards.len())
    }

    /// How far through the deck the cursor is, for a position bar.
    #[must_use]
    pub fn position_percent(&self) -> u32 {
        match self.current_index() {
            Some(index) => percent(index + 1, self.cards.len()),
            None => 0,
        }
    }

    #[must_use]
    pub fn progress(&self) -> FlashcardProgress {
        FlashcardProgress {
            total: self.total_cards(),
            studied: self.studied_count(),
            remaining: self.remaining_count(),
            percent: self.progress_percent(),
            position: self.current_index().map(|index| index + 1),
        }
    }
}

impl fmt::Debug for FlashcardSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FlashcardSession")
            .field("cards_len", &self.cards.len())
            .field("current", &self.current)
            .field("flipped", &self.flipped)
            .field("studied_len", &self.studied.len())
            .finish()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use study_core::model::Difficulty;

    fn build_deck(n: u64) -> Catalog<Card> {
        Catalog::new((1..=n).map(|id| {
            Card::new(CardId::new(id), format!("Q{id}"), format!("A{id}"), Difficulty::Medium)
                .unwrap()
        }))
        .unwrap()
    }

    #[test]
    fn next_n_times_returns_to_start() {
        for n in 1..=6 {
            let mut session = FlashcardSession::new(build_deck(n));
            session.next();
            let start = session.current_index();
            for _ in 0..n {
                session.next();
            }
            assert_eq!(session.current_index(), start, "deck of {n}");
        }
    }

    #[test]
    fn previous_wraps_to_last_card() {
        let mut session = FlashcardSession::new(build_deck(4));
        session.previous();
        assert_eq!(session.current_index(), Some(3));
        session.next();
        assert_eq!(session.current_index(), Some(0));
    }

    #[test]
    fn navigation_resets_flip() {
        let mut session = FlashcardSession::new(build_deck(3));
        session.flip();
        assert!(session.is_flipped());
        assert_eq!(session.visible_face(), Some(CardFace::Back("A1")));
        session.next();
        assert!(!session.is_flipped());
        session.flip();
        session.previous();
        assert!(!session.is_flipped());
        session.flip();
        session.shuffle();
        assert!(!session.is_flipped());
    }

    #[test]
    fn flip_toggles_back_and_forth() {
        let mut session = FlashcardSession::new(build_deck(1));
        session.flip();
        session.flip();
        assert!(!session.is_flipped());
        assert_eq!(session.visible_face().unwrap().text(), "Q1");
    }

    #[test]
    fn mark_studied_is_idempotent() {
        let mut session = FlashcardSession::new(build_deck(3));
        assert!(session.mark_studied());
        assert!(!session.mark_studied());
        assert_eq!(session.studied_count(), 1);
        assert_eq!(session.remaining_count(), 2);
        assert!(session.is_current_studied());
        assert_eq!(session.current_index(), Some(0));
    }

    #[test]
    fn mark_studied_and_advance_moves_on() {
        let mut session = FlashcardSession::new(build_deck(3));
        session.flip();
        assert!(session.mark_studied_and_advance());
        assert_eq!(session.current_index(), Some(1));
        assert!(!session.is_flipped());
        assert!(session.is_studied(CardId::new(1)));
        assert!(!session.is_current_studied());
    }

    #[test]
    fn progress_is_monotonic_and_capped() {
        let mut session = FlashcardSession::new(build_deck(3));
        assert_eq!(session.progress_percent(), 0);
        let mut last = 0;
        for _ in 0..5 {
            session.mark_studied_and_advance();
            let now = session.progress_percent();
            assert!(now >= last);
            assert!(now <= 100);
            last = now;
        }
        assert_eq!(last, 100);
        assert_eq!(session.remaining_count(), 0);
    }

    #[test]
    fn progress_rounds() {
        let mut session = FlashcardSession::new(build_deck(3));
        session.mark_studied_and_advance();
        assert_eq!(session.progress_percent(), 33);
        session.mark_studied_and_advance();
        assert_eq!(session.progress_percent(), 67);
    }

    #[test]
    fn shuffle_stays_in_range() {
        let mut session = FlashcardSession::new(build_deck(5));
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            session.shuffle_with(&mut rng);
            let index = session.current_index().unwrap();
            assert!(index < 5);
        }
    }

    #[test]
    fn empty_deck_has_no_current_card() {
        let mut session = FlashcardSession::new(Catalog::empty());
        assert!(session.current_card().is_none());
        assert!(session.visible_face().is_none());
        assert_eq!(session.progress_percent(), 0);
        assert_eq!(session.position_percent(), 0);

        session.next();
        session.previous();
        session.shuffle();
        assert!(!session.mark_studied());
        assert_eq!(
            session.progress(),
            FlashcardProgress {
                total: 0,
                studied: 0,
                remaining: 0,
                percent: 0,
                position: None,
            }
        );
    }

    #[test]
    fn reset_clears_progress() {
        let mut session = FlashcardSession::new(build_deck(2));
        session.mark_studied_and_advance();
        session.flip();
        session.reset();
        assert_eq!(session.current_index(), Some(0));
        assert_eq!(session.studied_count(), 0);
        assert!(!session.is_flipped());
    }

    #[test]
    fn position_percent_tracks_cursor() {
        let mut session = FlashcardSession::new(build_deck(4));
        assert_eq!(session.position_percent(), 25);
        session.previous();
        assert_eq!(session.position_percent(), 100);
    }
}
