//! Simulated pauses: the studied-card beat, tutor "typing" and material generation.
//!
//! Every pause is a plain `tokio::time::sleep` that always runs to completion.
//! Pauses gate when a result becomes visible; they never guard session state.

use std::time::Duration;

use rand::Rng;
use study_core::model::StudySettings;

use crate::sessions::FlashcardSession;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pacer {
    mark_studied_delay: Duration,
    tutor_delay_min: Duration,
    tutor_delay_max: Duration,
    generation_delay: Duration,
}

impl Pacer {
    #[must_use]
    pub fn new(settings: &StudySettings) -> Self {
        Self {
            mark_studied_delay: settings.mark_studied_delay(),
            tutor_delay_min: settings.tutor_delay_min(),
            tutor_delay_max: settings.tutor_delay_max(),
            generation_delay: settings.generation_delay(),
        }
    }

    /// No pauses at all.
    #[must_use]
    pub fn instant() -> Self {
        Self {
            mark_studied_delay: Duration::ZERO,
            tutor_delay_min: Duration::ZERO,
            tutor_delay_max: Duration::ZERO,
            generation_delay: Duration::ZERO,
        }
    }

    /// Mark the current card studied, hold for the configured beat, then move on.
    ///
    /// Returns `true` if the card was newly studied.
    pub async fn mark_studied(&self, session: &mut FlashcardSession) -> bool {
        let added = session.mark_studied();
        pause(self.mark_studied_delay).await;
        session.next();
        added
    }

    /// A tutor reply delay drawn uniformly from the configured range.
    pub fn tutor_delay_with<R: Rng>(&self, rng: &mut R) -> Duration {
        if self.tutor_delay_min >= self.tutor_delay_max {
            return self.tutor_delay_min;
        }
        rng.random_range(self.tutor_delay_min..=self.tutor_delay_max)
    }

    pub async fn tutor_pause(&self) {
        let delay = self.tutor_delay_with(&mut rand::rng());
        pause(delay).await;
    }

    pub async fn generation_pause(&self) {
        pause(self.generation_delay).await;
    }
}

impl Default for Pacer {
    fn default() -> Self {
        Self::new(&StudySettings::default())
    }
}

async fn pause(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use study_core::model::{Card, CardId, Catalog, Difficulty};
    use tokio::time::Instant;

    fn deck() -> FlashcardSession {
        let cards = Catalog::new((1..=3).map(|id| {
            Card::new(CardId::new(id), "Q", "A", Difficulty::Easy).unwrap()
        }))
        .unwrap();
        FlashcardSession::new(cards)
    }

    #[tokio::test(start_paused = true)]
    async fn mark_studied_waits_then_advances() {
        let pacer = Pacer::default();
        let mut session = deck();
        let started = Instant::now();

        assert!(pacer.mark_studied(&mut session).await);

        assert!(started.elapsed() >= Duration::from_millis(500));
        assert_eq!(session.current_index(), Some(1));
        assert!(session.is_studied(CardId::new(1)));
    }

    #[tokio::test(start_paused = true)]
    async fn instant_pacer_does_not_wait() {
        let pacer = Pacer::instant();
        let mut session = deck();
        let started = Instant::now();
        pacer.mark_studied(&mut session).await;
        pacer.tutor_pause().await;
        pacer.generation_pause().await;
        assert_eq!(started.elapsed(), Duration::ZERO);
    }

    #[test]
    fn tutor_delay_stays_in_range() {
        let pacer = Pacer::default();
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..100 {
            let delay = pacer.tutor_delay_with(&mut rng);
            assert!(delay >= Duration::from_secs(1));
            assert!(delay <= Duration::from_secs(3));
        }
    }
}
