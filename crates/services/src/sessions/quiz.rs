use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, Utc};
use study_core::model::{Answer, Catalog, Question, QuestionId};
use study_core::time::format_elapsed;

use crate::Clock;
use crate::error::SessionError;
use super::progress::{QuizProgress, percent};

//
// ─── PHASE & RESULTS ───────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuizPhase {
    NotStarted,
    InProgress,
    Completed,
}

/// Graded outcome for one question, fixed at completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizResult {
    pub question_id: QuestionId,
    pub user_answer: Option<Answer>,
    pub is_correct: bool,
}

/// Outcome of [`QuizSession::advance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizStep {
    /// Moved to the question at `index`.
    Moved { index: usize },
    /// The last question was answered; the quiz is graded.
    Completed { score: u32 },
}

/// Coarse rating of a final score for result screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBand {
    Excellent,
    Passing,
    NeedsWork,
}

impl ScoreBand {
    #[must_use]
    pub fn from_score(score: u32) -> Self {
        if score >= 80 {
            ScoreBand::Excellent
        } else if score >= 60 {
            ScoreBand::Passing
        } else {
            ScoreBand::NeedsWork
        }
    }
}

/// A question paired with its graded result, in catalog order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuestionReview<'a> {
    pub number: usize,
    pub question: &'a Question,
    pub result: &'a QuizResult,
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// Quiz state machine: `NotStarted → InProgress → Completed`, back to
/// `NotStarted` through [`restart`](Self::restart).
///
/// Elapsed time is advanced externally through [`tick`](Self::tick), which only
/// counts while the quiz is in progress. See `LiveQuiz` for the timer that drives it.
pub struct QuizSession {
    questions: Catalog<Question>,
    clock: Clock,
    phase: QuizPhase,
    current: usize,
    answers: HashMap<QuestionId, Answer>,
    elapsed_seconds: u64,
    results: Vec<QuizResult>,
    started_at: Option<DateTime<Utc>>,
    completed_at: Option<DateTime<Utc>>,
}

impl QuizSession {
    #[must_use]
    pub fn new(questions: Catalog<Question>) -> Self {
        Self {
            questions,
            clock: Clock::default_clock(),
            phase: QuizPhase::NotStarted,
            current: 0,
            answers: HashMap::new(),
            elapsed_seconds: 0,
            results: Vec::new(),
            started_at: None,
            completed_at: None,
        }
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    //
    // ─── ACTIONS ───────────────────────────────────────────────────────────────
    //

    /// # Errors
    ///
    /// Returns `SessionError::EmptyCatalog` when there are no questions,
    /// `AlreadyStarted` or `Completed` when not in `NotStarted`.
    pub fn start(&mut self) -> Result<(), SessionError> {
        match self.phase {
            QuizPhase::NotStarted => {}
            QuizPhase::InProgress => return Err(self.reject(SessionError::AlreadyStarted)),
            QuizPhase::Completed => return Err(self.reject(SessionError::Completed)),
        }
        if self.questions.is_empty() {
            return Err(self.reject(SessionError::EmptyCatalog));
        }

        self.phase = QuizPhase::InProgress;
        self.current = 0;
        self.elapsed_seconds = 0;
        self.started_at = Some(self.clock.now());
        log::info!("quiz started with {} questions", self.questions.len());
        Ok(())
    }

    /// Record an answer for the current question, replacing any earlier one.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` outside `InProgress`, for an empty text answer, or
    /// when the answer shape does not fit the question kind. Whitespace-only
    /// text is accepted and graded like any other answer.
    pub fn submit_answer(&mut self, answer: impl Into<Answer>) -> Result<(), SessionError> {
        self.require_in_progress()?;
        let answer = answer.into();
        let question = self.current_in_progress()?;
        let question_id = question.id();
        if !question.kind().accepts(&answer) {
            return Err(self.reject(SessionError::AnswerKindMismatch {
                question_id,
                kind: question.kind(),
            }));
        }
        if answer.is_empty() {
            return Err(self.reject(SessionError::EmptyAnswer));
        }

        log::debug!("answer recorded for question {question_id}");
        self.answers.insert(question_id, answer);
        Ok(())
    }

    /// Move to the next question, or grade the quiz when on the last one.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` outside `InProgress` or when the current question
    /// has no recorded answer.
    pub fn advance(&mut self) -> Result<QuizStep, SessionError> {
        self.require_in_progress()?;
        let question_id = self.current_in_progress()?.id();
        if !self.answers.contains_key(&question_id) {
            return Err(self.reject(SessionError::NoAnswer { question_id }));
        }

        if self.current + 1 < self.questions.len() {
            self.current += 1;
            log::debug!("quiz moved to question {}", self.current + 1);
            return Ok(QuizStep::Moved {
                index: self.current,
            });
        }

        self.complete();
        let score = self.score().unwrap_or(0);
        Ok(QuizStep::Completed { score })
    }

    /// Step back one question; stays put on the first. Answers are kept.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` outside `InProgress`.
    pub fn retreat(&mut self) -> Result<usize, SessionError> {
        self.require_in_progress()?;
        self.current = self.current.saturating_sub(1);
        Ok(self.current)
    }

    /// Back to `NotStarted` from any phase, clearing everything.
    pub fn restart(&mut self) {
        self.phase = QuizPhase::NotStarted;
        self.current = 0;
        self.answers.clear();
        self.results.clear();
        self.elapsed_seconds = 0;
        self.started_at = None;
        self.completed_at = None;
        log::debug!("quiz restarted");
    }

    /// Count one elapsed second. Returns `false` without touching state when the
    /// quiz is not in progress, which tells a timer to stop.
    pub fn tick(&mut self) -> bool {
        if self.phase != QuizPhase::InProgress {
            return false;
        }
        self.elapsed_seconds = self.elapsed_seconds.saturating_add(1);
        true
    }

    fn complete(&mut self) {
        self.results = self
            .questions
            .iter()
            .map(|question| {
                let user_answer = self.answers.get(&question.id()).cloned();
                let is_correct = user_answer
                    .as_ref()
                    .is_some_and(|answer| question.is_correct(answer));
                QuizResult {
                    question_id: question.id(),
                    user_answer,
                    is_correct,
                }
            })
            .collect();
        self.phase = QuizPhase::Completed;
        self.completed_at = Some(self.clock.now());
        log::info!(
            "quiz completed: {}/{} correct in {}",
            self.correct_count(),
            self.questions.len(),
            self.formatted_time()
        );
    }

    fn require_in_progress(&self) -> Result<(), SessionError> {
        match self.phase {
            QuizPhase::InProgress => Ok(()),
            QuizPhase::NotStarted => Err(self.reject(SessionError::NotStarted)),
            QuizPhase::Completed => Err(self.reject(SessionError::Completed)),
        }
    }

    fn current_in_progress(&self) -> Result<&Question, SessionError> {
        self.questions
            .get(self.current)
            .ok_or(SessionError::EmptyCatalog)
    }

    fn reject(&self, err: SessionError) -> SessionError {
        log::warn!("quiz rejected action in {:?}: {err}", self.phase);
        err
    }

    //
    // ─── READS ─────────────────────────────────────────────────────────────────
    //

    #[must_use]
    pub fn phase(&self) -> QuizPhase {
        self.phase
    }

    #[must_use]
    pub fn questions(&self) -> &Catalog<Question> {
        &self.questions
    }

    #[must_use]
    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.current)
    }

    /// The answer already recorded for the current question, if any.
    #[must_use]
    pub fn current_answer(&self) -> Option<&Answer> {
        let question = self.current_question()?;
        self.answers.get(&question.id())
    }

    #[must_use]
    pub fn answer_for(&self, id: QuestionId) -> Option<&Answer> {
        self.answers.get(&id)
    }

    #[must_use]
    pub fn answered_count(&self) -> usize {
        self.answers.len()
    }

    #[must_use]
    pub fn is_last_question(&self) -> bool {
        !self.questions.is_empty() && self.current + 1 == self.questions.len()
    }

    #[must_use]
    pub fn elapsed_seconds(&self) -> u64 {
        self.elapsed_seconds
    }

    #[must_use]
    pub fn formatted_time(&self) -> String {
        format_elapsed(self.elapsed_seconds)
    }

    #[must_use]
    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// Graded results in catalog order; empty until completed.
    #[must_use]
    pub fn results(&self) -> &[QuizResult] {
        &self.results
    }

    #[must_use]
    pub fn correct_count(&self) -> usize {
        self.results.iter().filter(|r| r.is_correct).count()
    }

    /// Final score in percent, only once completed.
    #[must_use]
    pub fn score(&self) -> Option<u32> {
        (self.phase == QuizPhase::Completed)
            .then(|| percent(self.correct_count(), self.questions.len()))
    }

    #[must_use]
    pub fn score_band(&self) -> Option<ScoreBand> {
        self.score().map(ScoreBand::from_score)
    }

    /// Position through the quiz in percent, only while in progress.
    #[must_use]
    pub fn progress_percent(&self) -> Option<u32> {
        (self.phase == QuizPhase::InProgress)
            .then(|| percent(self.current + 1, self.questions.len()))
    }

    #[must_use]
    pub fn progress(&self) -> QuizProgress {
        QuizProgress {
            total: self.questions.len(),
            position: self.current + 1,
            answered: self.answered_count(),
            percent: self.progress_percent(),
            elapsed_seconds: self.elapsed_seconds,
        }
    }

    /// Questions paired with their results for the answer review screen.
    #[must_use]
    pub fn review(&self) -> Vec<QuestionReview<'_>> {
        self.questions
            .iter()
            .zip(&self.results)
            .enumerate()
            .map(|(i, (question, result))| QuestionReview {
                number: i + 1,
                question,
                result,
            })
            .collect()
    }
}

impl fmt::Debug for QuizSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizSession")
            .field("questions_len", &self.questions.len())
            .field("phase", &self.phase)
            .field("current", &self.current)
            .field("answers_len", &self.answers.len())
            .field("elapsed_seconds", &self.elapsed_seconds)
            .field("results_len", &self.results.len())
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use study_core::model::QuestionKind;
    use study_core::time::{fixed_clock, fixed_now};

    fn tf(id: u64, correct: bool) -> Question {
        Question::true_false(QuestionId::new(id), format!("Statement {id}"), correct, "").unwrap()
    }

    fn build_quiz(n: u64) -> QuizSession {
        let questions = Catalog::new((1..=n).map(|id| tf(id, true))).unwrap();
        QuizSession::new(questions).with_clock(fixed_clock())
    }

    fn mixed_quiz() -> QuizSession {
        let questions = Catalog::new(vec![
            Question::multiple_choice(QuestionId::new(1), "Pick", ["a", "b", "c"], "b", "").unwrap(),
            tf(2, false),
            Question::open_ended(QuestionId::new(3), "Explain", "Because.", "").unwrap(),
        ])
        .unwrap();
        QuizSession::new(questions).with_clock(fixed_clock())
    }

    #[test]
    fn start_enters_in_progress_at_zero() {
        let mut quiz = build_quiz(3);
        quiz.start().unwrap();
        assert_eq!(quiz.phase(), QuizPhase::InProgress);
        assert_eq!(quiz.current_index(), 0);
        assert_eq!(quiz.elapsed_seconds(), 0);
        assert_eq!(quiz.started_at(), Some(fixed_now()));
        assert_eq!(quiz.progress_percent(), Some(33));
    }

    #[test]
    fn start_twice_is_rejected() {
        let mut quiz = build_quiz(2);
        quiz.start().unwrap();
        quiz.tick();
        assert_eq!(quiz.start(), Err(SessionError::AlreadyStarted));
        assert_eq!(quiz.elapsed_seconds(), 1);
    }

    #[test]
    fn empty_quiz_cannot_start() {
        let mut quiz = QuizSession::new(Catalog::empty());
        assert_eq!(quiz.start(), Err(SessionError::EmptyCatalog));
        assert_eq!(quiz.phase(), QuizPhase::NotStarted);
        assert!(quiz.current_question().is_none());
        assert!(!quiz.is_last_question());
    }

    #[test]
    fn actions_before_start_are_rejected() {
        let mut quiz = build_quiz(2);
        assert_eq!(quiz.submit_answer(true), Err(SessionError::NotStarted));
        assert_eq!(quiz.advance(), Err(SessionError::NotStarted));
        assert_eq!(quiz.retreat(), Err(SessionError::NotStarted));
        assert!(!quiz.tick());
        assert_eq!(quiz.answered_count(), 0);
        assert_eq!(quiz.elapsed_seconds(), 0);
    }

    #[test]
    fn advance_requires_answer() {
        let mut quiz = build_quiz(2);
        quiz.start().unwrap();
        assert_eq!(
            quiz.advance(),
            Err(SessionError::NoAnswer {
                question_id: QuestionId::new(1)
            })
        );
        assert_eq!(quiz.current_index(), 0);
    }

    #[test]
    fn resubmitting_overwrites() {
        let mut quiz = build_quiz(1);
        quiz.start().unwrap();
        quiz.submit_answer(false).unwrap();
        quiz.submit_answer(true).unwrap();
        assert_eq!(quiz.answered_count(), 1);
        assert_eq!(quiz.current_answer(), Some(&Answer::Bool(true)));
    }

    #[test]
    fn answer_shape_must_fit_kind() {
        let mut quiz = mixed_quiz();
        quiz.start().unwrap();
        let err = quiz.submit_answer(true).unwrap_err();
        assert_eq!(
            err,
            SessionError::AnswerKindMismatch {
                question_id: QuestionId::new(1),
                kind: QuestionKind::MultipleChoice,
            }
        );
        assert_eq!(quiz.submit_answer(""), Err(SessionError::EmptyAnswer));
        assert!(quiz.current_answer().is_none());
    }

    #[test]
    fn whitespace_answer_is_recorded() {
        let mut quiz = mixed_quiz();
        quiz.start().unwrap();
        quiz.submit_answer("  ").unwrap();
        assert_eq!(quiz.current_answer(), Some(&Answer::text("  ")));
        assert!(quiz.advance().is_ok());
    }

    #[test]
    fn retreat_keeps_answers_and_stops_at_zero() {
        let mut quiz = build_quiz(3);
        quiz.start().unwrap();
        assert_eq!(quiz.retreat(), Ok(0));
        quiz.submit_answer(true).unwrap();
        quiz.advance().unwrap();
        quiz.submit_answer(false).unwrap();
        assert_eq!(quiz.retreat(), Ok(0));
        assert_eq!(quiz.current_answer(), Some(&Answer::Bool(true)));
        assert_eq!(quiz.answer_for(QuestionId::new(2)), Some(&Answer::Bool(false)));
        assert_eq!(quiz.advance(), Ok(QuizStep::Moved { index: 1 }));
        assert_eq!(quiz.current_answer(), Some(&Answer::Bool(false)));
    }

    #[test]
    fn three_question_scenario_scores_67() {
        let mut quiz = mixed_quiz();
        quiz.start().unwrap();
        quiz.submit_answer("b").unwrap();
        quiz.advance().unwrap();
        quiz.submit_answer(true).unwrap();
        quiz.advance().unwrap();
        assert!(quiz.is_last_question());
        quiz.submit_answer("Because.").unwrap();
        assert_eq!(quiz.advance(), Ok(QuizStep::Completed { score: 67 }));

        let flags: Vec<_> = quiz.results().iter().map(|r| r.is_correct).collect();
        assert_eq!(flags, vec![true, false, true]);
        assert_eq!(quiz.score(), Some(67));
        assert_eq!(quiz.score_band(), Some(ScoreBand::Passing));
        assert_eq!(quiz.completed_at(), Some(fixed_now()));
    }

    #[test]
    fn results_follow_catalog_order() {
        let mut quiz = build_quiz(4);
        quiz.start().unwrap();
        for _ in 0..4 {
            quiz.submit_answer(true).unwrap();
            quiz.advance().unwrap();
        }
        let ids: Vec<_> = quiz.results().iter().map(|r| r.question_id.value()).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
        assert_eq!(quiz.review().len(), 4);
        assert_eq!(quiz.review()[3].number, 4);
    }

    #[test]
    fn open_ended_needs_verbatim_answer() {
        let questions =
            Catalog::new(vec![Question::open_ended(QuestionId::new(1), "Why?", "Because.", "").unwrap()])
                .unwrap();
        let mut quiz = QuizSession::new(questions);
        quiz.start().unwrap();
        quiz.submit_answer("because").unwrap();
        quiz.advance().unwrap();
        assert_eq!(quiz.score(), Some(0));
        assert_eq!(quiz.score_band(), Some(ScoreBand::NeedsWork));
    }

    #[test]
    fn completed_rejects_further_actions() {
        let mut quiz = build_quiz(1);
        quiz.start().unwrap();
        quiz.submit_answer(true).unwrap();
        quiz.advance().unwrap();
        let before = quiz.results().to_vec();

        assert_eq!(quiz.advance(), Err(SessionError::Completed));
        assert_eq!(quiz.submit_answer(false), Err(SessionError::Completed));
        assert_eq!(quiz.retreat(), Err(SessionError::Completed));
        assert_eq!(quiz.start(), Err(SessionError::Completed));
        assert_eq!(quiz.results(), before.as_slice());
        assert_eq!(quiz.progress_percent(), None);
    }

    #[test]
    fn tick_only_counts_in_progress() {
        let mut quiz = build_quiz(1);
        assert!(!quiz.tick());
        quiz.start().unwrap();
        assert!(quiz.tick());
        assert!(quiz.tick());
        quiz.submit_answer(true).unwrap();
        quiz.advance().unwrap();
        assert!(!quiz.tick());
        assert_eq!(quiz.elapsed_seconds(), 2);
        assert_eq!(quiz.formatted_time(), "0:02");
    }

    #[test]
    fn restart_from_completed_clears_everything() {
        let mut quiz = build_quiz(2);
        quiz.start().unwrap();
        quiz.tick();
        quiz.submit_answer(true).unwrap();
        quiz.advance().unwrap();
        quiz.submit_answer(true).unwrap();
        quiz.advance().unwrap();

        quiz.restart();
        assert_eq!(quiz.phase(), QuizPhase::NotStarted);
        assert_eq!(quiz.answered_count(), 0);
        assert!(quiz.results().is_empty());
        assert_eq!(quiz.elapsed_seconds(), 0);
        assert_eq!(quiz.current_index(), 0);
        assert!(quiz.score().is_none());
        quiz.start().unwrap();
    }

    #[test]
    fn score_bands() {
        assert_eq!(ScoreBand::from_score(100), ScoreBand::Excellent);
        assert_eq!(ScoreBand::from_score(80), ScoreBand::Excellent);
        assert_eq!(ScoreBand::from_score(79), ScoreBand::Passing);
        assert_eq!(ScoreBand::from_score(60), ScoreBand::Passing);
        assert_eq!(ScoreBand::from_score(59), ScoreBand::NeedsWork);
    }
}
