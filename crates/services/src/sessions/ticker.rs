use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;

use study_core::model::{Answer, Catalog, Question, StudySettings};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::{Instant, interval_at};

use crate::Clock;
use crate::error::SessionError;
use super::quiz::{QuizPhase, QuizSession, QuizStep};

//
// ─── TICKER ────────────────────────────────────────────────────────────────────
//

/// Periodic task adding one second to a quiz per period.
///
/// Aborted on drop. The task also ends on its own as soon as the quiz refuses a
/// tick or the quiz itself is gone.
struct Ticker {
    handle: JoinHandle<()>,
}

impl Ticker {
    fn spawn(runtime: &Handle, session: Weak<Mutex<QuizSession>>, period: Duration) -> Self {
        let handle = runtime.spawn(async move {
            let mut interval = interval_at(Instant::now() + period, period);
            loop {
                interval.tick().await;
                if !tick_once(&session) {
                    break;
                }
            }
            log::debug!("quiz ticker stopped");
        });
        Self { handle }
    }

    fn is_running(&self) -> bool {
        !self.handle.is_finished()
    }
}

fn tick_once(session: &Weak<Mutex<QuizSession>>) -> bool {
    let Some(session) = session.upgrade() else {
        return false;
    };
    let mut guard = session.lock().unwrap_or_else(PoisonError::into_inner);
    guard.tick()
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

//
// ─── LIVE QUIZ ─────────────────────────────────────────────────────────────────
//

/// A [`QuizSession`] with its elapsed-time ticker attached.
///
/// The ticker exists exactly while the quiz is `InProgress`: it is spawned by
/// [`start`](Self::start) and released by whichever action leaves that phase,
/// or when the `LiveQuiz` is dropped.
pub struct LiveQuiz {
    session: Arc<Mutex<QuizSession>>,
    tick_interval: Duration,
    ticker: Option<Ticker>,
}

impl LiveQuiz {
    #[must_use]
    pub fn new(questions: Catalog<Question>, settings: &StudySettings) -> Self {
        Self::from_session(QuizSession::new(questions), settings.tick_interval())
    }

    #[must_use]
    pub fn with_clock(questions: Catalog<Question>, settings: &StudySettings, clock: Clock) -> Self {
        Self::from_session(
            QuizSession::new(questions).with_clock(clock),
            settings.tick_interval(),
        )
    }

    fn from_session(session: QuizSession, tick_interval: Duration) -> Self {
        Self {
            session: Arc::new(Mutex::new(session)),
            tick_interval,
            ticker: None,
        }
    }

    fn lock(&self) -> MutexGuard<'_, QuizSession> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Start the quiz and its ticker. Must be called inside a Tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NoRuntime` outside a runtime, otherwise whatever
    /// [`QuizSession::start`] rejects.
    pub fn start(&mut self) -> Result<(), SessionError> {
        let runtime = Handle::try_current().map_err(|_| SessionError::NoRuntime)?;
        self.lock().start()?;
        self.ticker = Some(Ticker::spawn(
            &runtime,
            Arc::downgrade(&self.session),
            self.tick_interval,
        ));
        Ok(())
    }

    /// # Errors
    ///
    /// See [`QuizSession::submit_answer`].
    pub fn submit_answer(&mut self, answer: impl Into<Answer>) -> Result<(), SessionError> {
        self.lock().submit_answer(answer)
    }

    /// # Errors
    ///
    /// See [`QuizSession::advance`].
    pub fn advance(&mut self) -> Result<QuizStep, SessionError> {
        let (step, phase) = {
            let mut session = self.lock();
            let step = session.advance();
            (step, session.phase())
        };
        self.release_ticker_unless(phase);
        step
    }

    /// # Errors
    ///
    /// See [`QuizSession::retreat`].
    pub fn retreat(&mut self) -> Result<usize, SessionError> {
        self.lock().retreat()
    }

    pub fn restart(&mut self) {
        self.ticker = None;
        self.lock().restart();
    }

    /// Whether a ticker task is still alive for this quiz.
    #[must_use]
    pub fn is_ticking(&self) -> bool {
        self.ticker.as_ref().is_some_and(Ticker::is_running)
    }

    /// Run a read against the current state.
    pub fn read<R>(&self, f: impl FnOnce(&QuizSession) -> R) -> R {
        f(&self.lock())
    }

    #[must_use]
    pub fn phase(&self) -> QuizPhase {
        self.lock().phase()
    }

    #[must_use]
    pub fn elapsed_seconds(&self) -> u64 {
        self.lock().elapsed_seconds()
    }

    fn release_ticker_unless(&mut self, phase: QuizPhase) {
        if phase != QuizPhase::InProgress && self.ticker.take().is_some() {
            log::debug!("quiz left InProgress ({phase:?}); ticker released");
        }
    }
}

impl fmt::Debug for LiveQuiz {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LiveQuiz")
            .field("session", &*self.lock())
            .field("tick_interval", &self.tick_interval)
            .field("ticking", &self.is_ticking())
            .finish()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
