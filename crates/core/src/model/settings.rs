use std::time::Duration;

use thiserror::Error;

/// Pacing knobs for the simulated study experience.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StudySettings {
    mark_studied_delay: Duration,
    tick_interval: Duration,
    tutor_delay_min: Duration,
    tutor_delay_max: Duration,
    generation_delay: Duration,
}

#[derive(Clone, Debug, Default)]
pub struct StudySettingsDraft {
    pub mark_studied_delay: Option<Duration>,
    pub tick_interval: Option<Duration>,
    pub tutor_delay_min: Option<Duration>,
    pub tutor_delay_max: Option<Duration>,
    pub generation_delay: Option<Duration>,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SettingsError {
    #[error("tick interval must be > 0")]
    ZeroTickInterval,
    #[error("tutor delay minimum ({min:?}) exceeds maximum ({max:?})")]
    InvalidTutorDelayBounds { min: Duration, max: Duration },
}

pub const DEFAULT_MARK_STUDIED_DELAY: Duration = Duration::from_millis(500);
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_secs(1);
pub const DEFAULT_TUTOR_DELAY_MIN: Duration = Duration::from_secs(1);
pub const DEFAULT_TUTOR_DELAY_MAX: Duration = Duration::from_secs(3);
pub const DEFAULT_GENERATION_DELAY: Duration = Duration::from_secs(2);

impl StudySettingsDraft {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All simulated pauses set to zero. Ticking keeps its default period.
    #[must_use]
    pub fn instant() -> Self {
        Self {
            mark_studied_delay: Some(Duration::ZERO),
            tick_interval: None,
            tutor_delay_min: Some(Duration::ZERO),
            tutor_delay_max: Some(Duration::ZERO),
            generation_delay: Some(Duration::ZERO),
        }
    }

    /// Fill unset fields with defaults and validate.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError` if the tick interval is zero or the tutor delay
    /// range is inverted.
    pub fn validate(self) -> Result<StudySettings, SettingsError> {
        let tick_interval = self.tick_interval.unwrap_or(DEFAULT_TICK_INTERVAL);
        if tick_interval.is_zero() {
            return Err(SettingsError::ZeroTickInterval);
        }

        let tutor_delay_min = self.tutor_delay_min.unwrap_or(DEFAULT_TUTOR_DELAY_MIN);
        let tutor_delay_max = self.tutor_delay_max.unwrap_or(DEFAULT_TUTOR_DELAY_MAX);
        if tutor_delay_min > tutor_delay_max {
            return Err(SettingsError::InvalidTutorDelayBounds {
                min: tutor_delay_min,
                max: tutor_delay_max,
            });
        }

        Ok(StudySettings {
            mark_studied_delay: self
                .mark_studied_delay
                .unwrap_or(DEFAULT_MARK_STUDIED_DELAY),
            tick_interval,
            tutor_delay_min,
            tutor_delay_max,
            generation_delay: self.generation_delay.unwrap_or(DEFAULT_GENERATION_DELAY),
        })
    }
}

impl StudySettings {
    #[must_use]
    pub fn mark_studied_delay(&self) -> Duration {
        self.mark_studied_delay
    }

    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    #[must_use]
    pub fn tutor_delay_min(&self) -> Duration {
        self.tutor_delay_min
    }

    #[must_use]
    pub fn tutor_delay_max(&self) -> Duration {
        self.tutor_delay_max
    }

    #[must_use]
    pub fn generation_delay(&self) -> Duration {
        self.generation_delay
    }
}

impl Default for StudySettings {
    fn default() -> Self {
        Self {
            mark_studied_delay: DEFAULT_MARK_STUDIED_DELAY,
            tick_interval: DEFAULT_TICK_INTERVAL,
            tutor_delay_min: DEFAULT_TUTOR_DELAY_MIN,
            tutor_delay_max: DEFAULT_TUTOR_DELAY_MAX,
            generation_delay: DEFAULT_GENERATION_DELAY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_draft_yields_defaults() {
        let settings = StudySettingsDraft::new().validate().unwrap();
        assert_eq!(settings, StudySettings::default());
    }

    #[test]
    fn zero_tick_is_rejected() {
        let draft = StudySettingsDraft {
            tick_interval: Some(Duration::ZERO),
            ..StudySettingsDraft::default()
        };
        assert_eq!(draft.validate().unwrap_err(), SettingsError::ZeroTickInterval);
    }

    #[test]
    fn inverted_tutor_bounds_are_rejected() {
        let draft = StudySettingsDraft {
            tutor_delay_min: Some(Duration::from_secs(5)),
            tutor_delay_max: Some(Duration::from_secs(1)),
            ..StudySettingsDraft::default()
        };
        assert!(matches!(
            draft.validate(),
            Err(SettingsError::InvalidTutorDelayBounds { .. })
        ));
    }

    #[test]
    fn instant_zeroes_pauses_but_keeps_ticking() {
        let settings = StudySettingsDraft::instant().validate().unwrap();
        assert!(settings.mark_studied_delay().is_zero());
        assert!(settings.tutor_delay_max().is_zero());
        assert!(settings.generation_delay().is_zero());
        assert_eq!(settings.tick_interval(), DEFAULT_TICK_INTERVAL);
    }
}
