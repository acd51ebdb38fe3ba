use std::time::Duration;

use thiserror::Error;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SettingsError {
    #[error("question quota must be between 1 and {max}, got {got}")]
    InvalidQuota { got: u32, max: u32 },

    #[error("low-time threshold must be at most {max} seconds, got {got}")]
    InvalidLowTimeThreshold { got: u32, max: u32 },

    #[error("feedback delay must be at most {max_ms} ms, got {got_ms} ms")]
    InvalidFeedbackDelay { got_ms: u128, max_ms: u128 },
}

//
// ─── SETTINGS ──────────────────────────────────────────────────────────────────
//

/// Tunables for a quiz session.
///
/// The defaults reproduce the classic game: ten questions, a warning once five
/// seconds or fewer remain, and a one second pause on the verdict before the
/// next question appears.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizSettings {
    quota: u32,
    low_time_threshold: u32,
    feedback_delay: Duration,
}

impl QuizSettings {
    pub const DEFAULT_QUOTA: u32 = 10;
    pub const MAX_QUOTA: u32 = 100;
    pub const DEFAULT_LOW_TIME_THRESHOLD: u32 = 5;
    pub const MAX_LOW_TIME_THRESHOLD: u32 = 20;
    pub const DEFAULT_FEEDBACK_DELAY: Duration = Duration::from_millis(1000);
    pub const MAX_FEEDBACK_DELAY: Duration = Duration::from_secs(10);

    #[must_use]
    pub fn classic() -> Self {
        Self {
            quota: Self::DEFAULT_QUOTA,
            low_time_threshold: Self::DEFAULT_LOW_TIME_THRESHOLD,
            feedback_delay: Self::DEFAULT_FEEDBACK_DELAY,
        }
    }

    /// Creates custom settings.
    ///
    /// A `low_time_threshold` of zero disables the low-time warning.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError` if any value is out of range.
    pub fn new(
        quota: u32,
        low_time_threshold: u32,
        feedback_delay: Duration,
    ) -> Result<Self, SettingsError> {
        if quota == 0 || quota > Self::MAX_QUOTA {
            return Err(SettingsError::InvalidQuota {
                got: quota,
                max: Self::MAX_QUOTA,
            });
        }
        if low_time_threshold > Self::MAX_LOW_TIME_THRESHOLD {
            return Err(SettingsError::InvalidLowTimeThreshold {
                got: low_time_threshold,
                max: Self::MAX_LOW_TIME_THRESHOLD,
            });
        }
        if feedback_delay > Self::MAX_FEEDBACK_DELAY {
            return Err(SettingsError::InvalidFeedbackDelay {
                got_ms: feedback_delay.as_millis(),
                max_ms: Self::MAX_FEEDBACK_DELAY.as_millis(),
            });
        }

        Ok(Self {
            quota,
            low_time_threshold,
            feedback_delay,
        })
    }

    /// Copy of these settings with a different quota.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError::InvalidQuota` if `quota` is out of range.
    pub fn with_quota(&self, quota: u32) -> Result<Self, SettingsError> {
        Self::new(quota, self.low_time_threshold, self.feedback_delay)
    }

    #[must_use]
    pub fn quota(&self) -> u32 {
        self.quota
    }

    #[must_use]
    pub fn low_time_threshold(&self) -> u32 {
        self.low_time_threshold
    }

    #[must_use]
    pub fn feedback_delay(&self) -> Duration {
        self.feedback_delay
    }

    /// True when `remaining` seconds should be flagged as running low.
    #[must_use]
    pub fn is_low_time(&self, remaining: u32) -> bool {
        remaining > 0 && remaining <= self.low_time_threshold
    }
}

impl Default for QuizSettings {
    fn default() -> Self {
        Self::classic()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classic_settings_match_the_game() {
        let settings = QuizSettings::default();
        assert_eq!(settings.quota(), 10);
        assert_eq!(settings.low_time_threshold(), 5);
        assert_eq!(settings.feedback_delay(), Duration::from_secs(1));
    }

    #[test]
    fn new_validates_ranges() {
        assert!(matches!(
            QuizSettings::new(0, 5, Duration::ZERO),
            Err(SettingsError::InvalidQuota { got: 0, .. })
        ));
        assert!(matches!(
            QuizSettings::new(101, 5, Duration::ZERO),
            Err(SettingsError::InvalidQuota { got: 101, .. })
        ));
        assert!(matches!(
            QuizSettings::new(10, 21, Duration::ZERO),
            Err(SettingsError::InvalidLowTimeThreshold { got: 21, .. })
        ));
        assert!(matches!(
            QuizSettings::new(10, 5, Duration::from_secs(11)),
            Err(SettingsError::InvalidFeedbackDelay { .. })
        ));
        assert!(QuizSettings::new(1, 0, Duration::ZERO).is_ok());
    }

    #[test]
    fn low_time_window_excludes_zero() {
        let settings = QuizSettings::classic();
        assert!(!settings.is_low_time(6));
        assert!(settings.is_low_time(5));
        assert!(settings.is_low_time(1));
        assert!(!settings.is_low_time(0));

        let silent = QuizSettings::new(10, 0, Duration::ZERO).unwrap();
        assert!(!silent.is_low_time(1));
    }

    #[test]
    fn with_quota_keeps_other_knobs() {
        let settings = QuizSettings::classic().with_quota(3).unwrap();
        assert_eq!(settings.quota(), 3);
        assert_eq!(settings.low_time_threshold(), 5);
    }
}
