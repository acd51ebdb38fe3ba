use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DifficultyError {
    #[error("unknown difficulty level: {0:?} (expected E, 1 or 2)")]
    Unknown(String),
}

/// Selects whether, and how strictly, each question is timed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Difficulty {
    /// Level E: answer at your own pace.
    #[default]
    NoLimit,
    /// Level 1: twenty seconds per question.
    Limit20,
    /// Level 2: ten seconds per question.
    Limit10,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [
        Difficulty::NoLimit,
        Difficulty::Limit20,
        Difficulty::Limit10,
    ];

    /// Seconds allowed per question, or `None` when untimed.
    #[must_use]
    pub fn time_limit_secs(self) -> Option<u32> {
        match self {
            Difficulty::NoLimit => None,
            Difficulty::Limit20 => Some(20),
            Difficulty::Limit10 => Some(10),
        }
    }

    #[must_use]
    pub fn is_timed(self) -> bool {
        self.time_limit_secs().is_some()
    }

    /// Short level code used on the command line.
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Difficulty::NoLimit => "E",
            Difficulty::Limit20 => "1",
            Difficulty::Limit10 => "2",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Difficulty::NoLimit => "Level E: No Time Limit",
            Difficulty::Limit20 => "Level 1: 20 Second Limit",
            Difficulty::Limit10 => "Level 2: 10 Second Limit",
        }
    }
}

impl FromStr for Difficulty {
    type Err = DifficultyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "e" | "none" | "no-limit" => Ok(Difficulty::NoLimit),
            "1" | "20" => Ok(Difficulty::Limit20),
            "2" | "10" => Ok(Difficulty::Limit10),
            _ => Err(DifficultyError::Unknown(s.to_string())),
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_limits_match_levels() {
        assert_eq!(Difficulty::NoLimit.time_limit_secs(), None);
        assert_eq!(Difficulty::Limit20.time_limit_secs(), Some(20));
        assert_eq!(Difficulty::Limit10.time_limit_secs(), Some(10));
        assert!(!Difficulty::default().is_timed());
    }

    #[test]
    fn parses_level_codes_and_aliases() {
        assert_eq!("E".parse::<Difficulty>().unwrap(), Difficulty::NoLimit);
        assert_eq!("no-limit".parse::<Difficulty>().unwrap(), Difficulty::NoLimit);
        assert_eq!(" 1 ".parse::<Difficulty>().unwrap(), Difficulty::Limit20);
        assert_eq!("10".parse::<Difficulty>().unwrap(), Difficulty::Limit10);

        let err = "3".parse::<Difficulty>().unwrap_err();
        assert_eq!(err, DifficultyError::Unknown("3".into()));
    }

    #[test]
    fn codes_round_trip_through_parse() {
        for level in Difficulty::ALL {
            assert_eq!(level.code().parse::<Difficulty>().unwrap(), level);
        }
    }
}
