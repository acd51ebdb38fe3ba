//! Shared error types for the services crate.

use thiserror::Error;

use goon_core::model::SettingsError;

/// Errors emitted by session operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionError {
    #[error("session already completed")]
    Completed,
}

/// Errors emitted while configuring the session factory.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizServiceError {
    #[error(transparent)]
    Settings(#[from] SettingsError),
}
