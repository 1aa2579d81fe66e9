use std::fmt;

use thiserror::Error;

/// Why a push was refused. The rejected value travels back to the caller,
/// who decides how to dispose of it.
#[derive(PartialEq, Eq, Clone, Copy)]
pub enum PushError<T> {
    /// The queue has been shut down and accepts nothing further.
    Disabled(T),
    /// Capacity enforcement is on and the queue is over its limit.
    Full(T),
}

impl<T> PushError<T> {
    /// Recover the value that was not enqueued.
    pub fn into_inner(self) -> T {
        match self {
            PushError::Disabled(v) | PushError::Full(v) => v,
        }
    }

    pub fn is_full(&self) -> bool {
        matches!(self, PushError::Full(_))
    }

    pub fn is_disabled(&self) -> bool {
        matches!(self, PushError::Disabled(_))
    }
}

// Hand-written so `T` needs neither `Debug` nor `Display`.
impl<T> fmt::Debug for PushError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PushError::Disabled(_) => write!(f, "Disabled(..)"),
            PushError::Full(_) => write!(f, "Full(..)"),
        }
    }
}

impl<T> fmt::Display for PushError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PushError::Disabled(_) => write!(f, "Queue is disabled"),
            PushError::Full(_) => write!(f, "Queue is full, value dropped"),
        }
    }
}

impl<T> std::error::Error for PushError<T> {}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("config parse error: {0}")]
    Parse(String),
}
