use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum VaultError {
    #[error("Level must be at least 1")]
    InvalidLevel,
    #[error("Unsupported number of parts: {parts}")]
    InvalidParts { parts: u8 },
    #[error("Attempt limit must be at least 1")]
    ZeroAttemptLimit,
    #[error("Digit out of range: {value}")]
    InvalidDigit { value: u8 },
    #[error("Expected {expected} digits, got {actual}")]
    LengthMismatch { expected: u8, actual: usize },
    #[error("Code repeats a digit but duplicates are not allowed")]
    DuplicateDigits,
    #[error("No wheel at part {part}")]
    InvalidPart { part: usize },
    #[error("Round already ended, no new moves are accepted")]
    RoundFinished,
    #[error("Round is still in progress")]
    RoundInProgress,
    #[error("Round state does not match its password and guess")]
    InconsistentRound,
}

pub type Result<T> = core::result::Result<T, VaultError>;
