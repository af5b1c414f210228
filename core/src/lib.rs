#![no_std]

extern crate alloc;

use serde::{Deserialize, Serialize};

pub use code::*;
pub use digit::*;
pub use error::*;
pub use generator::*;
pub use round::*;
pub use scoring::*;
pub use session::*;
pub use types::*;

mod code;
mod digit;
mod error;
mod generator;
mod round;
mod scoring;
mod session;
mod types;

/// Number of wheels on the vault door.
pub const DEFAULT_PARTS: u8 = 4;

/// Longest code supported, every part can still hold a distinct password digit.
pub const MAX_PARTS: u8 = Digit::PASSWORD_MAX.get();

pub const BASE_ATTEMPTS: Attempts = 20;
pub const ATTEMPT_STEP: Attempts = 2;
pub const MIN_ATTEMPTS: Attempts = 10;

/// First level whose passwords may repeat digits.
pub const DUPLICATES_FROM_LEVEL: Level = 6;

const RAMP_LEVELS: Level = 4;

pub const fn duplicates_allowed(level: Level) -> bool {
    level >= DUPLICATES_FROM_LEVEL
}

/// Attempts allowed for a round.
///
/// Each tier (unique digits from level 1, repeated digits from level 6) starts at 20 attempts and loses 2 per level
/// until it bottoms out at 10 on its fifth level.
pub const fn compute_attempt_limit(level: Level, duplicates_allowed: bool) -> Attempts {
    let first_level = if duplicates_allowed {
        DUPLICATES_FROM_LEVEL
    } else {
        1
    };
    let steps = level.saturating_sub(first_level);
    if steps >= RAMP_LEVELS {
        MIN_ATTEMPTS
    } else {
        BASE_ATTEMPTS - steps * ATTEMPT_STEP
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundConfig {
    pub level: Level,
    pub parts: u8,
    pub duplicates_allowed: bool,
    pub attempt_limit: Attempts,
}

impl RoundConfig {
    pub const fn new_unchecked(
        level: Level,
        parts: u8,
        duplicates_allowed: bool,
        attempt_limit: Attempts,
    ) -> Self {
        Self {
            level,
            parts,
            duplicates_allowed,
            attempt_limit,
        }
    }

    pub fn new(
        level: Level,
        parts: u8,
        duplicates_allowed: bool,
        attempt_limit: Attempts,
    ) -> Result<Self> {
        let config = Self::new_unchecked(level, parts, duplicates_allowed, attempt_limit);
        config.validate()?;
        Ok(config)
    }

    /// The standard round for `level`.
    pub fn for_level(level: Level) -> Result<Self> {
        let duplicates_allowed = duplicates_allowed(level);
        Self::new(
            level,
            DEFAULT_PARTS,
            duplicates_allowed,
            compute_attempt_limit(level, duplicates_allowed),
        )
    }

    pub fn validate(&self) -> Result<()> {
        if self.level == 0 {
            return Err(VaultError::InvalidLevel);
        }
        if !(1..=MAX_PARTS).contains(&self.parts) {
            return Err(VaultError::InvalidParts { parts: self.parts });
        }
        if self.attempt_limit == 0 {
            return Err(VaultError::ZeroAttemptLimit);
        }
        Ok(())
    }
}
