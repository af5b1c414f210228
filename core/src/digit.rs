use core::fmt;
use serde::{Deserialize, Serialize};

use crate::*;

/// A single wheel value, always in `1..=9`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Digit(u8);

impl Digit {
    pub const MIN: Self = Self(1);
    pub const MAX: Self = Self(9);
    /// Largest value a generated password can hold.
    pub const PASSWORD_MAX: Self = Self(8);

    pub const fn new(value: u8) -> Result<Self> {
        if value >= Self::MIN.0 && value <= Self::MAX.0 {
            Ok(Self(value))
        } else {
            Err(VaultError::InvalidDigit { value })
        }
    }

    pub(crate) const fn new_unchecked(value: u8) -> Self {
        Self(value)
    }

    pub const fn get(self) -> u8 {
        self.0
    }

    pub const fn is_password_digit(self) -> bool {
        self.0 <= Self::PASSWORD_MAX.0
    }

    /// Next value on the wheel, wrapping from 9 back to 1.
    pub const fn inc(self) -> Self {
        if self.0 >= Self::MAX.0 {
            Self::MIN
        } else {
            Self(self.0 + 1)
        }
    }

    /// Previous value on the wheel, wrapping from 1 back to 9.
    pub const fn dec(self) -> Self {
        if self.0 <= Self::MIN.0 {
            Self::MAX
        } else {
            Self(self.0 - 1)
        }
    }
}

impl Default for Digit {
    fn default() -> Self {
        Self::MIN
    }
}

impl TryFrom<u8> for Digit {
    type Error = VaultError;

    fn try_from(value: u8) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Digit> for u8 {
    fn from(digit: Digit) -> Self {
        digit.0
    }
}

impl fmt::Display for Digit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
