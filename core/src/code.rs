use core::fmt;
use core::ops::Index;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::*;

/// Inline storage for the digits of a code.
pub type Digits = SmallVec<[Digit; MAX_PARTS as usize]>;

/// An ordered sequence of digits, used both for the hidden password and for the player's guess.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Digits", into = "Digits")]
pub struct Code {
    digits: Digits,
}

impl Code {
    pub fn filled(parts: u8, digit: Digit) -> Result<Self> {
        check_parts(parts)?;
        Ok(Self {
            digits: SmallVec::from_elem(digit, parts.into()),
        })
    }

    pub fn from_values(values: &[u8]) -> Result<Self> {
        let digits = values
            .iter()
            .map(|&value| Digit::new(value))
            .collect::<Result<Digits>>()?;
        Self::try_from(digits)
    }

    pub(crate) fn from_digits_unchecked(digits: Digits) -> Self {
        Self { digits }
    }

    pub fn parts(&self) -> u8 {
        self.digits.len() as u8
    }

    pub fn get(&self, part: usize) -> Option<Digit> {
        self.digits.get(part).copied()
    }

    pub(crate) fn get_mut(&mut self, part: usize) -> Option<&mut Digit> {
        self.digits.get_mut(part)
    }

    pub fn iter(&self) -> impl Iterator<Item = Digit> + '_ {
        self.digits.iter().copied()
    }

    pub fn as_slice(&self) -> &[Digit] {
        &self.digits
    }

    pub fn has_duplicates(&self) -> bool {
        self.digits
            .iter()
            .enumerate()
            .any(|(i, digit)| self.digits[..i].contains(digit))
    }

    /// Whether every digit could have come out of the password generator.
    pub fn is_password(&self) -> bool {
        self.digits.iter().all(|digit| digit.is_password_digit())
    }
}

fn check_parts(parts: u8) -> Result<()> {
    if (1..=MAX_PARTS).contains(&parts) {
        Ok(())
    } else {
        Err(VaultError::InvalidParts { parts })
    }
}

impl TryFrom<Digits> for Code {
    type Error = VaultError;

    fn try_from(digits: Digits) -> Result<Self> {
        let parts = u8::try_from(digits.len()).unwrap_or(u8::MAX);
        check_parts(parts)?;
        Ok(Self { digits })
    }
}

impl From<Code> for Digits {
    fn from(code: Code) -> Self {
        code.digits
    }
}

impl Index<usize> for Code {
    type Output = Digit;

    fn index(&self, part: usize) -> &Self::Output {
        &self.digits[part]
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut digits = self.digits.iter();
        if let Some(first) = digits.next() {
            write!(f, "{}", first)?;
        }
        for digit in digits {
            write!(f, " {}", digit)?;
        }
        Ok(())
    }
}
