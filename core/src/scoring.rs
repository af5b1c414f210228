use serde::{Deserialize, Serialize};

use crate::*;

/// What the indicator lights show after a guess is checked.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feedback {
    /// Guess digits that match some password digit by value.
    pub correct: u8,
    /// Guess digits that match the password digit at the same position.
    pub in_place: u8,
}

impl Feedback {
    pub const fn cracks(self, parts: u8) -> bool {
        self.in_place == parts
    }
}

/// Scores `guess` against `password`.
///
/// Every guess digit claims at most one password slot holding the same value, taking the first slot nobody has
/// claimed yet, and a slot can only be claimed once. `correct` is the number of claims. `in_place` is counted per
/// position and does not depend on which slots were claimed.
///
/// With `duplicates_allowed` unset a well formed password holds every value once, so the scan finds at most one
/// slot either way. The flag is only logged; a password that breaks it is still scored by claims.
pub fn score_guess(password: &Code, guess: &Code, duplicates_allowed: bool) -> Feedback {
    if !duplicates_allowed && log::log_enabled!(log::Level::Trace) && password.has_duplicates() {
        log::trace!("Scoring against {} with repeated digits", password);
    }

    let mut claimed = [false; MAX_PARTS as usize];
    let mut correct = 0;

    for value in guess.iter() {
        let slot = password
            .iter()
            .zip(claimed)
            .position(|(digit, taken)| digit == value && !taken);

        if let Some(slot) = slot {
            claimed[slot] = true;
            correct += 1;
        }
    }

    let in_place = guess
        .iter()
        .zip(password.iter())
        .filter(|(guessed, digit)| guessed == digit)
        .count() as u8;

    Feedback { correct, in_place }
}
