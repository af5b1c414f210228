use rand::prelude::*;

use super::*;

/// Purely random passwords, reproducible from the seed.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomPasswordGenerator {
    seed: u64,
}

impl RandomPasswordGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl PasswordGenerator for RandomPasswordGenerator {
    fn generate(self, config: &RoundConfig) -> Code {
        let mut rng = SmallRng::seed_from_u64(self.seed);
        generate_password(&mut rng, config.parts, config.duplicates_allowed)
    }
}

/// Draws `parts` digits uniformly from `1..=8`.
///
/// Without duplicates every digit is redrawn until it differs from the ones before it.
pub fn generate_password(rng: &mut SmallRng, parts: u8, duplicates_allowed: bool) -> Code {
    let clamped = parts.clamp(1, MAX_PARTS);
    if clamped != parts {
        log::warn!(
            "Cannot generate a password with {} parts, using {} instead",
            parts,
            clamped
        );
    }

    let mut digits = Digits::new();
    for _ in 0..clamped {
        let mut digit = draw_digit(rng);
        if !duplicates_allowed {
            while digits.contains(&digit) {
                digit = draw_digit(rng);
            }
        }
        digits.push(digit);
    }

    Code::from_digits_unchecked(digits)
}

fn draw_digit(rng: &mut SmallRng) -> Digit {
    Digit::new_unchecked(rng.random_range(Digit::MIN.get()..=Digit::PASSWORD_MAX.get()))
}
