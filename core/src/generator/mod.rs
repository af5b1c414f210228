use crate::*;
pub use random::*;

mod random;

pub trait PasswordGenerator {
    fn generate(self, config: &RoundConfig) -> Code;
}

/// Hands out a known password, for replays and tests.
#[derive(Clone, Debug, PartialEq)]
pub struct FixedPasswordGenerator {
    password: Code,
}

impl FixedPasswordGenerator {
    pub fn new(password: Code) -> Self {
        Self { password }
    }
}

impl PasswordGenerator for FixedPasswordGenerator {
    fn generate(self, config: &RoundConfig) -> Code {
        if self.password.parts() != config.parts {
            log::warn!(
                "Fixed password has {} parts but the round expects {}",
                self.password.parts(),
                config.parts
            );
        }
        self.password
    }
}
