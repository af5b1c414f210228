use serde::{Deserialize, Serialize};

use crate::*;

/// Progress across rounds. The caller owns it and hands it to every round it plays.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SessionSnapshot")]
pub struct Session {
    level: Level,
    total_score: Points,
}

#[derive(Deserialize)]
struct SessionSnapshot {
    level: Level,
    total_score: Points,
}

impl TryFrom<SessionSnapshot> for Session {
    type Error = VaultError;

    fn try_from(snapshot: SessionSnapshot) -> Result<Self> {
        let mut session = Self::at_level(snapshot.level)?;
        session.total_score = snapshot.total_score;
        Ok(session)
    }
}

impl Session {
    pub const fn new() -> Self {
        Self {
            level: 1,
            total_score: 0,
        }
    }

    pub fn at_level(level: Level) -> Result<Self> {
        if level == 0 {
            return Err(VaultError::InvalidLevel);
        }
        Ok(Self {
            level,
            total_score: 0,
        })
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn total_score(&self) -> Points {
        self.total_score
    }

    pub fn round_config(&self) -> Result<RoundConfig> {
        RoundConfig::for_level(self.level)
    }

    pub fn start_round<G: PasswordGenerator>(&self, generator: G) -> Result<Round> {
        let config = self.round_config()?;
        let password = generator.generate(&config);
        Round::new(config, password)
    }

    /// Moves on after a finished round: the next level after a solve, the same level after a failure.
    ///
    /// The round is used up, so a single solve advances the level once. A round still in progress is rejected.
    pub fn finish_round(&mut self, round: Round) -> Result<Level> {
        match round.status() {
            RoundStatus::InProgress => return Err(VaultError::RoundInProgress),
            RoundStatus::Solved => {
                self.level = self.level.saturating_add(1);
                log::debug!("Advanced to level {}", self.level);
            }
            RoundStatus::Failed => {
                log::debug!("Retrying level {}", self.level);
            }
        }
        Ok(self.level)
    }

    pub(crate) fn add_points(&mut self, points: Points) {
        self.total_score = self.total_score.saturating_add(points);
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
