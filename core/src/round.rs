use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundStatus {
    InProgress,
    Solved,
    Failed,
}

impl RoundStatus {
    pub const fn is_in_progress(self) -> bool {
        matches!(self, Self::InProgress)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Solved | Self::Failed)
    }
}

impl Default for RoundStatus {
    fn default() -> Self {
        Self::InProgress
    }
}

/// Everything the presentation layer needs to draw a round.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundState {
    pub attempts_taken: Attempts,
    pub correct_count: u8,
    pub in_place_count: u8,
    pub status: RoundStatus,
    pub score: Points,
}

impl RoundState {
    pub const fn is_solved(&self) -> bool {
        matches!(self.status, RoundStatus::Solved)
    }

    pub const fn is_failed(&self) -> bool {
        matches!(self.status, RoundStatus::Failed)
    }

    pub const fn feedback(&self) -> Feedback {
        Feedback {
            correct: self.correct_count,
            in_place: self.in_place_count,
        }
    }
}

/// One level of play: a fixed password, the player's wheels and the running result.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RoundSnapshot")]
pub struct Round {
    config: RoundConfig,
    password: Code,
    guess: Code,
    state: RoundState,
}

/// A round as it comes off the wire, checked before it becomes a [`Round`].
#[derive(Deserialize)]
struct RoundSnapshot {
    config: RoundConfig,
    password: Code,
    guess: Code,
    state: RoundState,
}

impl TryFrom<RoundSnapshot> for Round {
    type Error = VaultError;

    fn try_from(snapshot: RoundSnapshot) -> Result<Self> {
        let RoundSnapshot {
            config,
            password,
            guess,
            state,
        } = snapshot;

        check_password(&config, &password)?;
        check_length(&config, &guess)?;
        let round = Self {
            config,
            password,
            guess,
            state,
        };
        round.check_state()?;
        Ok(round)
    }
}

fn check_length(config: &RoundConfig, code: &Code) -> Result<()> {
    if code.parts() == config.parts {
        Ok(())
    } else {
        Err(VaultError::LengthMismatch {
            expected: config.parts,
            actual: code.as_slice().len(),
        })
    }
}

fn check_password(config: &RoundConfig, password: &Code) -> Result<()> {
    config.validate()?;
    check_length(config, password)?;
    if let Some(digit) = password.iter().find(|digit| !digit.is_password_digit()) {
        return Err(VaultError::InvalidDigit { value: digit.get() });
    }
    if !config.duplicates_allowed && password.has_duplicates() {
        return Err(VaultError::DuplicateDigits);
    }
    Ok(())
}

impl Round {
    pub fn new(config: RoundConfig, password: Code) -> Result<Self> {
        check_password(&config, &password)?;

        log::debug!(
            "Round prepared: level {}, {} parts, {} attempts, duplicates {}",
            config.level,
            config.parts,
            config.attempt_limit,
            if config.duplicates_allowed { "allowed" } else { "not allowed" }
        );

        Ok(Self {
            guess: Code::filled(config.parts, Digit::MIN)?,
            config,
            password,
            state: RoundState::default(),
        })
    }

    pub fn config(&self) -> &RoundConfig {
        &self.config
    }

    pub fn level(&self) -> Level {
        self.config.level
    }

    pub fn password(&self) -> &Code {
        &self.password
    }

    pub fn guess(&self) -> &Code {
        &self.guess
    }

    pub fn state(&self) -> RoundState {
        self.state
    }

    pub fn status(&self) -> RoundStatus {
        self.state.status
    }

    pub fn is_finished(&self) -> bool {
        self.state.status.is_finished()
    }

    pub fn attempts_remaining(&self) -> Attempts {
        self.config
            .attempt_limit
            .saturating_sub(self.state.attempts_taken)
    }

    pub fn increment(&mut self, part: usize) -> Result<Digit> {
        self.turn_wheel(part, Digit::inc)
    }

    pub fn decrement(&mut self, part: usize) -> Result<Digit> {
        self.turn_wheel(part, Digit::dec)
    }

    pub fn set_guess(&mut self, guess: Code) -> Result<()> {
        self.check_in_progress()?;
        check_length(&self.config, &guess)?;
        self.guess = guess;
        Ok(())
    }

    /// Checks the current guess, the only way a round can end.
    ///
    /// A solved round adds its score to `session`. Once the round is finished every further call is rejected and
    /// the state stays as it was.
    pub fn evaluate_attempt(&mut self, session: &mut Session) -> Result<RoundState> {
        self.check_in_progress()?;

        let Feedback { correct, in_place } =
            score_guess(&self.password, &self.guess, self.config.duplicates_allowed);
        self.state.correct_count = correct;
        self.state.in_place_count = in_place;

        if in_place == self.config.parts {
            self.state.status = RoundStatus::Solved;
            self.state.score = self.score();
            session.add_points(self.state.score);
        } else {
            self.state.attempts_taken += 1;
            if self.state.attempts_taken >= self.config.attempt_limit {
                self.state.status = RoundStatus::Failed;
            }
        }

        log::trace!(
            "Checked {}: {} correct, {} in place, {:?} after {} attempts",
            self.guess,
            correct,
            in_place,
            self.state.status,
            self.state.attempts_taken
        );

        Ok(self.state)
    }

    fn turn_wheel(&mut self, part: usize, turn: fn(Digit) -> Digit) -> Result<Digit> {
        self.check_in_progress()?;
        let digit = self
            .guess
            .get_mut(part)
            .ok_or(VaultError::InvalidPart { part })?;
        *digit = turn(*digit);
        log::trace!("Wheel {} turned to {}", part, digit);
        Ok(*digit)
    }

    fn score(&self) -> Points {
        self.config
            .attempt_limit
            .saturating_sub(self.state.attempts_taken)
            .saturating_mul(self.config.level)
    }

    /// The state is one `evaluate_attempt` could have produced from this password and guess.
    fn check_state(&self) -> Result<()> {
        let RoundState {
            attempts_taken,
            correct_count,
            in_place_count,
            status,
            score,
        } = self.state;
        let parts = self.config.parts;
        let limit = self.config.attempt_limit;

        let expected_status = if in_place_count == parts {
            RoundStatus::Solved
        } else if attempts_taken >= limit {
            RoundStatus::Failed
        } else {
            RoundStatus::InProgress
        };
        let expected_score = if status == RoundStatus::Solved {
            self.score()
        } else {
            0
        };
        // finished rounds lock the wheels, so the last checked guess is still the current one
        let feedback_matches = !status.is_finished()
            || score_guess(&self.password, &self.guess, self.config.duplicates_allowed)
                == self.state.feedback();

        let consistent = in_place_count <= correct_count
            && correct_count <= parts
            && attempts_taken <= limit
            && status == expected_status
            && score == expected_score
            && feedback_matches;
        if consistent {
            Ok(())
        } else {
            log::debug!("Rejected round state {:?}", self.state);
            Err(VaultError::InconsistentRound)
        }
    }

    fn check_in_progress(&self) -> Result<()> {
        if self.state.status.is_finished() {
            Err(VaultError::RoundFinished)
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::format;
    use alloc::string::String;

    fn code(values: &[u8]) -> Code {
        Code::from_values(values).unwrap()
    }

    fn round(level: Level, password: &[u8]) -> Round {
        Round::new(RoundConfig::for_level(level).unwrap(), code(password)).unwrap()
    }

    #[test]
    fn starts_with_all_ones_and_nothing_taken() {
        let round = round(1, &[2, 4, 6, 8]);

        assert_eq!(round.guess(), &code(&[1, 1, 1, 1]));
        assert_eq!(round.state(), RoundState::default());
        assert_eq!(round.attempts_remaining(), 20);
    }

    #[test]
    fn wheels_turn_and_wrap() {
        let mut round = round(1, &[2, 4, 6, 8]);

        assert_eq!(round.decrement(0).unwrap().get(), 9);
        assert_eq!(round.increment(0).unwrap().get(), 1);
        assert_eq!(round.increment(3).unwrap().get(), 2);
        assert_eq!(round.guess(), &code(&[1, 1, 1, 2]));
        assert_eq!(round.increment(4), Err(VaultError::InvalidPart { part: 4 }));
    }

    #[test]
    fn miss_counts_an_attempt() {
        let mut session = Session::new();
        let mut round = round(1, &[1, 2, 3, 4]);
        round.set_guess(code(&[4, 3, 2, 1])).unwrap();

        let state = round.evaluate_attempt(&mut session).unwrap();

        assert_eq!(state.status, RoundStatus::InProgress);
        assert_eq!(state.attempts_taken, 1);
        assert_eq!(state.feedback(), Feedback { correct: 4, in_place: 0 });
        assert_eq!(round.attempts_remaining(), 19);
        assert_eq!(session.total_score(), 0);
    }

    #[test]
    fn solving_scores_remaining_attempts_times_level() {
        let mut session = Session::at_level(3).unwrap();
        let mut round = round(3, &[5, 6, 7, 8]);

        round.evaluate_attempt(&mut session).unwrap();
        round.evaluate_attempt(&mut session).unwrap();
        round.set_guess(code(&[5, 6, 7, 8])).unwrap();
        let state = round.evaluate_attempt(&mut session).unwrap();

        assert!(state.is_solved());
        assert!(!state.is_failed());
        assert_eq!(state.attempts_taken, 2);
        assert_eq!(state.in_place_count, 4);
        assert_eq!(state.score, (16 - 2) * 3);
        assert_eq!(session.total_score(), state.score);
    }

    #[test]
    fn first_try_scores_full_limit() {
        let mut session = Session::new();
        let mut round = round(1, &[1, 2, 3, 4]);
        round.set_guess(code(&[1, 2, 3, 4])).unwrap();

        let state = round.evaluate_attempt(&mut session).unwrap();

        assert_eq!(state.score, 20);
        assert_eq!(session.total_score(), 20);
    }

    #[test]
    fn running_out_of_attempts_fails_for_good() {
        let mut session = Session::new();
        let config = RoundConfig::new(2, 4, false, 3).unwrap();
        let mut round = Round::new(config, code(&[1, 2, 3, 4])).unwrap();

        for _ in 0..2 {
            let state = round.evaluate_attempt(&mut session).unwrap();
            assert_eq!(state.status, RoundStatus::InProgress);
        }
        let failed = round.evaluate_attempt(&mut session).unwrap();
        assert!(failed.is_failed());
        assert_eq!(failed.attempts_taken, 3);
        assert_eq!(failed.score, 0);

        assert_eq!(round.evaluate_attempt(&mut session), Err(VaultError::RoundFinished));
        assert_eq!(round.increment(0), Err(VaultError::RoundFinished));
        assert_eq!(
            round.set_guess(code(&[1, 2, 3, 4])),
            Err(VaultError::RoundFinished)
        );
        assert_eq!(round.state(), failed);
        assert_eq!(session.total_score(), 0);
    }

    #[test]
    fn solved_round_is_terminal() {
        let mut session = Session::new();
        let mut round = round(1, &[1, 2, 3, 4]);
        round.set_guess(code(&[1, 2, 3, 4])).unwrap();
        let solved = round.evaluate_attempt(&mut session).unwrap();

        assert_eq!(round.evaluate_attempt(&mut session), Err(VaultError::RoundFinished));
        assert_eq!(round.decrement(2), Err(VaultError::RoundFinished));
        assert_eq!(round.state(), solved);
        assert_eq!(session.total_score(), 20);
    }

    #[test]
    fn rejects_passwords_that_break_the_round_rules() {
        let unique = RoundConfig::for_level(1).unwrap();
        let repeated = RoundConfig::for_level(7).unwrap();

        assert_eq!(
            Round::new(unique, code(&[1, 1, 2, 3])).unwrap_err(),
            VaultError::DuplicateDigits
        );
        assert!(Round::new(repeated, code(&[1, 1, 2, 3])).is_ok());
        assert_eq!(
            Round::new(repeated, code(&[1, 9, 2, 3])).unwrap_err(),
            VaultError::InvalidDigit { value: 9 }
        );
        assert_eq!(
            Round::new(unique, code(&[1, 2, 3])).unwrap_err(),
            VaultError::LengthMismatch {
                expected: 4,
                actual: 3
            }
        );
    }

    #[test]
    fn snapshot_round_trips_through_json() {
        let mut session = Session::new();
        let mut round = round(2, &[8, 1, 5, 3]);
        round.increment(1).unwrap();
        round.evaluate_attempt(&mut session).unwrap();

        let json = serde_json::to_string(&round).unwrap();
        let restored: Round = serde_json::from_str(&json).unwrap();

        assert_eq!(restored, round);
        assert_eq!(restored.state().attempts_taken, 1);
    }

    #[test]
    fn solved_snapshot_round_trips_through_json() {
        let mut session = Session::new();
        let mut round = round(3, &[2, 7, 1, 8]);
        round.set_guess(code(&[2, 7, 1, 8])).unwrap();
        round.evaluate_attempt(&mut session).unwrap();

        let json = serde_json::to_string(&round).unwrap();
        assert_eq!(serde_json::from_str::<Round>(&json).unwrap(), round);
    }

    fn snapshot(password: &str, guess: &str, state: &str) -> String {
        format!(
            r#"{{"config":{{"level":1,"parts":4,"duplicates_allowed":false,"attempt_limit":20}},"password":{password},"guess":{guess},"state":{state}}}"#
        )
    }

    const FRESH: &str =
        r#"{"attempts_taken":0,"correct_count":0,"in_place_count":0,"status":"InProgress","score":0}"#;

    #[test]
    fn snapshot_must_follow_the_round_rules() {
        let load = |json: String| serde_json::from_str::<Round>(&json);

        assert!(load(snapshot("[1,2,3,4]", "[1,1,1,1]", FRESH)).is_ok());
        // repeated password digits while duplicates are off
        assert!(load(snapshot("[1,1,1,1]", "[1,1,1,1]", FRESH)).is_err());
        // password digit outside 1..=8
        assert!(load(snapshot("[1,2,3,9]", "[1,1,1,1]", FRESH)).is_err());
        // guess shorter than the round
        assert!(load(snapshot("[1,2,3,4]", "[1,1]", FRESH)).is_err());
    }

    #[test]
    fn snapshot_state_must_match_password_and_guess() {
        let load = |state: &str| serde_json::from_str::<Round>(&snapshot("[1,2,3,4]", "[1,2,3,4]", state));

        let solved =
            r#"{"attempts_taken":2,"correct_count":4,"in_place_count":4,"status":"Solved","score":18}"#;
        assert!(load(solved).is_ok());

        let solved_without_match =
            r#"{"attempts_taken":2,"correct_count":0,"in_place_count":0,"status":"Solved","score":18}"#;
        let inflated_score =
            r#"{"attempts_taken":2,"correct_count":4,"in_place_count":4,"status":"Solved","score":500}"#;
        let in_place_over_correct =
            r#"{"attempts_taken":1,"correct_count":1,"in_place_count":3,"status":"InProgress","score":0}"#;
        let out_of_attempts =
            r#"{"attempts_taken":20,"correct_count":4,"in_place_count":0,"status":"InProgress","score":0}"#;
        let failed_early =
            r#"{"attempts_taken":3,"correct_count":4,"in_place_count":0,"status":"Failed","score":0}"#;
        for state in [
            solved_without_match,
            inflated_score,
            in_place_over_correct,
            out_of_attempts,
            failed_early,
        ] {
            assert!(load(state).is_err(), "{state}");
        }
    }

    #[test]
    fn inconsistent_state_is_reported() {
        let mut round = round(1, &[1, 2, 3, 4]);
        round.state.status = RoundStatus::Solved;
        assert_eq!(round.check_state(), Err(VaultError::InconsistentRound));
    }
}
