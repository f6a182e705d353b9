use crate::model::OtpChallenge;
use crate::services::otp::{self, OtpCode, OTP_LENGTH};
use rand::Rng;
use tracing::{info, warn};

/// The OTP screen: the outstanding challenge plus what the user has typed.
///
/// Attempts are unbounded and the code never expires; failures are only
/// counted so they show up in the log.
#[derive(Debug)]
pub struct OtpChallengeState {
    challenge: OtpChallenge,
    pub input: String,
    pub error: Option<String>,
    pub failed_attempts: u32,
}

impl OtpChallengeState {
    pub fn issue<R: Rng + ?Sized>(destination: String, rng: &mut R) -> Self {
        let code = otp::generate(rng);
        info!("OTP challenge issued for {}", destination);
        Self {
            challenge: OtpChallenge { code, destination },
            input: String::new(),
            error: None,
            failed_attempts: 0,
        }
    }

    pub fn destination(&self) -> &str {
        &self.challenge.destination
    }

    pub fn code(&self) -> &OtpCode {
        &self.challenge.code
    }

    /// Non-digits are dropped and input stops at six digits.
    pub fn push(&mut self, c: char) {
        if c.is_ascii_digit() && self.input.len() < OTP_LENGTH {
            self.input.push(c);
            self.error = None;
        }
    }

    pub fn backspace(&mut self) {
        self.input.pop();
        self.error = None;
    }

    pub fn verify(&mut self) -> bool {
        match otp::verify(&self.input, &self.challenge.code) {
            Ok(()) => {
                self.error = None;
                true
            }
            Err(e) => {
                self.failed_attempts += 1;
                warn!(
                    "OTP verification failed for {} ({}), {} failed attempt(s) so far",
                    self.challenge.destination, e, self.failed_attempts
                );
                self.error = Some(e.to_string());
                false
            }
        }
    }

    /// Replaces the code; the old one stops verifying.
    pub fn resend<R: Rng + ?Sized>(&mut self, rng: &mut R) -> &OtpCode {
        self.challenge.code = otp::generate(rng);
        self.input.clear();
        self.error = None;
        info!("OTP re-sent to {}", self.challenge.destination);
        &self.challenge.code
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn challenge() -> OtpChallengeState {
        OtpChallengeState::issue("+919876543210".to_string(), &mut StdRng::seed_from_u64(1))
    }

    fn type_code(state: &mut OtpChallengeState, code: &str) {
        for c in code.chars() {
            state.push(c);
        }
    }

    #[test]
    fn input_keeps_only_six_digits() {
        let mut state = challenge();
        type_code(&mut state, "12a3-4567890");
        assert_eq!(state.input, "123456");
    }

    #[test]
    fn correct_code_verifies() {
        let mut state = challenge();
        let code = state.code().to_string();
        type_code(&mut state, &code);
        assert!(state.verify());
        assert_eq!(state.error, None);
    }

    #[test]
    fn short_input_reports_length_error() {
        let mut state = challenge();
        type_code(&mut state, "123");
        assert!(!state.verify());
        assert_eq!(state.error.as_deref(), Some("Please enter a 6-digit OTP"));
    }

    #[test]
    fn wrong_code_can_be_retried_without_limit() {
        let mut state = challenge();
        let wrong = if state.code().as_str() == "111111" { "222222" } else { "111111" };
        for _ in 0..50 {
            state.input.clear();
            type_code(&mut state, wrong);
            assert!(!state.verify());
        }
        assert_eq!(state.failed_attempts, 50);
        assert_eq!(state.error.as_deref(), Some("Invalid OTP. Please try again."));

        let code = state.code().to_string();
        state.input.clear();
        type_code(&mut state, &code);
        assert!(state.verify());
    }

    #[test]
    fn resend_invalidates_previous_code() {
        let mut rng = StdRng::seed_from_u64(99);
        let mut state = OtpChallengeState::issue("user@gmail.com".to_string(), &mut rng);
        let old = state.code().clone();
        let mut new = state.resend(&mut rng).clone();
        while new == old {
            new = state.resend(&mut rng).clone();
        }

        type_code(&mut state, old.as_str());
        assert!(!state.verify());

        state.input.clear();
        type_code(&mut state, new.as_str());
        assert!(state.verify());
    }

    #[test]
    fn resend_clears_input_and_error() {
        let mut state = challenge();
        type_code(&mut state, "000");
        state.verify();
        state.resend(&mut rand::thread_rng());
        assert!(state.input.is_empty());
        assert_eq!(state.error, None);
    }
}
