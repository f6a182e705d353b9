use rand::Rng;
use std::fmt;
use thiserror::Error;

pub const OTP_LENGTH: usize = 6;

/// A six-digit one-time code. No expiry and no attempt limit are attached to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OtpCode(String);

impl OtpCode {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OtpCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum OtpError {
    #[error("Please enter a 6-digit OTP")]
    WrongLength,
    #[error("Invalid OTP. Please try again.")]
    Mismatch,
}

pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> OtpCode {
    OtpCode(rng.gen_range(100_000..=999_999u32).to_string())
}

/// Strips everything but ASCII digits.
pub fn normalize(input: &str) -> String {
    input.chars().filter(|c| c.is_ascii_digit()).collect()
}

pub fn verify(input: &str, expected: &OtpCode) -> Result<(), OtpError> {
    let digits = normalize(input);
    if digits.len() != OTP_LENGTH {
        return Err(OtpError::WrongLength);
    }
    if digits == expected.0 {
        Ok(())
    } else {
        Err(OtpError::Mismatch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn generated_codes_are_six_digits() {
        let mut rng = rand::thread_rng();
        for _ in 0..1000 {
            let code = generate(&mut rng);
            assert_eq!(code.as_str().len(), OTP_LENGTH);
            assert!(code.as_str().chars().all(|c| c.is_ascii_digit()));
            let value: u32 = code.as_str().parse().unwrap();
            assert!((100_000..=999_999).contains(&value));
        }
    }

    #[test]
    fn hundred_codes_are_not_all_identical() {
        let mut rng = rand::thread_rng();
        let codes: HashSet<String> = (0..100).map(|_| generate(&mut rng).to_string()).collect();
        assert!(codes.len() > 1);
    }

    #[test]
    fn code_verifies_against_itself() {
        let code = generate(&mut StdRng::seed_from_u64(7));
        assert_eq!(verify(code.as_str(), &code), Ok(()));
    }

    #[test]
    fn other_code_is_a_mismatch() {
        let code = OtpCode("123456".to_string());
        assert_eq!(verify("654321", &code), Err(OtpError::Mismatch));
    }

    #[test]
    fn partial_input_is_wrong_length() {
        let code = OtpCode("123456".to_string());
        assert_eq!(verify("12345", &code), Err(OtpError::WrongLength));
        assert_eq!(verify("", &code), Err(OtpError::WrongLength));
        assert_eq!(verify("1234567", &code), Err(OtpError::WrongLength));
    }

    #[test]
    fn separators_are_ignored_before_comparing() {
        let code = OtpCode("123456".to_string());
        assert_eq!(verify("123 456", &code), Ok(()));
        assert_eq!(verify("12-34-56", &code), Ok(()));
    }
}
