use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

static USERNAME_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z0-9_]+$").unwrap());

pub const USERNAME_MIN: usize = 3;
pub const USERNAME_MAX: usize = 20;

/// Names the mock backend reports as already registered.
pub const TAKEN_USERNAMES: &[&str] = &["admin", "user", "test", "olx", "seller", "buyer"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum UsernameError {
    #[error("Username is required")]
    Empty,
    #[error("Username must be at least 3 characters")]
    TooShort,
    #[error("Username must be at most 20 characters")]
    TooLong,
    #[error("Username can only contain letters, numbers and underscore")]
    InvalidCharacters,
    #[error("Username is already taken")]
    Taken,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Availability {
    Available,
    Taken,
}

/// The one place that decides whether a username can be registered.
/// Both the live check and the final submit go through it.
#[derive(Debug, Clone)]
pub struct UsernameRegistry {
    taken: Vec<String>,
}

impl Default for UsernameRegistry {
    fn default() -> Self {
        Self::with_taken(TAKEN_USERNAMES.iter().copied())
    }
}

impl UsernameRegistry {
    pub fn with_taken<'a>(names: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            taken: names.into_iter().map(|n| n.to_lowercase()).collect(),
        }
    }

    pub fn check_format(username: &str) -> Result<(), UsernameError> {
        let trimmed = username.trim();
        if trimmed.is_empty() {
            return Err(UsernameError::Empty);
        }
        let len = username.chars().count();
        if len < USERNAME_MIN {
            return Err(UsernameError::TooShort);
        }
        if len > USERNAME_MAX {
            return Err(UsernameError::TooLong);
        }
        if !USERNAME_RE.is_match(username) {
            return Err(UsernameError::InvalidCharacters);
        }
        Ok(())
    }

    /// Case-insensitive lookup against the registered names.
    pub fn availability(&self, username: &str) -> Availability {
        let wanted = username.to_lowercase();
        if self.taken.iter().any(|t| *t == wanted) {
            Availability::Taken
        } else {
            Availability::Available
        }
    }

    pub fn check(&self, username: &str) -> Result<(), UsernameError> {
        Self::check_format(username)?;
        match self.availability(username) {
            Availability::Available => Ok(()),
            Availability::Taken => Err(UsernameError::Taken),
        }
    }

    /// Whether a live availability lookup is worth scheduling for this input.
    pub fn should_check_live(username: &str) -> bool {
        username.chars().count() >= USERNAME_MIN
    }
}
