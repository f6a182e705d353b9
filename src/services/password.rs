use thiserror::Error;

pub const PASSWORD_LENGTH: usize = 8;
pub const PASSWORD_SYMBOLS: &str = "@$!%*?&";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PasswordError {
    #[error("Password is required")]
    Empty,
    #[error("Password must be exactly 8 characters with 1 uppercase, 1 lowercase, 1 digit, and 1 special character")]
    Weak,
}

fn is_symbol(c: char) -> bool {
    PASSWORD_SYMBOLS.contains(c)
}

/// Exactly 8 characters from `[A-Za-z0-9@$!%*?&]`, with at least one of each class.
pub fn check(password: &str) -> Result<(), PasswordError> {
    if password.is_empty() {
        return Err(PasswordError::Empty);
    }
    if password.chars().count() != PASSWORD_LENGTH {
        return Err(PasswordError::Weak);
    }
    if !password.chars().all(|c| c.is_ascii_alphanumeric() || is_symbol(c)) {
        return Err(PasswordError::Weak);
    }
    let has_lower = password.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = password.chars().any(|c| c.is_ascii_uppercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    let has_symbol = password.chars().any(is_symbol);
    if has_lower && has_upper && has_digit && has_symbol {
        Ok(())
    } else {
        Err(PasswordError::Weak)
    }
}

pub fn is_valid(password: &str) -> bool {
    check(password).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Abc123!@")]
    #[case("zZ9&aaaa")]
    #[case("?1aA?1aA")]
    fn accepts_complete_eight_char_passwords(#[case] password: &str) {
        assert!(is_valid(password));
    }

    #[rstest]
    #[case("abc")]
    #[case("Abc12!@")]
    #[case("Abc123!@x")]
    #[case("Abc123!@Abc123!@")]
    fn rejects_wrong_lengths(#[case] password: &str) {
        assert_eq!(check(password), Err(PasswordError::Weak));
    }

    #[rstest]
    #[case::no_lower("ABC123!@")]
    #[case::no_upper("abc123!@")]
    #[case::no_digit("Abcdef!@")]
    #[case::no_symbol("Abc12345")]
    fn rejects_missing_character_classes(#[case] password: &str) {
        assert!(!is_valid(password));
    }

    #[rstest]
    #[case("Abc123#@")]
    #[case("Abc 123!")]
    #[case("Äbc123!@")]
    fn rejects_characters_outside_the_allowed_set(#[case] password: &str) {
        assert!(!is_valid(password));
    }

    #[test]
    fn empty_password_has_its_own_error() {
        assert_eq!(check(""), Err(PasswordError::Empty));
    }

    #[test]
    fn any_string_of_other_length_is_rejected() {
        let base = "Abc123!@";
        for len in 0..24 {
            if len == PASSWORD_LENGTH {
                continue;
            }
            let candidate: String = base.chars().cycle().take(len).collect();
            assert!(!is_valid(&candidate), "{:?}", candidate);
        }
    }
}
