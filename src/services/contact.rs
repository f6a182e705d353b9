//! Classifies a free-text identifier as a phone number or an email address.

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

static PHONE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{10}$").unwrap());
static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").unwrap());

/// Country prefix added to phone numbers when they are used as an OTP destination.
pub const PHONE_PREFIX: &str = "+91";
/// Mailbox domain given to accounts created from a phone number.
pub const PHONE_ACCOUNT_DOMAIN: &str = "olxuser.in";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmailPolicy {
    Any,
    /// Only addresses at exactly this domain.
    Domain(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactKind {
    Phone,
    Email,
    Invalid,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Contact {
    Phone(String),
    Email(String),
}

impl Contact {
    pub fn kind(&self) -> ContactKind {
        match self {
            Contact::Phone(_) => ContactKind::Phone,
            Contact::Email(_) => ContactKind::Email,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Contact::Phone(digits) => digits,
            Contact::Email(addr) => addr,
        }
    }

    /// Where an OTP or reset notice is sent.
    pub fn destination(&self) -> String {
        match self {
            Contact::Phone(digits) => format!("{}{}", PHONE_PREFIX, digits),
            Contact::Email(addr) => addr.clone(),
        }
    }

    pub fn display_name(&self) -> String {
        match self {
            Contact::Phone(digits) => digits.clone(),
            Contact::Email(addr) => addr.split('@').next().unwrap_or(addr).to_string(),
        }
    }

    pub fn account_email(&self) -> String {
        match self {
            Contact::Phone(digits) => format!("{}@{}", digits, PHONE_ACCOUNT_DOMAIN),
            Contact::Email(addr) => addr.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContactError {
    #[error("Email or contact number is required")]
    Empty,
    #[error("Contact number must be exactly 10 digits")]
    PhoneLength,
    #[error("Enter a valid email address")]
    MalformedEmail,
    #[error("Only @{domain} email addresses are accepted")]
    DomainNotAccepted { domain: String },
}

#[derive(Debug, Clone)]
pub struct ContactValidator {
    policy: EmailPolicy,
}

impl ContactValidator {
    pub fn new(policy: EmailPolicy) -> Self {
        Self { policy }
    }

    pub fn any_email() -> Self {
        Self::new(EmailPolicy::Any)
    }

    pub fn classify(&self, raw: &str) -> ContactKind {
        self.parse(raw).map_or(ContactKind::Invalid, |c| c.kind())
    }

    /// Digit-leading input must be a full 10-digit number; anything else
    /// has to be an email the policy accepts.
    pub fn parse(&self, raw: &str) -> Result<Contact, ContactError> {
        let value = raw.trim();
        if value.is_empty() {
            return Err(ContactError::Empty);
        }
        if value.starts_with(|c: char| c.is_ascii_digit()) {
            return if PHONE_RE.is_match(value) {
                Ok(Contact::Phone(value.to_string()))
            } else {
                Err(ContactError::PhoneLength)
            };
        }
        if !EMAIL_RE.is_match(value) {
            return Err(ContactError::MalformedEmail);
        }
        if let EmailPolicy::Domain(domain) = &self.policy {
            let accepted = value
                .rsplit_once('@')
                .is_some_and(|(_, host)| host == domain.as_str());
            if !accepted {
                return Err(ContactError::DomainNotAccepted { domain: domain.clone() });
            }
        }
        Ok(Contact::Email(value.to_string()))
    }

    /// The single message the login and reset screens show for any bad contact.
    pub fn summary_message(&self) -> String {
        match &self.policy {
            EmailPolicy::Domain(domain) => {
                format!("Enter a valid 10-digit phone number or @{} email address", domain)
            }
            EmailPolicy::Any => "Enter a valid 10-digit phone number or email address".to_string(),
        }
    }

    /// Placeholder text for the contact input.
    pub fn hint(&self) -> String {
        match &self.policy {
            EmailPolicy::Domain(domain) => format!("@{} email or 10-digit phone number", domain),
            EmailPolicy::Any => "Email or 10-digit phone number".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;
    use rstest::rstest;

    fn gmail_only() -> ContactValidator {
        ContactValidator::new(EmailPolicy::Domain("gmail.com".to_string()))
    }

    #[test]
    fn every_ten_digit_string_is_a_phone() {
        let validator = ContactValidator::any_email();
        let mut rng = rand::thread_rng();
        for _ in 0..200 {
            let digits: String = (0..10).map(|_| char::from(b'0' + rng.gen_range(0..10u8))).collect();
            assert_eq!(validator.classify(&digits), ContactKind::Phone, "{}", digits);
        }
    }

    #[rstest]
    #[case("user@gmail.com")]
    #[case("first.last+tag@mail.example.co")]
    #[case("a_b%c@sub-domain.org")]
    #[case("  padded@example.in  ")]
    fn well_formed_addresses_are_emails(#[case] input: &str) {
        assert_eq!(ContactValidator::any_email().classify(input), ContactKind::Email);
    }

    #[rstest]
    #[case("", ContactError::Empty)]
    #[case("   ", ContactError::Empty)]
    #[case("987654321", ContactError::PhoneLength)]
    #[case("98765432101", ContactError::PhoneLength)]
    #[case("98765abc10", ContactError::PhoneLength)]
    #[case("9८७६५४३२१०", ContactError::PhoneLength)]
    #[case("1user@gmail.com", ContactError::PhoneLength)]
    #[case("user@", ContactError::MalformedEmail)]
    #[case("user@gmail", ContactError::MalformedEmail)]
    #[case("no spaces@x.com", ContactError::MalformedEmail)]
    #[case("+919876543210", ContactError::MalformedEmail)]
    fn everything_else_is_invalid(#[case] input: &str, #[case] expected: ContactError) {
        let validator = ContactValidator::any_email();
        assert_eq!(validator.classify(input), ContactKind::Invalid);
        assert_eq!(validator.parse(input), Err(expected));
    }

    #[test]
    fn domain_policy_rejects_other_domains() {
        let validator = gmail_only();
        assert_eq!(validator.classify("user@gmail.com"), ContactKind::Email);
        assert_eq!(
            validator.parse("user@yahoo.com"),
            Err(ContactError::DomainNotAccepted { domain: "gmail.com".to_string() })
        );
        assert_eq!(validator.classify("user@notgmail.com"), ContactKind::Invalid);
        assert_eq!(
            validator.parse("user@GMAIL.COM"),
            Err(ContactError::DomainNotAccepted { domain: "gmail.com".to_string() })
        );
        assert_eq!(validator.classify("9876543210"), ContactKind::Phone);
    }

    #[test]
    fn phone_contact_derives_destination_and_account_email() {
        let contact = gmail_only().parse("9876543210").unwrap();
        assert_eq!(contact.destination(), "+919876543210");
        assert_eq!(contact.account_email(), "9876543210@olxuser.in");
        assert_eq!(contact.display_name(), "9876543210");
    }

    #[test]
    fn email_contact_uses_local_part_as_name() {
        let contact = gmail_only().parse(" ravi.k@gmail.com ").unwrap();
        assert_eq!(contact.destination(), "ravi.k@gmail.com");
        assert_eq!(contact.account_email(), "ravi.k@gmail.com");
        assert_eq!(contact.display_name(), "ravi.k");
    }

    #[test]
    fn classification_is_idempotent() {
        let validator = gmail_only();
        for input in ["9876543210", "user@gmail.com", "nope"] {
            assert_eq!(validator.classify(input), validator.classify(input));
        }
    }
}
