//! Whole-form validation for account creation. Every failing field is
//! reported at once so the user sees all problems in one pass.

use crate::model::{ProfileImage, SignupForm};
use crate::services::contact::{Contact, ContactValidator};
use crate::services::image::ImageError;
use crate::services::password;
use crate::services::username::UsernameRegistry;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SignupField {
    Contact,
    Username,
    ProfileImage,
    Password,
    ConfirmPassword,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignupErrors {
    fields: BTreeMap<SignupField, String>,
}

impl SignupErrors {
    pub fn set(&mut self, field: SignupField, message: impl Into<String>) {
        self.fields.insert(field, message.into());
    }

    pub fn clear(&mut self, field: SignupField) {
        self.fields.remove(&field);
    }

    pub fn get(&self, field: SignupField) -> Option<&str> {
        self.fields.get(&field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }
}

/// A form that passed every check, with the contact already classified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub contact: Contact,
    pub username: String,
    pub profile_image: ProfileImage,
}

pub fn validate(
    form: &SignupForm,
    contacts: &ContactValidator,
    usernames: &UsernameRegistry,
) -> Result<Registration, SignupErrors> {
    let mut errors = SignupErrors::default();

    let contact = match contacts.parse(&form.contact) {
        Ok(contact) => Some(contact),
        Err(e) => {
            errors.set(SignupField::Contact, e.to_string());
            None
        }
    };

    if let Err(e) = usernames.check(&form.username) {
        errors.set(SignupField::Username, e.to_string());
    }

    if form.profile_image.is_none() {
        errors.set(SignupField::ProfileImage, ImageError::Missing.to_string());
    }

    if let Err(e) = password::check(&form.password) {
        errors.set(SignupField::Password, e.to_string());
    }

    if form.password != form.confirm_password {
        errors.set(SignupField::ConfirmPassword, "Passwords do not match");
    }

    match (contact, &form.profile_image) {
        (Some(contact), Some(image)) if errors.is_empty() => Ok(Registration {
            contact,
            username: form.username.clone(),
            profile_image: image.clone(),
        }),
        _ => Err(errors),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image() -> ProfileImage {
        ProfileImage {
            file_name: "me.png".to_string(),
            mime_type: "image/png".to_string(),
            size_bytes: 64,
            dimensions: Some((8, 8)),
            preview: "data:image/png;base64,AAAA".to_string(),
        }
    }

    fn valid_form() -> SignupForm {
        SignupForm {
            contact: "9876543210".to_string(),
            username: "ravi_k".to_string(),
            profile_image: Some(image()),
            password: "Abc123!@".to_string(),
            confirm_password: "Abc123!@".to_string(),
        }
    }

    fn run(form: &SignupForm) -> Result<Registration, SignupErrors> {
        validate(form, &ContactValidator::any_email(), &UsernameRegistry::default())
    }

    #[test]
    fn valid_form_produces_registration() {
        let registration = run(&valid_form()).unwrap();
        assert_eq!(registration.contact, Contact::Phone("9876543210".to_string()));
        assert_eq!(registration.username, "ravi_k");
    }

    #[test]
    fn mismatched_confirmation_is_reported() {
        let form = SignupForm {
            confirm_password: "Abc123!X".to_string(),
            ..valid_form()
        };
        let errors = run(&form).unwrap_err();
        assert_eq!(errors.get(SignupField::ConfirmPassword), Some("Passwords do not match"));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn every_failing_field_is_reported_together() {
        let errors = run(&SignupForm::default()).unwrap_err();
        assert_eq!(errors.get(SignupField::Contact), Some("Email or contact number is required"));
        assert_eq!(errors.get(SignupField::Username), Some("Username is required"));
        assert_eq!(errors.get(SignupField::ProfileImage), Some("Profile image is required"));
        assert_eq!(errors.get(SignupField::Password), Some("Password is required"));
        assert_eq!(errors.get(SignupField::ConfirmPassword), None);
    }

    #[test]
    fn signup_accepts_any_email_domain() {
        let form = SignupForm {
            contact: "someone@example.org".to_string(),
            ..valid_form()
        };
        assert!(run(&form).is_ok());
    }

    #[test]
    fn taken_username_fails_submit() {
        let form = SignupForm {
            username: "Admin".to_string(),
            ..valid_form()
        };
        let errors = run(&form).unwrap_err();
        assert_eq!(errors.get(SignupField::Username), Some("Username is already taken"));
    }

    #[test]
    fn short_phone_has_specific_message() {
        let form = SignupForm {
            contact: "98765".to_string(),
            ..valid_form()
        };
        let errors = run(&form).unwrap_err();
        assert_eq!(errors.get(SignupField::Contact), Some("Contact number must be exactly 10 digits"));
    }
}
