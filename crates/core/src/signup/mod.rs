//! Sign-up form rules and derived form state.
//!
//! The field rules are shared by the client-side form model and by the
//! server's registration endpoint, so both reject the same input with the
//! same messages.

use once_cell::sync::Lazy;
use regex_lite::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9-]+(?:\.[a-zA-Z0-9-]+)*$")
        .expect("email pattern is valid")
});

const MIN_PASSWORD_CHARS: usize = 6;
const MIN_REPEAT_CHARS: usize = 3;

/// Why a field value was rejected. The display text is the user-facing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("Can't be empty")]
    Empty,

    #[error("Invalid email format")]
    InvalidEmail,

    #[error("Must be at least 6 characters, with at least one number and one letter")]
    WeakPassword,

    #[error("Must be at least 3 characters")]
    RepeatTooShort,

    #[error("Passwords do not match")]
    PasswordMismatch,
}

/// Form fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    Email,
    Password,
    RePassword,
}

impl Field {
    pub fn name(&self) -> &'static str {
        match self {
            Field::Email => "email",
            Field::Password => "password",
            Field::RePassword => "rePassword",
        }
    }
}

pub fn validate_email(email: &str) -> Result<(), FieldError> {
    if email.is_empty() {
        return Err(FieldError::Empty);
    }
    if !EMAIL_PATTERN.is_match(email) {
        return Err(FieldError::InvalidEmail);
    }
    Ok(())
}

pub fn validate_password(password: &str) -> Result<(), FieldError> {
    if password.is_empty() {
        return Err(FieldError::Empty);
    }
    let long_enough = password.chars().count() >= MIN_PASSWORD_CHARS;
    let has_letter = password.chars().any(|c| c.is_ascii_alphabetic());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    if !(long_enough && has_letter && has_digit) {
        return Err(FieldError::WeakPassword);
    }
    Ok(())
}

pub fn validate_repeat_password(repeat: &str, password: &str) -> Result<(), FieldError> {
    if repeat.is_empty() {
        return Err(FieldError::Empty);
    }
    if repeat.chars().count() < MIN_REPEAT_CHARS {
        return Err(FieldError::RepeatTooShort);
    }
    if repeat != password {
        return Err(FieldError::PasswordMismatch);
    }
    Ok(())
}

/// Registration payload sent to `POST /users`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignUpRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldState {
    pub value: String,
    /// The field lost focus at least once.
    pub touched: bool,
    /// The value differs from the (empty) default.
    pub dirty: bool,
}

/// Sign-up form model with the derived UI state the page renders from.
///
/// Errors appear only once a field has been touched; a field that was
/// touched but never filled shows "Can't be empty".
#[derive(Debug, Clone, Default)]
pub struct SignUpForm {
    email: FieldState,
    password: FieldState,
    re_password: FieldState,
    submitting: bool,
}

impl SignUpForm {
    pub fn new() -> Self {
        Self::default()
    }

    fn field(&self, field: Field) -> &FieldState {
        match field {
            Field::Email => &self.email,
            Field::Password => &self.password,
            Field::RePassword => &self.re_password,
        }
    }

    fn field_mut(&mut self, field: Field) -> &mut FieldState {
        match field {
            Field::Email => &mut self.email,
            Field::Password => &mut self.password,
            Field::RePassword => &mut self.re_password,
        }
    }

    pub fn state(&self, field: Field) -> &FieldState {
        self.field(field)
    }

    /// Record a value change.
    pub fn input(&mut self, field: Field, value: impl Into<String>) {
        let state = self.field_mut(field);
        state.value = value.into();
        state.dirty = !state.value.is_empty();
    }

    /// Record the field losing focus.
    pub fn blur(&mut self, field: Field) {
        self.field_mut(field).touched = true;
    }

    /// Validation result for a field, independent of touch state.
    pub fn error(&self, field: Field) -> Option<FieldError> {
        let result = match field {
            Field::Email => validate_email(&self.email.value),
            Field::Password => validate_password(&self.password.value),
            Field::RePassword => {
                validate_repeat_password(&self.re_password.value, &self.password.value)
            }
        };
        result.err()
    }

    /// Message shown under a field, if any.
    pub fn visible_error(&self, field: Field) -> Option<FieldError> {
        let state = self.field(field);
        if !state.touched {
            return None;
        }
        if !state.dirty {
            return Some(FieldError::Empty);
        }
        self.error(field)
    }

    /// Whether the field renders with the error styling.
    pub fn is_highlighted(&self, field: Field) -> bool {
        self.visible_error(field).is_some()
    }

    pub fn is_dirty(&self) -> bool {
        self.email.dirty || self.password.dirty || self.re_password.dirty
    }

    pub fn is_valid(&self) -> bool {
        [Field::Email, Field::Password, Field::RePassword]
            .into_iter()
            .all(|f| self.error(f).is_none())
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn can_submit(&self) -> bool {
        self.is_dirty() && self.is_valid() && !self.submitting
    }

    pub fn submit_label(&self) -> &'static str {
        if self.submitting {
            "Submitting..."
        } else {
            "Create an account"
        }
    }

    /// Start submitting. Returns the payload, or None when the form can't be submitted.
    pub fn begin_submit(&mut self) -> Option<SignUpRequest> {
        if !self.can_submit() {
            return None;
        }
        self.submitting = true;
        Some(SignUpRequest {
            email: self.email.value.clone(),
            password: self.password.value.clone(),
        })
    }

    pub fn finish_submit(&mut self) {
        self.submitting = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_form() -> SignUpForm {
        let mut form = SignUpForm::new();
        form.input(Field::Email, "viewer@example.com");
        form.input(Field::Password, "abc123");
        form.input(Field::RePassword, "abc123");
        form
    }

    #[test]
    fn test_email_rules() {
        assert_eq!(validate_email(""), Err(FieldError::Empty));
        assert_eq!(validate_email("no-at-sign"), Err(FieldError::InvalidEmail));
        assert_eq!(validate_email("a@b..c"), Err(FieldError::InvalidEmail));
        assert_eq!(validate_email("a b@c.d"), Err(FieldError::InvalidEmail));
        assert!(validate_email("user.name+tag@example.co.uk").is_ok());
        assert!(validate_email("user@localhost").is_ok());
    }

    #[test]
    fn test_password_rules() {
        assert_eq!(validate_password(""), Err(FieldError::Empty));
        assert_eq!(validate_password("ab12"), Err(FieldError::WeakPassword));
        assert_eq!(validate_password("abcdefg"), Err(FieldError::WeakPassword));
        assert_eq!(validate_password("1234567"), Err(FieldError::WeakPassword));
        assert!(validate_password("abc123").is_ok());
    }

    #[test]
    fn test_repeat_password_rules() {
        assert_eq!(validate_repeat_password("", "abc123"), Err(FieldError::Empty));
        assert_eq!(
            validate_repeat_password("ab", "ab"),
            Err(FieldError::RepeatTooShort)
        );
        assert_eq!(
            validate_repeat_password("abc124", "abc123"),
            Err(FieldError::PasswordMismatch)
        );
        assert!(validate_repeat_password("abc123", "abc123").is_ok());
    }

    #[test]
    fn test_messages() {
        assert_eq!(FieldError::Empty.to_string(), "Can't be empty");
        assert_eq!(
            FieldError::PasswordMismatch.to_string(),
            "Passwords do not match"
        );
    }

    #[test]
    fn test_errors_hidden_until_touched() {
        let mut form = SignUpForm::new();
        form.input(Field::Email, "bad");
        assert_eq!(form.error(Field::Email), Some(FieldError::InvalidEmail));
        assert_eq!(form.visible_error(Field::Email), None);

        form.blur(Field::Email);
        assert_eq!(
            form.visible_error(Field::Email),
            Some(FieldError::InvalidEmail)
        );
        assert!(form.is_highlighted(Field::Email));
    }

    #[test]
    fn test_touched_but_untouched_value_shows_empty() {
        let mut form = SignUpForm::new();
        form.blur(Field::Password);
        assert_eq!(form.visible_error(Field::Password), Some(FieldError::Empty));

        form.input(Field::Password, "x");
        form.input(Field::Password, "");
        assert!(!form.state(Field::Password).dirty);
        assert_eq!(form.visible_error(Field::Password), Some(FieldError::Empty));
    }

    #[test]
    fn test_can_submit_requires_dirty_and_valid() {
        let form = SignUpForm::new();
        assert!(!form.can_submit());

        let mut form = filled_form();
        assert!(form.can_submit());

        form.input(Field::RePassword, "abc999");
        assert!(!form.is_valid());
        assert!(!form.can_submit());
    }

    #[test]
    fn test_submit_cycle() {
        let mut form = filled_form();
        assert_eq!(form.submit_label(), "Create an account");

        let request = form.begin_submit().unwrap();
        assert_eq!(request.email, "viewer@example.com");
        assert_eq!(request.password, "abc123");
        assert!(form.is_submitting());
        assert_eq!(form.submit_label(), "Submitting...");

        // A second submit while in flight is refused.
        assert!(form.begin_submit().is_none());

        form.finish_submit();
        assert!(form.can_submit());
    }

    #[test]
    fn test_changing_password_revalidates_repeat() {
        let mut form = filled_form();
        assert!(form.error(Field::RePassword).is_none());

        form.input(Field::Password, "xyz789");
        assert_eq!(
            form.error(Field::RePassword),
            Some(FieldError::PasswordMismatch)
        );
    }
}
