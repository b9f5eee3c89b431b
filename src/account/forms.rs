use std::sync::OnceLock;

use regex::Regex;

use crate::common::ValidationError;
use crate::types::{LoginRequest, RegisterRequest};

pub const MIN_PASSWORD_LENGTH: usize = 6;
pub const MIN_USERNAME_LENGTH: usize = 2;

/// Email validation
pub fn validate_email(email: &str) -> bool {
    static EMAIL: OnceLock<Option<Regex>> = OnceLock::new();

    let email = email.trim();
    if email.is_empty() || email.len() > 254 {
        return false;
    }

    match EMAIL.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").ok()) {
        Some(pattern) => pattern.is_match(email),
        None => email.contains('@'),
    }
}

/// Collected field errors of one submit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(Vec<ValidationError>);

impl FieldErrors {
    fn add(&mut self, field: &'static str, message: &'static str) {
        self.0.push(ValidationError::new(field, message));
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&'static str> {
        self.0.iter().find(|e| e.field == field).map(|e| e.message)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        self.0.iter()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignInForm {
    pub email: String,
    pub password: String,
}

impl SignInForm {
    pub fn validate(&self) -> Result<LoginRequest, FieldErrors> {
        let mut errors = FieldErrors::default();

        if self.email.is_empty() {
            errors.add("email", "Email is required");
        } else if !validate_email(&self.email) {
            errors.add("email", "Please enter a valid email address");
        }

        if self.password.is_empty() {
            errors.add("password", "Password is required");
        } else if self.password.chars().count() < MIN_PASSWORD_LENGTH {
            errors.add("password", "Password must be at least 6 characters long");
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(LoginRequest {
            email: self.email.trim().to_string(),
            password: self.password.clone(),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignUpForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl SignUpForm {
    /// The confirmation is checked here and never sent.
    pub fn validate(&self) -> Result<RegisterRequest, FieldErrors> {
        let mut errors = FieldErrors::default();

        let username = self.username.trim();
        if username.is_empty() {
            errors.add("username", "Name is required");
        } else if username.chars().count() < MIN_USERNAME_LENGTH {
            errors.add("username", "Name must be at least 2 characters long");
        }

        if self.email.trim().is_empty() {
            errors.add("email", "Email is required");
        } else if !validate_email(&self.email) {
            errors.add("email", "Invalid email format");
        }

        if self.password.is_empty() {
            errors.add("password", "Password is required");
        } else if self.password.chars().count() < MIN_PASSWORD_LENGTH {
            errors.add("password", "Password must be at least 6 characters");
        }

        if self.confirm_password.is_empty() {
            errors.add("confirmPassword", "Please confirm your password");
        } else if self.password != self.confirm_password {
            errors.add("confirmPassword", "Passwords do not match");
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(RegisterRequest {
            username: username.to_string(),
            email: self.email.trim().to_string(),
            password: self.password.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_validation() {
        assert!(validate_email("ada@example.com"));
        assert!(validate_email("  ada@example.co.uk "));
        assert!(!validate_email("ada@example"));
        assert!(!validate_email("ada example@x.io"));
        assert!(!validate_email("@example.com"));
        assert!(!validate_email(""));
    }

    #[test]
    fn sign_in_reports_each_field() {
        let errors = SignInForm::default().validate().unwrap_err();
        assert_eq!(errors.get("email"), Some("Email is required"));
        assert_eq!(errors.get("password"), Some("Password is required"));

        let errors = SignInForm {
            email: "nope".into(),
            password: "12345".into(),
        }
        .validate()
        .unwrap_err();
        assert_eq!(errors.get("email"), Some("Please enter a valid email address"));
        assert_eq!(
            errors.get("password"),
            Some("Password must be at least 6 characters long")
        );
    }

    #[test]
    fn sign_up_checks_confirmation() {
        let form = SignUpForm {
            username: "ada".into(),
            email: "ada@example.com".into(),
            password: "secret1".into(),
            confirm_password: "secret2".into(),
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.get("confirmPassword"), Some("Passwords do not match"));
        assert_eq!(errors.iter().count(), 1);

        let request = SignUpForm {
            confirm_password: "secret1".into(),
            ..form
        }
        .validate()
        .unwrap();
        assert_eq!(request.username, "ada");
    }

    #[test]
    fn sign_up_requires_name() {
        let errors = SignUpForm {
            username: " a ".into(),
            ..Default::default()
        }
        .validate()
        .unwrap_err();
        assert_eq!(
            errors.get("username"),
            Some("Name must be at least 2 characters long")
        );
    }
}
