use thiserror::Error;

use super::forms::{FieldErrors, SignInForm, SignUpForm};
use crate::api::AuthService;
use crate::builder::pages_path;
use crate::log_err;
use crate::services::SessionService;

pub const LOGIN_FAILED_MESSAGE: &str = "Login failed. Please try again.";
pub const SIGNUP_FAILED_MESSAGE: &str = "Signup failed. Please try again.";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("invalid form input")]
    Invalid(FieldErrors),

    #[error("{0}")]
    Rejected(String),
}

impl AuthError {
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            Self::Invalid(errors) => Some(errors),
            Self::Rejected(_) => None,
        }
    }

    pub fn banner(&self) -> Option<&str> {
        match self {
            Self::Rejected(message) => Some(message),
            Self::Invalid(_) => None,
        }
    }
}

/// Signs in and stores the session. Returns where to go next.
pub async fn sign_in(
    auth: &dyn AuthService,
    session: &SessionService,
    form: &SignInForm,
) -> Result<String, AuthError> {
    let request = form.validate().map_err(AuthError::Invalid)?;

    let response = auth.login(&request).await.map_err(|e| {
        log_err!(e, "login rejected");
        AuthError::Rejected(
            e.server_message()
                .unwrap_or(LOGIN_FAILED_MESSAGE)
                .to_string(),
        )
    })?;

    let target = pages_path(&response.user.id);
    if let Err(e) = session.login(response) {
        log_err!(e, "session kept in memory only");
    }
    Ok(target)
}

/// Registers an account without signing in. Returns where to go next.
pub async fn sign_up(auth: &dyn AuthService, form: &SignUpForm) -> Result<String, AuthError> {
    let request = form.validate().map_err(AuthError::Invalid)?;

    auth.register(&request).await.map_err(|e| {
        log_err!(e, "registration rejected");
        AuthError::Rejected(
            e.server_message()
                .unwrap_or(SIGNUP_FAILED_MESSAGE)
                .to_string(),
        )
    })?;

    tracing::info!(username = %request.username, "account registered");
    Ok("/signin".to_string())
}
