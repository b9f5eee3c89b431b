use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure talking to the remote API.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Request failed with status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Invalid response body: {0}")]
    Decode(String),

    #[error("Invalid API URL: {0}")]
    InvalidUrl(String),
}

impl ApiError {
    /// Message sent by the server, if the failure carried one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Status { message, .. } if !message.is_empty() => Some(message),
            _ => None,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Corrupt session data: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("Session storage unavailable: {0}")]
    Unavailable(String),
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value {value:?} for {key}")]
    Invalid { key: &'static str, value: String },
}

/// A form field that failed validation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: &'static str,
}

impl ValidationError {
    pub fn new(field: &'static str, message: &'static str) -> Self {
        Self { field, message }
    }
}

/// Why an image was refused before upload.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadRejection {
    #[error("Please select an image file")]
    NotAnImage,

    #[error("Image size should be less than 5MB")]
    TooLarge { size: usize },
}

/// Classification tag shown to the presentation layer.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ErrorKind {
    PageLimit,
    PageNotFound,
    FetchError,
    SaveError,
    UploadError,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PageLimit => "page-limit",
            Self::PageNotFound => "page-not-found",
            Self::FetchError => "fetch-error",
            Self::SaveError => "save-error",
            Self::UploadError => "upload-error",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl PartialEq<&str> for ErrorKind {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

/// Tagged, user-facing error of the page builder.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct BuilderError {
    pub kind: ErrorKind,
    pub message: String,
}

impl BuilderError {
    pub const PAGE_LIMIT_MESSAGE: &'static str = "Oops! You've reached your page creation limit. Upgrade your plan to unlock unlimited page creation!";
    pub const PAGE_NOT_FOUND_MESSAGE: &'static str = "Page not found";
    pub const FETCH_MESSAGE: &'static str = "Failed to load page";
    pub const SAVE_MESSAGE: &'static str = "Failed to save page";
    pub const UPLOAD_MESSAGE: &'static str = "Failed to upload image. Please try again.";

    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn page_limit(message: Option<String>) -> Self {
        Self::new(
            ErrorKind::PageLimit,
            message.unwrap_or_else(|| Self::PAGE_LIMIT_MESSAGE.to_string()),
        )
    }

    pub fn page_not_found() -> Self {
        Self::new(ErrorKind::PageNotFound, Self::PAGE_NOT_FOUND_MESSAGE)
    }

    pub fn fetch() -> Self {
        Self::new(ErrorKind::FetchError, Self::FETCH_MESSAGE)
    }

    pub fn save() -> Self {
        Self::new(ErrorKind::SaveError, Self::SAVE_MESSAGE)
    }

    pub fn upload(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::UploadError, message)
    }

    /// Whether the presentation layer should offer an upgrade action.
    pub fn offers_upgrade(&self) -> bool {
        self.kind == ErrorKind::PageLimit
    }
}

impl From<UploadRejection> for BuilderError {
    fn from(rejection: UploadRejection) -> Self {
        Self::upload(rejection.to_string())
    }
}
