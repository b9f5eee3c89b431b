//! Reusable UI components

mod alert;
mod button;
mod header;
mod input;

pub use alert::{Alert, AlertVariant, ErrorAlert, Spinner};
pub use button::{Button, ButtonVariant};
pub use header::Header;
pub use input::{EmailInput, PasswordInput, TextInput};
