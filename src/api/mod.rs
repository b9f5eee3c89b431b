//! Remote API collaborators: one trait per concern plus its HTTP
//! implementation over [`ApiClient`].

pub use auth::*;
pub use client::*;
pub use pages::*;
pub use subscription::*;
pub use users::*;

mod auth;
mod client;
mod pages;
mod subscription;
mod users;
