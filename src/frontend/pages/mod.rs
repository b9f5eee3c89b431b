//! Routed views of the dashboard.

mod not_found;
mod page_builder;
mod pages;
mod profile;
mod signin;
mod signup;
mod subscription;
mod users;

pub use not_found::NotFound;
pub use page_builder::PageBuilderPage;
pub use pages::PagesPage;
pub use profile::ProfilePage;
pub use signin::SignInPage;
pub use signup::SignUpPage;
pub use subscription::SubscriptionPage;
pub use users::UsersPage;
