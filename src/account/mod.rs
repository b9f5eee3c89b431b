//! Account screens that are not the page builder: sign-in and sign-up,
//! subscription plans, the admin user directory and the profile card.

pub use auth::*;
pub use forms::*;
pub use profile::*;
pub use subscription::*;
pub use users::*;

mod auth;
mod forms;
mod profile;
mod subscription;
mod users;
