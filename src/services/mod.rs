pub use session::*;

mod session;
