pub use block::*;
pub use block_kind::*;
pub use page::*;
pub use subscription::*;
pub use user::*;

mod block;
mod block_kind;
mod page;
mod subscription;
mod user;
