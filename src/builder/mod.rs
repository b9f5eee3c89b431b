//! Page builder core: the page controller, block editors, reordering and
//! the page list. Nothing here touches the DOM.

pub use blocks::*;
pub use controller::*;
pub use page_list::*;
pub use reorder::*;

mod blocks;
mod controller;
mod page_list;
mod reorder;
