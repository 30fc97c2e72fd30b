pub use cursor::{Cursor, InnerElementOf, InnerOf};
pub use iter::{Iter, Keyed};
pub use position::Position;
pub use view::NestedView;

mod cursor;
mod iter;
mod position;
mod view;
