pub use nested::{Cursor, Iter, Keyed, NestedView, Position};

pub mod nested;
