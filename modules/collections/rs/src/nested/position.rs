use derive_more::{Constructor, Display, From, Into};

/// Ordinal address of an element inside a nested collection: the index of the inner collection
/// in the outer one and the index of the element inside that inner collection.
///
/// The end position is `(outer.len(), 0)`.
#[derive(
    Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default, Display, From, Into, Constructor,
)]
#[display("({outer}, {inner})")]
pub struct Position {
    pub outer: usize,
    pub inner: usize,
}

impl Position {
    pub(crate) fn end(outer_len: usize) -> Self {
        Self::new(outer_len, 0)
    }
}
