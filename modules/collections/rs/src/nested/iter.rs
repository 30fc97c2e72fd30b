use std::iter::FusedIterator;

use nestkit_core_rs::{Container, KeyOf, Shape, ValueOf};

use super::cursor::{Cursor, InnerElementOf, InnerOf};

/// Iterator over the flattened elements of a [`NestedView`](super::NestedView).
///
/// Created by [`NestedView::iter`](super::NestedView::iter) and by iterating over
/// `&NestedView`. The length is fixed when the iterator is created.
pub struct Iter<'a, C>
where
    C: Container<Shape: Shape<Value: Container>> + 'a,
{
    cursor: Cursor<'a, C>,
    remaining: usize,
}

impl<'a, C> Iter<'a, C>
where
    C: Container<Shape: Shape<Value: Container>> + 'a,
{
    pub(crate) fn new(cursor: Cursor<'a, C>, remaining: usize) -> Self {
        Self { cursor, remaining }
    }

    /// Cursor at the element that will be returned next.
    pub fn cursor(&self) -> &Cursor<'a, C> {
        &self.cursor
    }
}

impl<'a, C> Clone for Iter<'a, C>
where
    C: Container<Shape: Shape<Value: Container>> + 'a,
{
    fn clone(&self) -> Self {
        Self {
            cursor: self.cursor.clone(),
            remaining: self.remaining,
        }
    }
}

impl<'a, C> Iterator for Iter<'a, C>
where
    C: Container<Shape: Shape<Value: Container>> + 'a,
{
    type Item = InnerElementOf<'a, C>;

    fn next(&mut self) -> Option<Self::Item> {
        let element = self.cursor.current()?;
        self.cursor.advance();
        self.remaining -= 1;
        Some(element)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, C> ExactSizeIterator for Iter<'a, C> where
    C: Container<Shape: Shape<Value: Container>> + 'a
{
}

impl<'a, C> FusedIterator for Iter<'a, C> where C: Container<Shape: Shape<Value: Container>> + 'a {}

/// Iterator over `(outer key, inner key, value)` triples of a
/// [`NestedView`](super::NestedView).
///
/// For sequence-shaped collections the key is the element itself, e.g. a `BTreeMap<K, Vec<T>>`
/// yields `(&K, &T, &T)`.
pub struct Keyed<'a, C>
where
    C: Container<Shape: Shape<Value: Container>> + 'a,
{
    iter: Iter<'a, C>,
}

impl<'a, C> Keyed<'a, C>
where
    C: Container<Shape: Shape<Value: Container>> + 'a,
{
    pub(crate) fn new(iter: Iter<'a, C>) -> Self {
        Self { iter }
    }
}

impl<'a, C> Iterator for Keyed<'a, C>
where
    C: Container<Shape: Shape<Value: Container>> + 'a,
{
    type Item = (&'a KeyOf<C>, &'a KeyOf<InnerOf<C>>, &'a ValueOf<InnerOf<C>>);

    fn next(&mut self) -> Option<Self::Item> {
        let cursor = self.iter.cursor();
        if cursor.is_end() {
            return None;
        }
        let item = (cursor.key1(), cursor.key2(), cursor.value());
        self.iter.next();
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl<'a, C> ExactSizeIterator for Keyed<'a, C> where
    C: Container<Shape: Shape<Value: Container>> + 'a
{
}

impl<'a, C> FusedIterator for Keyed<'a, C> where C: Container<Shape: Shape<Value: Container>> + 'a {}
