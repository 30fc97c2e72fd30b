use std::fmt::{self, Debug, Formatter};

use derive_getters::Getters;

use nestkit_core_rs::{Container, Shape, ValueOf};

use super::cursor::Cursor;
use super::iter::{Iter, Keyed};
use super::position::Position;

/// Read-only flattened view over a collection of collections.
///
/// `NestedView` owns an outer collection `C` whose values are inner collections and presents all
/// elements of all inner collections as a single forward sequence. The outer collection is
/// visited in its natural order and every inner collection in its own natural order, inner
/// collections without elements are skipped.
///
/// ```
/// use nestkit_collections_rs::NestedView;
///
/// let mut view = NestedView::<Vec<Vec<i32>>>::new();
/// view.container_mut().push(vec![1]);
/// view.container_mut().push(vec![]);
/// view.container_mut().push(vec![11, 12]);
///
/// assert_eq!(view.len(), 3);
/// assert_eq!(view.iter().copied().collect::<Vec<_>>(), [1, 11, 12]);
/// ```
///
/// Both sequence-shaped (`Vec<Vec<T>>`) and mapping-shaped (`BTreeMap<K, Vec<T>>`) outer
/// collections are supported, see [`Shape`](nestkit_core_rs::Shape).
#[derive(Getters)]
pub struct NestedView<C: Container> {
    /// The wrapped outer collection.
    container: C,
    // Never populated, provides the inner iterator of the end cursor
    #[getter(skip)]
    empty: ValueOf<C>,
}

// Manual implementations: derive would not bound the value type of the outer collection
impl<C> Clone for NestedView<C>
where
    C: Container + Clone,
    ValueOf<C>: Clone,
{
    fn clone(&self) -> Self {
        Self {
            container: self.container.clone(),
            empty: self.empty.clone(),
        }
    }
}

impl<C: Container + PartialEq> PartialEq for NestedView<C> {
    fn eq(&self, other: &Self) -> bool {
        self.container == other.container
    }
}

impl<C: Container + Eq> Eq for NestedView<C> {}

impl<C: Container + Debug> Debug for NestedView<C> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("NestedView")
            .field("container", &self.container)
            .finish()
    }
}

impl<C> Default for NestedView<C>
where
    C: Container + Default,
    ValueOf<C>: Default,
{
    fn default() -> Self {
        Self {
            container: C::default(),
            empty: ValueOf::<C>::default(),
        }
    }
}

impl<C> From<C> for NestedView<C>
where
    C: Container,
    ValueOf<C>: Default,
{
    fn from(container: C) -> Self {
        Self {
            container,
            empty: ValueOf::<C>::default(),
        }
    }
}

impl<C> NestedView<C>
where
    C: Container + Default,
    ValueOf<C>: Default,
{
    /// Creates a view over an empty outer collection. Alias for [`Default::default`].
    pub fn new() -> Self {
        Self::default()
    }
}

impl<C> NestedView<C>
where
    C: Container<Shape: Shape<Value: Container>>,
{
    /// Mutable access to the outer collection.
    ///
    /// Nothing is validated, inner collections may be empty. All cursors borrow the view, so
    /// the collection can't be modified while a traversal is in progress.
    pub fn container_mut(&mut self) -> &mut C {
        &mut self.container
    }

    /// Consumes the view and returns the outer collection.
    pub fn into_container(self) -> C {
        self.container
    }

    /// Total number of elements across all inner collections.
    ///
    /// The value is not cached and costs one pass over the outer collection.
    pub fn len(&self) -> usize {
        self.container
            .iter()
            .map(|element| <C::Shape as Shape>::value(element).len())
            .sum()
    }

    /// Returns `true` if no inner collection holds an element.
    pub fn is_empty(&self) -> bool {
        self.container
            .iter()
            .all(|element| <C::Shape as Shape>::value(element).is_empty())
    }

    /// Cursor at the first element of the first non-empty inner collection, or [`end`] if there
    /// is no such element.
    ///
    /// [`end`]: NestedView::end
    pub fn begin(&self) -> Cursor<'_, C> {
        Cursor::begin(self)
    }

    /// The canonical past-the-end cursor.
    pub fn end(&self) -> Cursor<'_, C> {
        Cursor::end(self)
    }

    /// Iterates over all elements in outer-then-inner order.
    pub fn iter(&self) -> Iter<'_, C> {
        Iter::new(self.begin(), self.len())
    }

    /// Iterates over `(outer key, inner key, value)` triples in outer-then-inner order.
    pub fn keyed(&self) -> Keyed<'_, C> {
        Keyed::new(self.iter())
    }

    pub(crate) fn empty(&self) -> &ValueOf<C> {
        &self.empty
    }

    pub(crate) fn end_position(&self) -> Position {
        Position::end(self.container.len())
    }
}

impl<'a, C> IntoIterator for &'a NestedView<C>
where
    C: Container<Shape: Shape<Value: Container>>,
{
    type Item = <Iter<'a, C> as Iterator>::Item;
    type IntoIter = Iter<'a, C>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<C, I> FromIterator<I> for NestedView<C>
where
    C: Container + FromIterator<I>,
    ValueOf<C>: Default,
{
    fn from_iter<T: IntoIterator<Item = I>>(iter: T) -> Self {
        Self::from(C::from_iter(iter))
    }
}

impl<C, I> Extend<I> for NestedView<C>
where
    C: Container + Extend<I>,
{
    fn extend<T: IntoIterator<Item = I>>(&mut self, iter: T) {
        self.container.extend(iter);
    }
}

#[cfg(test)]
mod tests {
    use std::collections::{BTreeMap, VecDeque};

    use itertools::Itertools;

    use super::*;

    type Nested = NestedView<Vec<Vec<i32>>>;

    fn scenario() -> Nested {
        let mut view = Nested::new();
        view.container_mut().push(vec![1]);
        view.container_mut().push(vec![11, 12]);
        view.container_mut().push(vec![21, 22, 23]);
        view
    }

    #[test]
    fn test_len_sums_inner_collections() {
        for (inner, expected) in [
            (vec![], 0),
            (vec![vec![]], 0),
            (vec![vec![], vec![]], 0),
            (vec![vec![1]], 1),
            (vec![vec![], vec![1], vec![1, 2], vec![1, 2, 3]], 6),
            (vec![vec![1, 2, 3], vec![], vec![], vec![4]], 4),
        ] {
            let view = Nested::from(inner);
            assert_eq!(view.len(), expected);
            assert_eq!(view.is_empty(), expected == 0);
        }
    }

    #[test]
    fn test_len_is_recomputed() {
        let mut view = Nested::new();
        assert_eq!(view.len(), 0);
        view.container_mut().push(vec![1]);
        assert_eq!(view.len(), 1);
        view.container_mut().push(vec![11, 12]);
        assert_eq!(view.len(), 3);
        view.container_mut().push(vec![21, 22, 23]);
        assert_eq!(view.len(), 6);
        view.container_mut()[1].clear();
        assert_eq!(view.len(), 4);
    }

    #[test]
    fn test_iteration_order() {
        let view = scenario();
        assert_eq!(view.iter().copied().collect_vec(), [1, 11, 12, 21, 22, 23]);

        let mut count = 0;
        for (value, expected) in (&view).into_iter().zip([1, 11, 12, 21, 22, 23]) {
            assert_eq!(*value, expected);
            count += 1;
        }
        assert_eq!(count, view.len());
    }

    #[test]
    fn test_empty_inner_collections_are_invisible() {
        let expected = scenario().iter().copied().collect_vec();
        for at in 0..=3 {
            let mut view = scenario();
            view.container_mut().insert(at, vec![]);
            assert_eq!(view.len(), 6);
            assert_eq!(view.iter().copied().collect_vec(), expected);
        }
    }

    #[test]
    fn test_mapped_outer_collection() {
        let mut view = NestedView::<BTreeMap<&str, Vec<i32>>>::new();
        view.container_mut().insert("a", vec![1, 2]);
        view.container_mut().insert("b", vec![]);

        assert_eq!(view.len(), 2);
        assert_eq!(
            view.keyed().collect_vec(),
            [(&"a", &1, &1), (&"a", &2, &2)]
        );
    }

    #[test]
    fn test_map_of_maps() {
        let view: NestedView<BTreeMap<u8, BTreeMap<char, u32>>> = [
            (2, BTreeMap::from([('x', 20), ('y', 21)])),
            (1, BTreeMap::new()),
            (0, BTreeMap::from([('z', 0)])),
        ]
        .into_iter()
        .collect();

        assert_eq!(view.len(), 3);
        assert_eq!(
            view.iter().collect_vec(),
            [(&'z', &0), (&'x', &20), (&'y', &21)]
        );
        assert_eq!(
            view.keyed().map(|(k1, k2, v)| (*k1, *k2, *v)).collect_vec(),
            [(0, 'z', 0), (2, 'x', 20), (2, 'y', 21)]
        );
    }

    #[test]
    fn test_other_sequences() {
        let mut view = NestedView::<VecDeque<Vec<char>>>::new();
        view.extend([vec!['b'], vec![], vec!['c', 'd']]);
        view.container_mut().push_front(vec!['a']);
        assert_eq!(view.iter().collect::<String>(), "abcd");

        let view = NestedView::<Vec<Box<[u8]>>>::from(vec![
            vec![].into_boxed_slice(),
            vec![7, 8].into_boxed_slice(),
        ]);
        assert_eq!(view.iter().copied().collect_vec(), [7, 8]);
    }

    #[test]
    fn test_traversal_does_not_mutate() {
        let view = scenario();
        let before = view.clone();
        let _ = view.iter().count();
        let _ = view.keyed().count();
        assert_eq!(view, before);
        assert_eq!(view.into_container(), before.into_container());
    }
}
