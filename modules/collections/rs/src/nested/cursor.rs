use std::fmt::{self, Debug, Formatter};

use nestkit_core_rs::{Container, ElementOf, KeyOf, Shape, ValueOf};

use super::position::Position;
use super::view::NestedView;

/// Inner collection stored in the outer collection `C`.
pub type InnerOf<C> = ValueOf<C>;

/// Borrowed element of the inner collections of `C`, the item of the flattened sequence.
pub type InnerElementOf<'a, C> = ElementOf<'a, InnerOf<C>>;

/// Position inside a [`NestedView`], made of a cursor into the outer collection and a cursor
/// into the current inner collection.
///
/// A cursor is always in one of two states:
/// * valid: it addresses a real element of a non-empty inner collection;
/// * end: it is equal to [`NestedView::end`].
///
/// Cursors borrow the view and never own data. Two cursors are equal if they belong to the same
/// view and have the same [`Position`].
pub struct Cursor<'a, C>
where
    C: Container<Shape: Shape<Value: Container>> + 'a,
{
    view: &'a NestedView<C>,
    // Outer elements after the current one, None once exhausted
    outer: Option<C::Iter<'a>>,
    // Inner elements after the current one
    inner: <InnerOf<C> as Container>::Iter<'a>,
    // None for the end cursor
    current: Option<(ElementOf<'a, C>, InnerElementOf<'a, C>)>,
    position: Position,
}

impl<'a, C> Cursor<'a, C>
where
    C: Container<Shape: Shape<Value: Container>> + 'a,
{
    pub(crate) fn begin(view: &'a NestedView<C>) -> Self {
        let mut cursor = Self {
            view,
            outer: Some(view.container().iter()),
            inner: view.empty().iter(),
            current: None,
            position: Position::default(),
        };
        cursor.seek();
        cursor
    }

    pub(crate) fn end(view: &'a NestedView<C>) -> Self {
        Self {
            view,
            outer: None,
            inner: view.empty().iter(),
            current: None,
            position: view.end_position(),
        }
    }

    /// Skip-empty scan: takes outer elements until one with a non-empty inner collection is
    /// found and points the cursor at its first element. Becomes the end cursor otherwise.
    ///
    /// `position.outer` must be the ordinal of the next outer element on entry.
    fn seek(&mut self) {
        let Some(outer) = self.outer.as_mut() else {
            panic!("Attempted to advance past the end of a NestedView");
        };
        for element in outer.by_ref() {
            let inner = <C::Shape as Shape>::value(element);
            let mut iter = inner.iter();
            if let Some(first) = iter.next() {
                self.inner = iter;
                self.current = Some((element, first));
                self.position.inner = 0;
                return;
            }
            self.position.outer += 1;
        }

        // The outer iterator is exhausted and position.outer == outer.len()
        self.outer = None;
        self.inner = self.view.empty().iter();
        self.current = None;
        self.position.inner = 0;
        debug_assert_eq!(self.position, self.view.end_position());
    }

    /// Moves the cursor to the next element of the flattened sequence, or to the end.
    ///
    /// # Panics
    ///
    /// Panics if the cursor is already at the end.
    pub fn advance(&mut self) -> &mut Self {
        let Some((outer, _)) = self.current else {
            panic!("Attempted to advance past the end of a NestedView");
        };

        match self.inner.next() {
            Some(element) => {
                self.current = Some((outer, element));
                self.position.inner += 1;
            }
            None => {
                self.position.outer += 1;
                self.seek();
            }
        }
        self
    }

    /// Returns `true` if the cursor is past the last element.
    pub fn is_end(&self) -> bool {
        self.current.is_none()
    }

    /// The current element or `None` at the end.
    pub fn current(&self) -> Option<InnerElementOf<'a, C>> {
        self.current.map(|(_, element)| element)
    }

    /// The current element.
    ///
    /// # Panics
    ///
    /// Panics if the cursor is at the end.
    pub fn get(&self) -> InnerElementOf<'a, C> {
        self.valid().1
    }

    /// Key of the current inner collection in the outer collection.
    pub fn key1(&self) -> &'a KeyOf<C> {
        <C::Shape as Shape>::key(self.valid().0)
    }

    /// Key of the current element in its inner collection.
    pub fn key2(&self) -> &'a KeyOf<InnerOf<C>> {
        <<InnerOf<C> as Container>::Shape as Shape>::key(self.valid().1)
    }

    /// Value of the current element.
    pub fn value(&self) -> &'a ValueOf<InnerOf<C>> {
        <<InnerOf<C> as Container>::Shape as Shape>::value(self.valid().1)
    }

    /// Inner collection holding the current element.
    pub fn inner(&self) -> &'a InnerOf<C> {
        <C::Shape as Shape>::value(self.valid().0)
    }

    /// Ordinal position of the cursor, `(outer.len(), 0)` at the end.
    pub fn position(&self) -> Position {
        self.position
    }

    /// The view this cursor belongs to.
    pub fn parent(&self) -> &'a NestedView<C> {
        self.view
    }

    /// The outer collection of the parent view.
    pub fn container(&self) -> &'a C {
        self.view.container()
    }

    fn valid(&self) -> (ElementOf<'a, C>, InnerElementOf<'a, C>) {
        match self.current {
            Some(current) => current,
            None => panic!("Attempted to dereference the end cursor of a NestedView"),
        }
    }
}

// Manual implementation: derive(Clone) would require C: Clone
impl<'a, C> Clone for Cursor<'a, C>
where
    C: Container<Shape: Shape<Value: Container>> + 'a,
{
    fn clone(&self) -> Self {
        Self {
            view: self.view,
            outer: self.outer.clone(),
            inner: self.inner.clone(),
            current: self.current,
            position: self.position,
        }
    }
}

impl<'a, C> PartialEq for Cursor<'a, C>
where
    C: Container<Shape: Shape<Value: Container>> + 'a,
{
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.view, other.view) && self.position == other.position
    }
}

impl<'a, C> Eq for Cursor<'a, C> where C: Container<Shape: Shape<Value: Container>> + 'a {}

impl<'a, C> Debug for Cursor<'a, C>
where
    C: Container<Shape: Shape<Value: Container>> + 'a,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor")
            .field("position", &self.position)
            .field("end", &self.is_end())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::collections::BTreeMap;

    use itertools::Itertools;
    use nestkit_core_rs::Mapped;

    use super::*;

    // BTreeMap that counts the steps taken by its iterators
    #[derive(Default)]
    struct Counted {
        map: BTreeMap<u32, Vec<u32>>,
        steps: Cell<usize>,
    }

    #[derive(Clone)]
    struct CountedIter<'a> {
        iter: std::collections::btree_map::Iter<'a, u32, Vec<u32>>,
        steps: &'a Cell<usize>,
    }

    impl<'a> Iterator for CountedIter<'a> {
        type Item = (&'a u32, &'a Vec<u32>);

        fn next(&mut self) -> Option<Self::Item> {
            self.steps.set(self.steps.get() + 1);
            self.iter.next()
        }
    }

    impl Container for Counted {
        type Shape = Mapped<u32, Vec<u32>>;
        type Iter<'a>
            = CountedIter<'a>
        where
            Self: 'a;

        fn len(&self) -> usize {
            self.map.len()
        }

        fn iter(&self) -> Self::Iter<'_> {
            CountedIter {
                iter: self.map.iter(),
                steps: &self.steps,
            }
        }
    }

    type Nested = NestedView<Vec<Vec<i32>>>;

    fn walk<C>(view: &NestedView<C>) -> Vec<Position>
    where
        C: Container<Shape: Shape<Value: Container>>,
    {
        let mut positions = Vec::new();
        let mut cursor = view.begin();
        while cursor != view.end() {
            positions.push(cursor.position());
            cursor.advance();
        }
        assert!(cursor.is_end());
        assert_eq!(cursor.position(), view.end().position());
        positions
    }

    #[test]
    fn test_begin_equals_end_iff_no_elements() {
        for (inner, empty) in [
            (vec![], true),
            (vec![vec![]], true),
            (vec![vec![], vec![], vec![]], true),
            (vec![vec![], vec![1]], false),
            (vec![vec![1], vec![]], false),
        ] {
            let view = Nested::from(inner);
            assert_eq!(view.begin() == view.end(), empty);
            assert_eq!(view.begin().is_end(), empty);
        }
    }

    #[test]
    fn test_end_is_canonical() {
        let view = Nested::from(vec![vec![1, 2], vec![], vec![3]]);
        assert_eq!(view.end().position(), Position::new(3, 0));
        assert_eq!(view.end(), view.end());

        let mut cursor = view.begin();
        for _ in 0..view.len() {
            cursor.advance();
        }
        assert_eq!(cursor, view.end());
        assert_eq!(cursor.current(), None);
    }

    #[test]
    fn test_cursor_loop() {
        let view = Nested::from(vec![vec![1], vec![11, 12], vec![21, 22, 23]]);
        let expected = [1, 11, 12, 21, 22, 23];

        let mut cursor = view.begin();
        let mut visited = 0;
        while cursor != view.end() {
            assert_eq!(*cursor.get(), expected[visited]);
            visited += 1;
            cursor.advance();
        }
        assert_eq!(visited, view.len());
    }

    #[test]
    fn test_positions_skip_empty_inner_collections() {
        let view = Nested::from(vec![vec![], vec![1], vec![], vec![], vec![2, 3], vec![]]);
        assert_eq!(
            walk(&view),
            [Position::new(1, 0), Position::new(4, 0), Position::new(4, 1)]
        );

        // No position ever addresses an empty inner collection
        for position in walk(&view) {
            assert!(!view.container()[position.outer].is_empty());
        }
    }

    #[test]
    fn test_begin_is_idempotent() {
        let view = Nested::from(vec![vec![], vec![5, 6], vec![7]]);
        let (mut first, mut second) = (view.begin(), view.begin());
        assert_eq!(first, second);

        while !first.is_end() {
            assert_eq!(first, second);
            assert_eq!(first.get(), second.get());
            first.advance();
            second.advance();
        }
        assert_eq!(second, view.end());
    }

    #[test]
    fn test_cloned_cursor_is_independent() {
        let view = Nested::from(vec![vec![1, 2, 3]]);
        let mut cursor = view.begin();
        let snapshot = cursor.clone();
        cursor.advance().advance();

        assert_eq!(*snapshot.get(), 1);
        assert_eq!(*cursor.get(), 3);
        assert_ne!(snapshot, cursor);
    }

    #[test]
    fn test_cursors_of_different_views_differ() {
        let first = Nested::from(vec![vec![1]]);
        let second = first.clone();
        assert_ne!(first.begin(), second.begin());
        assert_ne!(first.end(), second.end());
    }

    #[test]
    fn test_keys_of_mapped_outer_collection() {
        let view = NestedView::from(BTreeMap::from([("a", vec![1, 2]), ("b", vec![])]));

        let mut cursor = view.begin();
        let mut visited = Vec::new();
        while !cursor.is_end() {
            visited.push((*cursor.key1(), *cursor.key2(), *cursor.value()));
            assert_eq!(cursor.inner(), &vec![1, 2]);
            cursor.advance();
        }
        assert_eq!(visited, [("a", 1, 1), ("a", 2, 2)]);
        assert!(visited.iter().all(|(key, _, _)| *key != "b"));
    }

    #[test]
    fn test_keys_of_nested_maps() {
        let view = NestedView::from(vec![
            BTreeMap::from([("x", 1.0)]),
            BTreeMap::new(),
            BTreeMap::from([("y", 2.0), ("z", 3.0)]),
        ]);

        let cursor = view.begin();
        assert_eq!(cursor.key1(), &BTreeMap::from([("x", 1.0)]));

        let mut cursor = view.begin();
        let mut keys = Vec::new();
        while !cursor.is_end() {
            keys.push((*cursor.key2(), *cursor.value()));
            cursor.advance();
        }
        assert_eq!(keys, [("x", 1.0), ("y", 2.0), ("z", 3.0)]);
        assert!(std::ptr::eq(cursor.parent(), &view));
        assert_eq!(cursor.container().len(), 3);
    }

    #[test]
    fn test_positions_follow_traversal_order() {
        let view = Nested::from(vec![vec![1, 2], vec![3], vec![4, 5, 6]]);
        let positions = walk(&view);
        assert!(positions.iter().tuple_windows().all(|(a, b)| a < b));
        assert_eq!(positions.len(), view.len());
    }

    #[test]
    fn test_cursor_loop_is_linear() {
        let mut view = NestedView::<Counted>::new();
        for key in 0..1000 {
            let inner = if key % 3 == 0 { vec![] } else { vec![key] };
            view.container_mut().map.insert(key, inner);
        }
        let expected = view.len();
        view.container().steps.set(0);

        let mut cursor = view.begin();
        let mut visited = 0;
        while cursor != view.end() {
            visited += 1;
            cursor.advance();
        }
        assert_eq!(visited, expected);
        // One step per outer element plus the final None
        assert_eq!(view.container().steps.get(), 1001);

        // The end cursor never touches the outer collection
        view.container().steps.set(0);
        for _ in 0..100 {
            assert!(view.end().is_end());
        }
        assert_eq!(view.container().steps.get(), 0);
    }

    #[test]
    #[should_panic(expected = "advance past the end")]
    fn test_advance_end_panics() {
        let view = Nested::from(vec![vec![1]]);
        view.end().advance();
    }

    #[test]
    #[should_panic(expected = "dereference the end cursor")]
    fn test_get_end_panics() {
        let view = Nested::from(vec![vec![]]);
        view.begin().get();
    }
}
