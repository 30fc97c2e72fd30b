use std::collections::{BTreeMap, BTreeSet, HashMap, VecDeque};
use std::hash::{BuildHasher, Hash};

use super::shape::{Identity, Mapped, Shape};

/// Uniform read-only view of a collection: its length and an in-order iterator over the
/// elements, where each element is interpreted through the collection [`Shape`].
pub trait Container {
    /// Key/value projection used for the elements of this collection.
    type Shape: Shape;

    /// Iterator over the borrowed elements in the natural order of the collection.
    type Iter<'a>: Iterator<Item = <Self::Shape as Shape>::Element<'a>> + Clone
    where
        Self: 'a;

    /// Number of elements in the collection.
    fn len(&self) -> usize;

    /// Returns `true` if the collection holds no elements.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterates over all elements of the collection.
    fn iter(&self) -> Self::Iter<'_>;
}

/// Key of the elements stored in the collection `C`.
pub type KeyOf<C> = <<C as Container>::Shape as Shape>::Key;

/// Value of the elements stored in the collection `C`.
pub type ValueOf<C> = <<C as Container>::Shape as Shape>::Value;

/// Borrowed element of the collection `C`.
pub type ElementOf<'a, C> = <<C as Container>::Shape as Shape>::Element<'a>;

impl<T> Container for Vec<T> {
    type Shape = Identity<T>;
    type Iter<'a>
        = std::slice::Iter<'a, T>
    where
        Self: 'a;

    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn iter(&self) -> Self::Iter<'_> {
        self.as_slice().iter()
    }
}

impl<T> Container for Box<[T]> {
    type Shape = Identity<T>;
    type Iter<'a>
        = std::slice::Iter<'a, T>
    where
        Self: 'a;

    fn len(&self) -> usize {
        <[T]>::len(self)
    }

    fn iter(&self) -> Self::Iter<'_> {
        <[T]>::iter(self)
    }
}

impl<T> Container for VecDeque<T> {
    type Shape = Identity<T>;
    type Iter<'a>
        = std::collections::vec_deque::Iter<'a, T>
    where
        Self: 'a;

    fn len(&self) -> usize {
        VecDeque::len(self)
    }

    fn iter(&self) -> Self::Iter<'_> {
        VecDeque::iter(self)
    }
}

impl<T: Ord> Container for BTreeSet<T> {
    type Shape = Identity<T>;
    type Iter<'a>
        = std::collections::btree_set::Iter<'a, T>
    where
        Self: 'a;

    fn len(&self) -> usize {
        BTreeSet::len(self)
    }

    fn iter(&self) -> Self::Iter<'_> {
        BTreeSet::iter(self)
    }
}

impl<K: Ord, T> Container for BTreeMap<K, T> {
    type Shape = Mapped<K, T>;
    type Iter<'a>
        = std::collections::btree_map::Iter<'a, K, T>
    where
        Self: 'a;

    fn len(&self) -> usize {
        BTreeMap::len(self)
    }

    fn iter(&self) -> Self::Iter<'_> {
        BTreeMap::iter(self)
    }
}

/// Hash maps have no natural order, the iteration order is the (stable) internal order of the
/// map until it is modified.
impl<K: Hash + Eq, T, S: BuildHasher> Container for HashMap<K, T, S> {
    type Shape = Mapped<K, T>;
    type Iter<'a>
        = std::collections::hash_map::Iter<'a, K, T>
    where
        Self: 'a;

    fn len(&self) -> usize {
        HashMap::len(self)
    }

    fn iter(&self) -> Self::Iter<'_> {
        HashMap::iter(self)
    }
}
