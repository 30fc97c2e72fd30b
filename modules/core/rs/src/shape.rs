use std::marker::PhantomData;

/// Describes how the raw elements of a collection are split into keys and values.
///
/// Plain sequences (`Vec<T>`, `VecDeque<T>`, `BTreeSet<T>`) yield `&T` and their key and value
/// are the element itself. Mapped collections (`BTreeMap<K, T>`, `HashMap<K, T>`) yield
/// `(&K, &T)` pairs, the key is the first half and the value is the second one.
///
/// The trait is a compile-time capability: it has no state and is never instantiated.
pub trait Shape {
    /// Key of a single element.
    type Key: ?Sized;

    /// Value of a single element. For nested collections this is the inner collection.
    type Value;

    /// Borrowed element as produced by the collection iterator.
    type Element<'a>: Copy
    where
        Self: 'a;

    /// Projects an element into its key.
    fn key<'a>(element: Self::Element<'a>) -> &'a Self::Key
    where
        Self: 'a;

    /// Projects an element into its value.
    fn value<'a>(element: Self::Element<'a>) -> &'a Self::Value
    where
        Self: 'a;
}

/// Shape of sequence-like collections: `Key = Value = Element = T`.
#[derive(Debug)]
pub struct Identity<T>(PhantomData<fn() -> T>);

impl<T> Identity<T> {
    /// Reconstructs the raw element from its value, the inverse of [`Shape::value`]. Only
    /// sequences can do that, mapped collections would need the key as well.
    ///
    /// ```
    /// use nestkit_core_rs::{Identity, Shape};
    ///
    /// let value = 7;
    /// let element = Identity::element(&value);
    /// assert!(std::ptr::eq(Identity::<i32>::value(element), &value));
    /// ```
    #[inline(always)]
    pub fn element(value: &T) -> &T {
        value
    }
}

impl<T> Shape for Identity<T> {
    type Key = T;
    type Value = T;
    type Element<'a>
        = &'a T
    where
        Self: 'a;

    #[inline(always)]
    fn key<'a>(element: &'a T) -> &'a T
    where
        Self: 'a,
    {
        element
    }

    #[inline(always)]
    fn value<'a>(element: &'a T) -> &'a T
    where
        Self: 'a,
    {
        element
    }
}

/// Shape of key-to-value collections: `Key = K`, `Value = T`, `Element = (K, T)`.
#[derive(Debug)]
pub struct Mapped<K, T>(PhantomData<fn() -> (K, T)>);

impl<K, T> Shape for Mapped<K, T> {
    type Key = K;
    type Value = T;
    type Element<'a>
        = (&'a K, &'a T)
    where
        Self: 'a;

    #[inline(always)]
    fn key<'a>(element: (&'a K, &'a T)) -> &'a K
    where
        Self: 'a,
    {
        element.0
    }

    #[inline(always)]
    fn value<'a>(element: (&'a K, &'a T)) -> &'a T
    where
        Self: 'a,
    {
        element.1
    }
}
