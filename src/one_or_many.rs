//! Tagged key input for `set`-style operations.
//!
//! The container accepts either a single key or an ordered sequence of
//! keys per entry. Making the two forms an explicit enum keeps an opaque
//! key type from ever being sniffed as a sequence (a `String` key is one
//! key, never a sequence of characters).

/// One key, or an ordered sequence of keys that share one value.
///
/// In the sequence form the first key becomes (or resolves to) the
/// canonical slot and every following key is bound as an alias of it,
/// left to right.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum OneOrMany<K> {
    One(K),
    Many(Vec<K>),
}

impl<K> From<K> for OneOrMany<K> {
    fn from(key: K) -> Self {
        OneOrMany::One(key)
    }
}

impl<K> From<Vec<K>> for OneOrMany<K> {
    fn from(keys: Vec<K>) -> Self {
        OneOrMany::Many(keys)
    }
}

impl<K, const N: usize> From<[K; N]> for OneOrMany<K> {
    fn from(keys: [K; N]) -> Self {
        OneOrMany::Many(keys.into())
    }
}

impl<K: Clone> From<&[K]> for OneOrMany<K> {
    fn from(keys: &[K]) -> Self {
        OneOrMany::Many(keys.to_vec())
    }
}
