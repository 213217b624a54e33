//! AliasMap: two-table container mapping many alias keys onto shared value slots.

use crate::one_or_many::OneOrMany;
use core::borrow::Borrow;
use core::fmt;
use core::hash::{BuildHasher, Hash};
use indexmap::IndexMap;
use std::collections::hash_map::RandomState;
use thiserror::Error;

/// Lookup failure carrying the key that did not resolve.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
#[error("key {key:?} not found")]
pub struct KeyNotFound<K> {
    pub key: K,
}

/// A map in which any number of keys can resolve to one shared value.
///
/// Two tables back the container:
/// - `slots` holds one entry per canonical key and its value.
/// - `index` maps every known key, canonical or alias, to the canonical
///   key it currently resolves to. Canonical keys map to themselves.
///
/// Resolution is always a single hop: binding an alias copies the
/// resolved target of the existing key, never a reference to the key
/// itself, so chains of `alias` calls stay flat.
///
/// `Clone` produces a shallow copy: the alias structure is duplicated
/// and every value is cloned with `V::clone`. Wrap values in
/// `Rc<RefCell<..>>` when copies should observe each other's mutations.
#[derive(Clone)]
pub struct AliasMap<K, V, S = RandomState> {
    slots: IndexMap<K, V, S>,
    index: IndexMap<K, K, S>,
}

impl<K, V> AliasMap<K, V>
where
    K: Eq + Hash + Clone,
{
    pub fn new() -> Self {
        Self::with_hasher(Default::default())
    }
}

impl<K, V> Default for AliasMap<K, V>
where
    K: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, S> AliasMap<K, V, S>
where
    S: Clone,
{
    pub fn with_hasher(hasher: S) -> Self {
        Self {
            slots: IndexMap::with_hasher(hasher.clone()),
            index: IndexMap::with_hasher(hasher),
        }
    }
}

impl<K, V, S> AliasMap<K, V, S> {
    /// Number of canonical slots, which is the number of stored values.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Number of known keys, canonical and alias alike.
    pub fn key_count(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty() && self.slots.is_empty()
    }

    /// Drops every slot and every key binding.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.index.clear();
    }

    /// Every known key in insertion/aliasing order, aliases included.
    pub fn keys(&self) -> Keys<'_, K> {
        Keys {
            it: self.index.keys(),
        }
    }

    /// Keys that currently own a slot, in slot order.
    ///
    /// A canonical key can be re-aliased away and still appear here while
    /// its slot survives; do not assume a canonical key resolves to its
    /// own slot.
    pub fn canonical_keys(&self) -> CanonicalKeys<'_, K, V> {
        CanonicalKeys {
            it: self.slots.keys(),
        }
    }

    /// One value per canonical slot, in slot order.
    pub fn values(&self) -> Values<'_, K, V> {
        Values {
            it: self.slots.values(),
        }
    }

    /// Raw slot entries: canonical key paired with value, no grouping.
    pub fn canonical_items(&self) -> CanonicalItems<'_, K, V> {
        CanonicalItems {
            it: self.slots.iter(),
        }
    }

    /// All keys whose current resolution target is `canonical`, in
    /// index order. Querying an alias (a key nothing resolves to)
    /// yields an empty iterator.
    pub fn group_of<'a, 'q, Q>(&'a self, canonical: &'q Q) -> GroupOf<'a, 'q, K, Q>
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq,
    {
        GroupOf {
            it: self.index.iter(),
            canonical,
        }
    }
}

impl<K, V, S> AliasMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    /// Resolve a key to the canonical key it currently targets, without
    /// touching the slot table. Exactly one hop.
    pub fn resolve<Q>(&self, key: &Q) -> Option<&K>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.index.get(key)
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.index.contains_key(key)
    }

    /// Shared value for `key`, or `None` when the key is unknown.
    ///
    /// Also returns `None` on the defensive path where a key resolves to
    /// a canonical key with no slot; that state is unreachable through
    /// this API but must not panic.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let canonical = self.index.get(key)?;
        self.slots.get(canonical)
    }

    /// Mutable access to the shared value; mutation is visible through
    /// every alias of the slot.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let canonical = self.index.get(key)?;
        self.slots.get_mut(canonical)
    }

    /// Like [`get`](Self::get), but reports the missing key in the error.
    pub fn try_get<Q>(&self, key: &Q) -> Result<&V, KeyNotFound<K>>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq + ToOwned<Owned = K>,
    {
        self.get(key).ok_or_else(|| KeyNotFound {
            key: key.to_owned(),
        })
    }

    /// One entry per slot, in slot order, pairing the slot's full alias
    /// group (in index order) with its value. The grouping is computed
    /// when the iterator is created; iterate again to recompute. The
    /// group is empty for a slot whose canonical key was re-aliased away.
    pub fn items(&self) -> Items<'_, K, V> {
        let mut groups: hashbrown::HashMap<&K, Vec<&K>> = hashbrown::HashMap::new();
        for (key, target) in &self.index {
            groups.entry(target).or_default().push(key);
        }
        Items {
            groups,
            it: self.slots.iter(),
        }
    }
}

impl<K, V, S> AliasMap<K, V, S>
where
    K: Eq + Hash + Clone,
    S: BuildHasher,
{
    /// Assign `value` to a single key.
    ///
    /// A fresh key becomes its own canonical slot. A known key stores
    /// the value into the slot it resolves to, overwriting in place so
    /// the update is visible through every alias of that slot. Returns
    /// the displaced value, if any.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let displaced = match self.index.get(&key) {
            Some(canonical) => {
                let canonical = canonical.clone();
                self.slots.insert(canonical, value)
            }
            None => {
                self.index.insert(key.clone(), key.clone());
                self.slots.insert(key, value)
            }
        };
        self.debug_validate();
        displaced
    }

    /// Assign `value` to an ordered sequence of keys: single-key
    /// assignment of the first key, then every following key is bound
    /// to the first key's resolved target, left to right. An empty
    /// sequence is a no-op.
    pub fn insert_many<I>(&mut self, keys: I, value: V) -> Option<V>
    where
        I: IntoIterator<Item = K>,
    {
        let mut keys = keys.into_iter();
        let first = keys.next()?;
        let displaced = self.insert(first.clone(), value);
        if let Some(target) = self.index.get(&first).cloned() {
            for key in keys {
                self.index.insert(key, target.clone());
            }
        }
        self.debug_validate();
        displaced
    }

    /// Tagged-input assignment: accepts a single key or a key sequence.
    pub fn set<T>(&mut self, keys: T, value: V) -> Option<V>
    where
        T: Into<OneOrMany<K>>,
    {
        match keys.into() {
            OneOrMany::One(key) => self.insert(key, value),
            OneOrMany::Many(keys) => self.insert_many(keys, value),
        }
    }

    /// Bind `new` to the current resolution target of `existing`.
    ///
    /// The resolved target is copied, not `existing` itself, which is
    /// what keeps resolution single-hop. When `new` is already known it
    /// is silently re-targeted and its previous group loses it as a
    /// member. Fails without mutating when `existing` does not resolve.
    pub fn alias<Q>(&mut self, existing: &Q, new: K) -> Result<(), KeyNotFound<K>>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq + ToOwned<Owned = K>,
    {
        let target = self
            .index
            .get(existing)
            .cloned()
            .ok_or_else(|| KeyNotFound {
                key: existing.to_owned(),
            })?;
        self.index.insert(new, target);
        self.debug_validate();
        Ok(())
    }

    /// Bind each key in `new` to the resolution target of `existing`.
    ///
    /// The target is resolved once, before any binding happens, so an
    /// unresolvable `existing` key adds no aliases at all.
    pub fn alias_many<Q, I>(&mut self, existing: &Q, new: I) -> Result<(), KeyNotFound<K>>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq + ToOwned<Owned = K>,
        I: IntoIterator<Item = K>,
    {
        let target = self
            .index
            .get(existing)
            .cloned()
            .ok_or_else(|| KeyNotFound {
                key: existing.to_owned(),
            })?;
        for key in new {
            self.index.insert(key, target.clone());
        }
        self.debug_validate();
        Ok(())
    }

    /// Remove the whole group `key` belongs to and return the shared
    /// value. Deleting through any alias deletes every key that resolves
    /// to the same slot, not just the one passed in. `None` when the key
    /// is unknown (use `unwrap_or` for a caller-supplied default).
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let canonical = self.index.get(key)?.clone();
        let value = self.slots.shift_remove(&canonical)?;
        self.index.retain(|_, target| *target != canonical);
        self.debug_validate();
        Some(value)
    }

    /// Like [`remove`](Self::remove), but reports the missing key in
    /// the error.
    pub fn try_remove<Q>(&mut self, key: &Q) -> Result<V, KeyNotFound<K>>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq + ToOwned<Owned = K>,
    {
        self.remove(key).ok_or_else(|| KeyNotFound {
            key: key.to_owned(),
        })
    }

    /// Remove one arbitrary group: the most recently created surviving
    /// slot. Returns the full member list in index order, possibly empty
    /// for a slot whose canonical key was re-aliased away, paired with
    /// the value. Repeated calls drain the map without repeating a group.
    pub fn pop(&mut self) -> Option<(Vec<K>, V)> {
        let (canonical, value) = self.slots.pop()?;
        let members: Vec<K> = self
            .index
            .iter()
            .filter(|(_, target)| **target == canonical)
            .map(|(key, _)| key.clone())
            .collect();
        self.index.retain(|_, target| *target != canonical);
        self.debug_validate();
        Some((members, value))
    }

    /// Apply `set` once per entry, in iteration order. Known keys
    /// overwrite their shared slot; fresh keys become new canonical
    /// entries.
    pub fn update<T, I>(&mut self, entries: I)
    where
        T: Into<OneOrMany<K>>,
        I: IntoIterator<Item = (T, V)>,
    {
        for (keys, value) in entries {
            self.set(keys, value);
        }
    }

    // Cross-table consistency walk, compiled out of release builds:
    // every index target must own a slot once a mutation completes.
    fn debug_validate(&self) {
        #[cfg(debug_assertions)]
        for target in self.index.values() {
            debug_assert!(
                self.slots.contains_key(target),
                "alias target lost its value slot"
            );
        }
    }
}

impl<K, V, S> fmt::Debug for AliasMap<K, V, S>
where
    K: Eq + Hash + fmt::Debug,
    V: fmt::Debug,
    S: BuildHasher,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.items()).finish()
    }
}

impl<K, V, S> Extend<(OneOrMany<K>, V)> for AliasMap<K, V, S>
where
    K: Eq + Hash + Clone,
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = (OneOrMany<K>, V)>>(&mut self, iter: I) {
        self.update(iter);
    }
}

impl<K, V, S> Extend<(K, V)> for AliasMap<K, V, S>
where
    K: Eq + Hash + Clone,
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K, V, S> FromIterator<(OneOrMany<K>, V)> for AliasMap<K, V, S>
where
    K: Eq + Hash + Clone,
    S: BuildHasher + Clone + Default,
{
    fn from_iter<I: IntoIterator<Item = (OneOrMany<K>, V)>>(iter: I) -> Self {
        let mut map = Self::with_hasher(S::default());
        map.update(iter);
        map
    }
}

impl<K, V, S> FromIterator<(K, V)> for AliasMap<K, V, S>
where
    K: Eq + Hash + Clone,
    S: BuildHasher + Clone + Default,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::with_hasher(S::default());
        map.extend(iter);
        map
    }
}

/// Iterator over every known key, aliases included.
pub struct Keys<'a, K> {
    it: indexmap::map::Keys<'a, K, K>,
}

impl<'a, K> Iterator for Keys<'a, K> {
    type Item = &'a K;
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.it.next()
    }
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.it.size_hint()
    }
}

impl<'a, K> ExactSizeIterator for Keys<'a, K> {}

/// Iterator over keys that currently own a slot.
pub struct CanonicalKeys<'a, K, V> {
    it: indexmap::map::Keys<'a, K, V>,
}

impl<'a, K, V> Iterator for CanonicalKeys<'a, K, V> {
    type Item = &'a K;
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.it.next()
    }
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.it.size_hint()
    }
}

impl<'a, K, V> ExactSizeIterator for CanonicalKeys<'a, K, V> {}

/// Iterator over slot values.
pub struct Values<'a, K, V> {
    it: indexmap::map::Values<'a, K, V>,
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.it.next()
    }
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.it.size_hint()
    }
}

impl<'a, K, V> ExactSizeIterator for Values<'a, K, V> {}

/// Iterator over raw slot entries.
pub struct CanonicalItems<'a, K, V> {
    it: indexmap::map::Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for CanonicalItems<'a, K, V> {
    type Item = (&'a K, &'a V);
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.it.next()
    }
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.it.size_hint()
    }
}

impl<'a, K, V> ExactSizeIterator for CanonicalItems<'a, K, V> {}

/// Iterator pairing each slot's alias group with its value.
pub struct Items<'a, K, V> {
    groups: hashbrown::HashMap<&'a K, Vec<&'a K>>,
    it: indexmap::map::Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Items<'a, K, V>
where
    K: Eq + Hash,
{
    type Item = (Vec<&'a K>, &'a V);
    fn next(&mut self) -> Option<Self::Item> {
        let (canonical, value) = self.it.next()?;
        let members = self.groups.remove(canonical).unwrap_or_default();
        Some((members, value))
    }
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.it.size_hint()
    }
}

impl<'a, K, V> ExactSizeIterator for Items<'a, K, V> where K: Eq + Hash {}

/// Iterator over the keys currently resolving to one canonical key.
pub struct GroupOf<'a, 'q, K, Q: ?Sized> {
    it: indexmap::map::Iter<'a, K, K>,
    canonical: &'q Q,
}

impl<'a, 'q, K, Q> Iterator for GroupOf<'a, 'q, K, Q>
where
    K: Borrow<Q>,
    Q: ?Sized + Eq,
{
    type Item = &'a K;
    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (key, target) = self.it.next()?;
            if <K as Borrow<Q>>::borrow(target) == self.canonical {
                return Some(key);
            }
        }
    }
}
