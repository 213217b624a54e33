//! alias-map: a single-threaded map in which multiple alias keys
//! resolve to one shared value slot.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: keep the aliasing/indirection mechanism small and verifiable;
//!   every operation maintains two tables that must agree after each
//!   mutation.
//! - Tables:
//!   - `slots: IndexMap<K, V>`: one entry per canonical key, holding the
//!     shared value.
//!   - `index: IndexMap<K, K>`: every known key (canonical or alias)
//!     mapped to the canonical key it currently resolves to; canonical
//!     keys map to themselves.
//!
//! Resolution invariants
//! - Single hop: binding an alias copies the *resolved* target of the
//!   existing key, never the existing key by reference, so no sequence
//!   of `alias` calls ever produces a chain.
//! - Membership is index membership: a key absent from `index` is absent
//!   from the container, even when a slot still carries it as its
//!   canonical identity (a canonical key can be re-aliased away and
//!   leave its slot behind).
//! - Group deletion: removing through any key pops the slot it resolves
//!   to and purges every key with the same target.
//! - After every completed mutation, each index target owns a slot; a
//!   debug-build walk asserts this and compiles out in release.
//!
//! Ordering
//! - Both tables are insertion-ordered (`indexmap`), so `keys()` follows
//!   first-binding order, while `values()`/`items()` follow slot
//!   creation order. Overwrites and re-aliasing keep positions.
//!
//! Key input
//! - `set`/`update`/construction accept either one key or an explicit
//!   ordered key sequence via the `OneOrMany` tagged union. Key types
//!   are fully opaque; a string key is never treated as a sequence of
//!   characters.
//!
//! Error semantics
//! - One error type, `KeyNotFound`, carrying the key that failed to
//!   resolve. Only the strict forms (`try_get`, `try_remove`, `alias`,
//!   `alias_many`) produce it; `get`/`remove` return `Option` and a
//!   caller default is `unwrap_or` away. A failed `alias_many` binds
//!   nothing.
//!
//! Notes and non-goals
//! - Single-threaded, no interior mutability; all mutation flows through
//!   `&mut self`.
//! - `Clone` is a shallow copy: alias structure is duplicated, values
//!   are cloned with `V::clone` (share via `Rc` when copies should
//!   observe each other's value mutations).
//! - Not a throughput-oriented map; group removal and enumeration are
//!   O(number of keys) by design.
//! - No `Index`/`IntoIterator` sugar; the surface is explicit methods.

mod alias_map;
mod alias_map_proptest;
mod one_or_many;

// Public surface
pub use alias_map::{
    AliasMap, CanonicalItems, CanonicalKeys, GroupOf, Items, KeyNotFound, Keys, Values,
};
pub use one_or_many::OneOrMany;
