#![cfg(test)]

// Property tests for AliasMap kept inside the crate so the op machinery
// can grow table-level checks without feature gates.
//
// The reference model is the same two-table scheme over naive ordered
// maps with no ordering guarantees and free cloning. After every op the
// test compares all observable behavior: per-key lookups, membership,
// slot and key counts, the canonical key set, and per-canonical group
// sets. Order-sensitive behavior is covered by the unit and integration
// suites.

use crate::AliasMap;
use proptest::prelude::*;
use std::collections::{BTreeMap, BTreeSet};

#[derive(Clone, Debug, Default)]
struct Model {
    slots: BTreeMap<String, i32>,
    index: BTreeMap<String, String>,
}

impl Model {
    fn insert(&mut self, key: &str, value: i32) {
        let canonical = self
            .index
            .entry(key.to_string())
            .or_insert_with(|| key.to_string())
            .clone();
        self.slots.insert(canonical, value);
    }

    fn insert_many(&mut self, keys: &[String], value: i32) {
        let Some(first) = keys.first() else {
            return;
        };
        self.insert(first, value);
        let target = self.index[first.as_str()].clone();
        for key in &keys[1..] {
            self.index.insert(key.clone(), target.clone());
        }
    }

    fn alias(&mut self, existing: &str, new: &[String]) -> bool {
        let Some(target) = self.index.get(existing).cloned() else {
            return false;
        };
        for key in new {
            self.index.insert(key.clone(), target.clone());
        }
        true
    }

    fn remove(&mut self, key: &str) -> Option<i32> {
        let canonical = self.index.get(key)?.clone();
        let value = self.slots.remove(&canonical)?;
        self.index.retain(|_, target| *target != canonical);
        Some(value)
    }

    fn remove_canonical(&mut self, canonical: &str) -> i32 {
        let value = self.slots.remove(canonical).expect("model slot present");
        self.index.retain(|_, target| target != canonical);
        value
    }

    fn get(&self, key: &str) -> Option<i32> {
        self.slots.get(self.index.get(key)?).copied()
    }

    fn group(&self, canonical: &str) -> BTreeSet<String> {
        self.index
            .iter()
            .filter(|(_, target)| target.as_str() == canonical)
            .map(|(key, _)| key.clone())
            .collect()
    }
}

#[derive(Clone, Debug)]
enum Op {
    Insert(usize, i32),
    InsertMany(Vec<usize>, i32),
    Alias(usize, usize),
    AliasMany(usize, Vec<usize>),
    Remove(usize),
    TryRemove(usize),
    Pop,
    Clear,
}

fn key(i: usize) -> String {
    format!("k{}", i)
}

fn arb_op(pool: usize) -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (0..pool, any::<i32>()).prop_map(|(i, v)| Op::Insert(i, v)),
        3 => (proptest::collection::vec(0..pool, 0..4), any::<i32>())
            .prop_map(|(ks, v)| Op::InsertMany(ks, v)),
        4 => (0..pool, 0..pool).prop_map(|(a, b)| Op::Alias(a, b)),
        2 => (0..pool, proptest::collection::vec(0..pool, 0..3))
            .prop_map(|(a, bs)| Op::AliasMany(a, bs)),
        2 => (0..pool).prop_map(Op::Remove),
        1 => (0..pool).prop_map(Op::TryRemove),
        1 => Just(Op::Pop),
        1 => Just(Op::Clear),
    ]
}

fn arb_scenario() -> impl Strategy<Value = (usize, Vec<Op>)> {
    (2usize..=6).prop_flat_map(|pool| {
        (
            Just(pool),
            proptest::collection::vec(arb_op(pool), 1..60),
        )
    })
}

proptest! {
    #[test]
    fn prop_alias_map_matches_model((pool, ops) in arb_scenario()) {
        let mut m: AliasMap<String, i32> = AliasMap::new();
        let mut model = Model::default();

        for op in ops {
            match op {
                Op::Insert(i, v) => {
                    m.insert(key(i), v);
                    model.insert(&key(i), v);
                }
                Op::InsertMany(is, v) => {
                    let keys: Vec<String> = is.iter().map(|&i| key(i)).collect();
                    m.insert_many(keys.clone(), v);
                    model.insert_many(&keys, v);
                }
                Op::Alias(a, b) => {
                    let res = m.alias(key(a).as_str(), key(b));
                    let ok = model.alias(&key(a), std::slice::from_ref(&key(b)));
                    prop_assert_eq!(res.is_ok(), ok);
                    if let Err(err) = res {
                        prop_assert_eq!(err.key, key(a));
                    }
                }
                Op::AliasMany(a, bs) => {
                    let news: Vec<String> = bs.iter().map(|&b| key(b)).collect();
                    let res = m.alias_many(key(a).as_str(), news.clone());
                    let ok = model.alias(&key(a), &news);
                    prop_assert_eq!(res.is_ok(), ok);
                }
                Op::Remove(i) => {
                    prop_assert_eq!(m.remove(key(i).as_str()), model.remove(&key(i)));
                }
                Op::TryRemove(i) => {
                    match m.try_remove(key(i).as_str()) {
                        Ok(v) => prop_assert_eq!(Some(v), model.remove(&key(i))),
                        Err(err) => {
                            prop_assert_eq!(model.remove(&key(i)), None);
                            prop_assert_eq!(err.key, key(i));
                        }
                    }
                }
                Op::Pop => {
                    // pop drains the most recently created surviving slot
                    let expected = m.canonical_keys().last().cloned();
                    match m.pop() {
                        None => prop_assert!(model.slots.is_empty()),
                        Some((members, value)) => {
                            let canonical = expected.expect("nonempty map has a last slot");
                            prop_assert_eq!(value, model.slots[&canonical]);
                            let got: BTreeSet<String> = members.into_iter().collect();
                            prop_assert_eq!(got, model.group(&canonical));
                            model.remove_canonical(&canonical);
                        }
                    }
                }
                Op::Clear => {
                    m.clear();
                    model.slots.clear();
                    model.index.clear();
                }
            }

            // Per-key observables agree for the whole key pool.
            for i in 0..pool {
                let k = key(i);
                prop_assert_eq!(m.get(k.as_str()).copied(), model.get(&k));
                prop_assert_eq!(m.contains_key(k.as_str()), model.index.contains_key(&k));
            }

            // Counts and canonical key sets agree.
            prop_assert_eq!(m.len(), model.slots.len());
            prop_assert_eq!(m.key_count(), model.index.len());
            let canon: BTreeSet<String> = m.canonical_keys().cloned().collect();
            let model_canon: BTreeSet<String> = model.slots.keys().cloned().collect();
            prop_assert_eq!(canon, model_canon);

            // No dangling resolution: every known key reaches a value.
            for k in m.keys() {
                prop_assert!(m.get(k.as_str()).is_some());
            }

            // Group partitions agree per canonical key.
            for canonical in model.slots.keys() {
                let got: BTreeSet<String> =
                    m.group_of(canonical.as_str()).cloned().collect();
                prop_assert_eq!(got, model.group(canonical));
            }
        }
    }
}
