// AliasMap behavior suite (consolidated).
//
// Each test documents what behavior is being verified and which
// invariants are assumed or asserted. The core invariants exercised:
// - Resolution determinism: every key aliased onto one slot reads the
//   same value.
// - Single hop: aliasing copies the resolved target, so later
//   re-targeting of the intermediate key does not move earlier aliases.
// - Overwrite propagation: assigning through any alias updates the
//   value seen through every other alias of the slot.
// - Group deletion: removing through any key purges the whole group.
// - Ordering: key enumeration follows first-binding order, slot
//   enumeration follows slot creation order.
use alias_map::{AliasMap, OneOrMany};

// Test: single-key assignment and missing-key lookup.
// Verifies: a fresh key reads back its value; unknown keys are absent.
#[test]
fn single_key_assignment_and_missing_lookup() {
    let mut m = AliasMap::new();
    m.insert("one".to_string(), "v1".to_string());
    assert_eq!(m.get("one").map(String::as_str), Some("v1"));
    assert!(!m.contains_key("missing"));
    assert_eq!(m.get("missing"), None);
}

// Test: multi-key assignment next to a single-key one.
// Verifies: both members of the sequence read the shared value; only
// first-of-sequence keys and plain keys are canonical.
#[test]
fn sequence_assignment_shares_one_slot() {
    let mut m = AliasMap::new();
    m.insert_many(["one", "two"].map(String::from), "v1".to_string());
    m.insert("three".to_string(), "v3".to_string());

    assert_eq!(m.get("one").map(String::as_str), Some("v1"));
    assert_eq!(m.get("two").map(String::as_str), Some("v1"));
    assert_eq!(m.get("three").map(String::as_str), Some("v3"));

    let keys: Vec<&String> = m.keys().collect();
    assert_eq!(keys, ["one", "two", "three"]);
    let canonical: Vec<&String> = m.canonical_keys().collect();
    assert_eq!(canonical, ["one", "three"]);
    assert_eq!(m.len(), 2);
    assert_eq!(m.key_count(), 3);
}

// Test: overwrite through an alias.
// Verifies: assigning via the alias replaces the shared value for the
// original key as well.
#[test]
fn assignment_through_alias_propagates() {
    let mut m = AliasMap::new();
    m.insert("thing".to_string(), "thong".to_string());
    m.alias("thing", "other".to_string()).unwrap();
    m.insert("other".to_string(), "updated".to_string());

    assert_eq!(m.get("thing").map(String::as_str), Some("updated"));
    assert_eq!(m.get("other").map(String::as_str), Some("updated"));
}

// Test: group deletion through an alias.
// Verifies: removing any member returns the shared value and evicts
// every key of the group.
#[test]
fn removal_through_alias_deletes_group() {
    let mut m = AliasMap::new();
    m.insert("thing1".to_string(), "thong1".to_string());
    m.alias("thing1", "thing2".to_string()).unwrap();

    assert_eq!(m.remove("thing2"), Some("thong1".to_string()));
    assert!(!m.contains_key("thing1"));
    assert!(!m.contains_key("thing2"));
    assert!(m.is_empty());
}

// Test: re-aliasing moves one key between groups.
// Verifies: the re-aliased key reads the new slot while its former
// group keeps its value; former group no longer lists the key.
#[test]
fn realias_moves_key_to_new_group() {
    let mut m = AliasMap::new();
    m.insert("thing1".to_string(), "thong".to_string());
    m.alias("thing1", "thing2".to_string()).unwrap();
    m.insert("thing3".to_string(), "other".to_string());
    m.alias("thing3", "thing2".to_string()).unwrap();

    assert_eq!(m.get("thing2").map(String::as_str), Some("other"));
    assert_eq!(m.get("thing1").map(String::as_str), Some("thong"));
    let group1: Vec<&String> = m.group_of("thing1").collect();
    assert_eq!(group1, ["thing1"]);
    let group3: Vec<&String> = m.group_of("thing3").collect();
    assert_eq!(group3, ["thing2", "thing3"]);
}

// Test: single-hop copies survive re-targeting of the source key.
// Verifies: alias(a, b) then re-targeting a leaves b on the original
// slot (target was copied by value, not by reference).
#[test]
fn alias_is_unaffected_by_source_retarget() {
    let mut m = AliasMap::new();
    m.insert("a".to_string(), 1);
    m.alias("a", "b".to_string()).unwrap();
    m.insert("x".to_string(), 2);
    m.alias("x", "a".to_string()).unwrap();

    assert_eq!(m.get("b"), Some(&1));
    assert_eq!(m.get("a"), Some(&2));
}

// Test: aliasing through an alias stays flat.
// Verifies: binding onto a non-canonical key resolves it first, so the
// new key reads the same slot.
#[test]
fn alias_of_alias_resolves() {
    let mut m = AliasMap::new();
    m.insert("thing1".to_string(), "thong".to_string());
    m.alias("thing1", "thing2".to_string()).unwrap();
    m.alias("thing2", "thing3".to_string()).unwrap();

    assert_eq!(m.get("thing3").map(String::as_str), Some("thong"));
    assert_eq!(m.resolve("thing3"), Some(&"thing1".to_string()));
}

// Test: construction from bulk entries with mixed key forms.
// Verifies: sequence entries alias their tail keys; scalar entries stay
// scalar; iteration order of the source is respected.
#[test]
fn construction_from_mixed_entries() {
    let m: AliasMap<String, String> = [
        (
            OneOrMany::from(["one".to_string(), "two".to_string()]),
            "v1".to_string(),
        ),
        (OneOrMany::from("three".to_string()), "v3".to_string()),
    ]
    .into_iter()
    .collect();

    assert_eq!(m.get("one").map(String::as_str), Some("v1"));
    assert_eq!(m.get("two").map(String::as_str), Some("v1"));
    assert_eq!(m.get("three").map(String::as_str), Some("v3"));
    let canonical: Vec<&String> = m.canonical_keys().collect();
    assert_eq!(canonical, ["one", "three"]);
}

// Test: update over existing and fresh keys.
// Verifies: known keys overwrite their shared slot (all aliases see the
// update); unknown keys become fresh canonical entries.
#[test]
fn update_overwrites_shared_and_adds_fresh() {
    let mut m = AliasMap::new();
    m.insert_many(["a", "b"].map(String::from), 1);

    m.update([
        (OneOrMany::from("b".to_string()), 10),
        (OneOrMany::from("c".to_string()), 3),
        (OneOrMany::from(["d".to_string(), "e".to_string()]), 4),
    ]);

    assert_eq!(m.get("a"), Some(&10));
    assert_eq!(m.get("b"), Some(&10));
    assert_eq!(m.get("c"), Some(&3));
    assert_eq!(m.get("d"), Some(&4));
    assert_eq!(m.get("e"), Some(&4));
    assert_eq!(m.len(), 3);
}

// Test: plain (key, value) extension.
// Verifies: Extend over scalar pairs behaves like repeated insert.
#[test]
fn extend_with_scalar_pairs() {
    let mut m: AliasMap<String, i32> = AliasMap::new();
    m.extend([("a".to_string(), 1), ("b".to_string(), 2)]);
    assert_eq!(m.get("a"), Some(&1));
    assert_eq!(m.get("b"), Some(&2));
    assert_eq!(m.len(), 2);
}

// Test: values and grouped items enumeration.
// Verifies: one value per slot in slot order; items pair each slot with
// its member list.
#[test]
fn values_and_items_enumeration() {
    let mut m = AliasMap::new();
    m.insert("thing1".to_string(), "thong1".to_string());
    m.insert("thing2".to_string(), "thong2".to_string());
    m.alias("thing1", "thing3".to_string()).unwrap();
    m.alias("thing2", "thing4".to_string()).unwrap();

    let values: Vec<&String> = m.values().collect();
    assert_eq!(values, ["thong1", "thong2"]);

    let items: Vec<(Vec<&String>, &String)> = m.items().collect();
    assert_eq!(items[0].0, ["thing1", "thing3"]);
    assert_eq!(items[1].0, ["thing2", "thing4"]);
}

// Test: strict lookup and removal failures.
// Verifies: the error names the key that did not resolve; defaulted
// forms stay on the Option path.
#[test]
fn strict_failures_name_the_key() {
    let mut m: AliasMap<String, i32> = AliasMap::new();
    m.insert("here".to_string(), 1);

    let err = m.try_get("missing").unwrap_err();
    assert_eq!(err.key, "missing");
    assert_eq!(err.to_string(), "key \"missing\" not found");

    let err = m.try_remove("missing").unwrap_err();
    assert_eq!(err.key, "missing");

    assert_eq!(m.get("missing").copied().unwrap_or(0), 0);
    assert_eq!(m.remove("missing").unwrap_or(7), 7);
    // The map is untouched by the failures.
    assert_eq!(m.get("here"), Some(&1));
    assert_eq!(m.len(), 1);
}

// Test: alias with an unresolvable existing key.
// Verifies: the call fails up front, names the key, and binds nothing,
// including for the sequence form.
#[test]
fn alias_requires_resolvable_existing_key() {
    let mut m: AliasMap<String, i32> = AliasMap::new();
    let err = m.alias("ghost", "new".to_string()).unwrap_err();
    assert_eq!(err.key, "ghost");
    let err = m
        .alias_many("ghost", ["x", "y"].map(String::from))
        .unwrap_err();
    assert_eq!(err.key, "ghost");
    assert_eq!(m.key_count(), 0);
}

// Test: pop drains every group exactly once.
// Verifies: repeated pop returns each group's full member list and
// value without repeats until the map is empty.
#[test]
fn pop_is_exhaustive_and_nonrepeating() {
    let mut m = AliasMap::new();
    m.insert_many(["a", "b"].map(String::from), 1);
    m.insert("c".to_string(), 2);
    m.insert_many(["d", "e", "f"].map(String::from), 3);

    let mut seen_keys: Vec<String> = Vec::new();
    let mut seen_values: Vec<i32> = Vec::new();
    while let Some((members, value)) = m.pop() {
        for k in &members {
            assert!(!seen_keys.contains(k), "group popped twice: {:?}", k);
        }
        seen_keys.extend(members);
        seen_values.push(value);
    }

    assert!(m.is_empty());
    assert_eq!(m.key_count(), 0);
    seen_keys.sort();
    assert_eq!(seen_keys, ["a", "b", "c", "d", "e", "f"].map(String::from));
    seen_values.sort();
    assert_eq!(seen_values, [1, 2, 3]);
}

// Test: tagged set entry point.
// Verifies: scalar and sequence inputs route to the matching
// assignment; displaced values come back.
#[test]
fn set_accepts_one_or_many() {
    let mut m: AliasMap<String, i32> = AliasMap::new();
    assert_eq!(m.set("a".to_string(), 1), None);
    assert_eq!(m.set(["a".to_string(), "b".to_string()], 2), Some(1));
    assert_eq!(m.get("b"), Some(&2));
    assert_eq!(m.len(), 1);
}

// Test: a combined edit sequence keeps groups consistent.
// Verifies: mixing scalar inserts, sequence inserts, and aliasing of
// already-grouped keys resolves every key to the expected slot.
#[test]
fn combined_edits_stay_consistent() {
    let mut m = AliasMap::new();
    m.insert("thing1".to_string(), "value1".to_string());
    m.insert_many(["thing2", "thing3"].map(String::from), "value23".to_string());
    assert_eq!(m.get("thing1").map(String::as_str), Some("value1"));
    assert_eq!(m.get("thing3").map(String::as_str), Some("value23"));

    m.alias("thing1", "thing2".to_string()).unwrap();
    assert_eq!(m.get("thing1").map(String::as_str), Some("value1"));
    assert_eq!(m.get("thing2").map(String::as_str), Some("value1"));
    assert_eq!(m.get("thing3").map(String::as_str), Some("value23"));
}
