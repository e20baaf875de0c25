// Copyright 2024 FastLabs Developers
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Flatten nested payloads into a single-level map.

use std::collections::BTreeMap;

use crate::Error;
use crate::ErrorKind;
use crate::Value;

/// A single-level map from synthesized keys to scalar values.
pub type FlatMap = BTreeMap<String, Value>;

/// Flatten a nested map or sequence into a [`FlatMap`].
///
/// Top-level keys are appended to `prefix` directly; keys of nested levels are joined with `_`.
/// Sequence elements use their zero-based index as key. When two paths synthesize the same key,
/// the one visited last wins. Maps are visited in key order, sequences in index order.
///
/// An absent root flattens to an empty map.
///
/// # Errors
///
/// Return an [`ErrorKind::InvalidInput`] error if `root` is a scalar.
///
/// # Examples
///
/// ```
/// use flatlog::Value;
/// use flatlog::flatten::flatten;
///
/// let payload: Value = [("a", Value::from(1)), ("b", [("c", 2)].into_iter().collect())]
///     .into_iter()
///     .collect();
///
/// let flat = flatten(&payload, "p").unwrap();
/// assert_eq!(flat["pa"], Value::Int(1));
/// assert_eq!(flat["pb_c"], Value::Int(2));
/// ```
pub fn flatten(root: &Value, prefix: &str) -> Result<FlatMap, Error> {
    let mut flat = FlatMap::new();
    if !matches!(root, Value::Absent) {
        flatten_into(true, &mut flat, root, prefix)?;
    }
    Ok(flat)
}

fn flatten_into(first: bool, flat: &mut FlatMap, nested: &Value, prefix: &str) -> Result<(), Error> {
    match nested {
        Value::Map(map) => {
            for (k, v) in map {
                assign(flat, synthesize_key(first, prefix, k), v)?;
            }
        }
        Value::Seq(seq) => {
            for (i, v) in seq.iter().enumerate() {
                assign(flat, synthesize_key(first, prefix, &i.to_string()), v)?;
            }
        }
        other => {
            return Err(
                Error::new(ErrorKind::InvalidInput, "invalid input: must be map or sequence")
                    .with_context("prefix", prefix)
                    .with_context("type", other.type_name()),
            );
        }
    }

    Ok(())
}

fn assign(flat: &mut FlatMap, key: String, value: &Value) -> Result<(), Error> {
    match value {
        Value::Map(_) | Value::Seq(_) => flatten_into(false, flat, value, &key),
        _ => {
            flat.insert(key, value.clone());
            Ok(())
        }
    }
}

fn synthesize_key(first: bool, prefix: &str, subkey: &str) -> String {
    if first {
        format!("{prefix}{subkey}")
    } else {
        format!("{prefix}_{subkey}")
    }
}

#[cfg(test)]
mod tests {
    use rand::Rng;

    use super::*;
    use crate::value::Map;

    fn map<const N: usize>(entries: [(&str, Value); N]) -> Value {
        entries.into_iter().collect()
    }

    #[test]
    fn test_flatten_top_level_has_no_separator() {
        assert!(flatten(&map([]), "p").unwrap().is_empty());

        let flat = flatten(&map([("a", 1.into())]), "p").unwrap();
        assert_eq!(flat, FlatMap::from([("pa".to_string(), Value::Int(1))]));

        let flat = flatten(&map([("a", map([("b", 2.into())]))]), "p").unwrap();
        assert_eq!(flat, FlatMap::from([("pa_b".to_string(), Value::Int(2))]));
    }

    #[test]
    fn test_flatten_sequence_uses_indices() {
        let flat = flatten(&Value::from(vec![10, 20]), "x").unwrap();
        assert_eq!(
            flat,
            FlatMap::from([
                ("x0".to_string(), Value::Int(10)),
                ("x1".to_string(), Value::Int(20)),
            ])
        );
    }

    #[test]
    fn test_flatten_mixed_nesting() {
        let payload = map([
            ("user", map([("id", 7.into()), ("roles", vec!["admin", "ops"].into())])),
            ("ok", true.into()),
            ("note", Value::Absent),
        ]);

        let flat = flatten(&payload, "event_").unwrap();
        assert_eq!(
            flat,
            FlatMap::from([
                ("event_note".to_string(), Value::Absent),
                ("event_ok".to_string(), Value::Bool(true)),
                ("event_user_id".to_string(), Value::Int(7)),
                ("event_user_roles_0".to_string(), Value::from("admin")),
                ("event_user_roles_1".to_string(), Value::from("ops")),
            ])
        );
    }

    #[test]
    fn test_flatten_rejects_scalar_root() {
        let err = flatten(&Value::from("not a map or list"), "p").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn test_flatten_absent_root_is_empty() {
        assert!(flatten(&Value::Absent, "p").unwrap().is_empty());
    }

    #[test]
    fn test_flatten_empty_nested_containers_vanish() {
        let payload = map([("a", Value::Map(Map::new())), ("b", Value::Seq(vec![]))]);
        assert!(flatten(&payload, "").unwrap().is_empty());
    }

    #[test]
    fn test_flatten_collision_last_write_wins() {
        // "a" is visited before "a_b", so the direct "a_b" entry overwrites the nested one.
        let payload = map([("a", map([("b", 1.into())])), ("a_b", 2.into())]);
        let flat = flatten(&payload, "").unwrap();
        assert_eq!(flat, FlatMap::from([("a_b".to_string(), Value::Int(2))]));
    }

    #[test]
    fn test_flatten_key_count_matches_leaf_count() {
        let mut rng = rand::rng();
        for _ in 0..200 {
            let payload = random_tree(&mut rng, 0);
            let leaves = count_leaves(&payload);
            let flat = flatten(&payload, "r").unwrap();
            // keys are indices or single letters joined by "_", so no collisions occur
            assert_eq!(flat.len(), leaves);
            assert!(flat.values().all(Value::is_scalar));
        }
    }

    fn random_tree(rng: &mut impl Rng, depth: usize) -> Value {
        let len = rng.random_range(0..4);
        let mut children = Vec::with_capacity(len);
        for _ in 0..len {
            if depth < 3 && rng.random_bool(0.4) {
                children.push(random_tree(rng, depth + 1));
            } else {
                children.push(Value::from(rng.random::<i32>()));
            }
        }
        if rng.random_bool(0.5) {
            Value::Seq(children)
        } else {
            children
                .into_iter()
                .enumerate()
                .map(|(i, v)| (char::from(b'a' + i as u8).to_string(), v))
                .collect()
        }
    }

    fn count_leaves(value: &Value) -> usize {
        match value {
            Value::Map(map) => map.values().map(count_leaves).sum(),
            Value::Seq(seq) => seq.iter().map(count_leaves).sum(),
            _ => 1,
        }
    }
}
