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

//! Dynamically-typed payload values.

use std::collections::BTreeMap;
use std::collections::HashMap;
use std::fmt;

use serde::Serialize;
use serde::ser::SerializeMap;
use serde::ser::SerializeSeq;

/// A mapping from string keys to payload values.
///
/// Keys iterate in lexicographic order, which keeps flattening and rendering deterministic.
pub type Map = BTreeMap<String, Value>;

/// A payload value: either a scalar leaf, or a nested map or sequence.
///
/// The [`fmt::Display`] implementation is the canonical string coercion used by the key-value
/// layout:
///
/// ```
/// use flatlog::Value;
///
/// assert_eq!(Value::Absent.to_string(), "");
/// assert_eq!(Value::from(-42).to_string(), "-42");
/// assert_eq!(Value::from(0.5).to_string(), "0.5");
/// assert_eq!(Value::from(true).to_string(), "true");
/// assert_eq!(Value::from(vec![1, 2]).to_string(), "-");
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// No value.
    #[default]
    Absent,
    /// A string, rendered verbatim.
    String(String),
    /// A signed integer.
    Int(i64),
    /// An unsigned integer.
    Uint(u64),
    /// A double precision float.
    Float(f64),
    /// A single precision float, kept apart so it renders with its own shortest form.
    Float32(f32),
    /// A boolean.
    Bool(bool),
    /// The message of an error.
    Message(String),
    /// A nested map.
    Map(Map),
    /// A nested sequence.
    Seq(Vec<Value>),
    /// A value of a type the layouts cannot render; carries the type name for diagnostics.
    Unsupported(&'static str),
}

impl Value {
    /// Create a value carrying the message of an error.
    pub fn error(err: &(dyn std::error::Error + '_)) -> Self {
        Value::Message(err.to_string())
    }

    /// Create an unsupported value standing in for an instance of `T`.
    pub fn unsupported<T: ?Sized>() -> Self {
        Value::Unsupported(std::any::type_name::<T>())
    }

    /// Parse a string produced by the `Display` coercion back into a scalar.
    ///
    /// Booleans and integers round-trip exactly. Anything that is not a boolean or a number
    /// becomes a [`Value::String`].
    ///
    /// ```
    /// use flatlog::Value;
    ///
    /// assert_eq!(Value::coerce("true"), Value::Bool(true));
    /// assert_eq!(Value::coerce("-7"), Value::Int(-7));
    /// assert_eq!(Value::coerce("18446744073709551615"), Value::Uint(u64::MAX));
    /// assert_eq!(Value::coerce("2.5"), Value::Float(2.5));
    /// assert_eq!(Value::coerce("hello"), Value::String("hello".to_string()));
    /// ```
    pub fn coerce(s: &str) -> Self {
        match s {
            "true" => return Value::Bool(true),
            "false" => return Value::Bool(false),
            _ => {}
        }

        if let Ok(i) = s.parse::<i64>() {
            return Value::Int(i);
        }
        if let Ok(u) = s.parse::<u64>() {
            return Value::Uint(u);
        }
        // only plain decimals; "inf" and "nan" stay strings
        if s.bytes().any(|b| b.is_ascii_digit()) {
            if let Ok(f) = s.parse::<f64>() {
                return Value::Float(f);
            }
        }

        Value::String(s.to_string())
    }

    /// Whether this value is a leaf the key-value layout can render.
    pub fn is_scalar(&self) -> bool {
        match self {
            Value::Absent
            | Value::String(_)
            | Value::Int(_)
            | Value::Uint(_)
            | Value::Float(_)
            | Value::Float32(_)
            | Value::Bool(_)
            | Value::Message(_) => true,
            Value::Map(_) | Value::Seq(_) | Value::Unsupported(_) => false,
        }
    }

    /// Whether this value is absent, an empty map or an empty sequence.
    pub fn is_empty(&self) -> bool {
        match self {
            Value::Absent => true,
            Value::Map(map) => map.is_empty(),
            Value::Seq(seq) => seq.is_empty(),
            _ => false,
        }
    }

    /// A short name of the variant, used in diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Absent => "absent",
            Value::String(_) => "string",
            Value::Int(_) => "int",
            Value::Uint(_) => "uint",
            Value::Float(_) => "float",
            Value::Float32(_) => "float32",
            Value::Bool(_) => "bool",
            Value::Message(_) => "message",
            Value::Map(_) => "map",
            Value::Seq(_) => "seq",
            Value::Unsupported(name) => name,
        }
    }
}

fn write_float(f: &mut fmt::Formatter<'_>, v: f64, shortest: impl fmt::Display) -> fmt::Result {
    if v.is_nan() {
        f.write_str("NaN")
    } else if v.is_infinite() {
        f.write_str(if v > 0.0 { "+Inf" } else { "-Inf" })
    } else {
        write!(f, "{shortest}")
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Absent => Ok(()),
            Value::String(s) => f.write_str(s),
            Value::Int(i) => write!(f, "{i}"),
            Value::Uint(u) => write!(f, "{u}"),
            Value::Float(v) => write_float(f, *v, v),
            Value::Float32(v) => write_float(f, f64::from(*v), v),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Message(m) => f.write_str(m),
            Value::Map(_) | Value::Seq(_) | Value::Unsupported(_) => f.write_str("-"),
        }
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            Value::Absent | Value::Unsupported(_) => serializer.serialize_unit(),
            Value::String(s) | Value::Message(s) => serializer.serialize_str(s),
            Value::Int(i) => serializer.serialize_i64(*i),
            Value::Uint(u) => serializer.serialize_u64(*u),
            Value::Float(v) => serializer.serialize_f64(*v),
            Value::Float32(v) => serializer.serialize_f32(*v),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Map(map) => {
                let mut ser = serializer.serialize_map(Some(map.len()))?;
                for (k, v) in map {
                    ser.serialize_entry(k, v)?;
                }
                ser.end()
            }
            Value::Seq(seq) => {
                let mut ser = serializer.serialize_seq(Some(seq.len()))?;
                for v in seq {
                    ser.serialize_element(v)?;
                }
                ser.end()
            }
        }
    }
}

macro_rules! impl_from_int {
    ($variant:ident: $target:ty => $($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Value::$variant(v as $target)
                }
            }
        )*
    };
}

impl_from_int!(Int: i64 => i8, i16, i32, i64, isize);
impl_from_int!(Uint: u64 => u8, u16, u32, u64, usize);

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float32(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::Absent
    }
}

impl From<Map> for Value {
    fn from(v: Map) -> Self {
        Value::Map(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Absent, Into::into)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Value::Seq(v.into_iter().map(Into::into).collect())
    }
}

impl<K: Into<String>, V: Into<Value>, S> From<HashMap<K, V, S>> for Value {
    fn from(v: HashMap<K, V, S>) -> Self {
        v.into_iter().collect()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Value {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Value::Map(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Value::Absent,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Int(i)
                } else if let Some(u) = n.as_u64() {
                    Value::Uint(u)
                } else {
                    n.as_f64().map_or(Value::Unsupported("number"), Value::Float)
                }
            }
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(seq) => seq.into(),
            serde_json::Value::Object(map) => map.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::Rng;

    use super::*;

    #[test]
    fn test_coerce_scalars_to_string() {
        let cases = vec![
            (Value::Absent, ""),
            (Value::from("say \"hi\""), "say \"hi\""),
            (Value::from(0), "0"),
            (Value::from(-1234_i64), "-1234"),
            (Value::from(u64::MAX), "18446744073709551615"),
            (Value::from(i8::MIN), "-128"),
            (Value::from(true), "true"),
            (Value::from(false), "false"),
            (Value::from(1.0), "1"),
            (Value::from(0.1), "0.1"),
            (Value::from(1e21), "1000000000000000000000"),
            (Value::from(0.1_f32), "0.1"),
            (Value::from(f64::NAN), "NaN"),
            (Value::from(f64::NEG_INFINITY), "-Inf"),
            (Value::Message("disk full".to_string()), "disk full"),
            (Value::unsupported::<std::time::Instant>(), "-"),
            (Value::from(vec![1, 2, 3]), "-"),
        ];

        for (value, expected) in cases {
            assert_eq!(value.to_string(), expected, "{value:?}");
        }
    }

    #[test]
    fn test_error_value_carries_message() {
        let err = std::io::Error::other("connection reset");
        assert_eq!(Value::error(&err).to_string(), "connection reset");
    }

    #[test]
    fn test_coerce_round_trips_integers_and_booleans() {
        let mut rng = rand::rng();
        for _ in 0..1000 {
            let values = [
                Value::from(rng.random::<i64>()),
                Value::from(rng.random::<u64>()),
                Value::from(rng.random::<i32>()),
                Value::from(rng.random::<bool>()),
            ];
            for v in values {
                let s = v.to_string();
                assert_eq!(Value::coerce(&s).to_string(), s);
            }
        }
    }

    #[test]
    fn test_coerce_keeps_non_numbers_as_strings() {
        assert_eq!(Value::coerce("inf"), Value::String("inf".to_string()));
        assert_eq!(Value::coerce("NaN"), Value::String("NaN".to_string()));
        assert_eq!(Value::coerce(""), Value::String(String::new()));
    }

    #[test]
    fn test_from_json() {
        let json = serde_json::json!({"a": [1, -2, 2.5, null], "b": {"c": true}});
        let value = Value::from(json);
        let expected: Value = [
            (
                "a",
                Value::Seq(vec![
                    Value::Int(1),
                    Value::Int(-2),
                    Value::Float(2.5),
                    Value::Absent,
                ]),
            ),
            ("b", [("c", true)].into_iter().collect()),
        ]
        .into_iter()
        .collect();
        assert_eq!(value, expected);
    }
}
