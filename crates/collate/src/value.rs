//! Runtime value types for field access and comparison.
//!
//! The [`FieldValue`] enum represents the value of a record field at
//! evaluation time. Records are opaque to the engines; an accessor function
//! (or the [`Collatable`](crate::Collatable) trait) maps a field name to a
//! `FieldValue`, and every condition, search, and ordering decision is made
//! over these values.

use std::cmp::Ordering;

use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

/// Owned runtime value of a record field.
///
/// Field values are JSON-shaped: scalars, lists, and nested maps. A field
/// that is missing, explicitly null, or of an unsupported type maps to
/// [`FieldValue::Null`].
///
/// # Example
///
/// ```
/// use collate::FieldValue;
///
/// struct Joke {
///     setup: String,
///     rating: Option<u8>,
/// }
///
/// fn accessor(joke: &Joke, field: &str) -> FieldValue {
///     match field {
///         "setup" => FieldValue::from(joke.setup.as_str()),
///         "rating" => FieldValue::from(joke.rating),
///         _ => FieldValue::Null,
///     }
/// }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Missing field, explicit null, or unsupported type.
    Null,
    /// Boolean value.
    Bool(bool),
    /// Numeric value.
    Number(Number),
    /// String value.
    Str(String),
    /// List of values.
    List(Vec<FieldValue>),
    /// Nested mapping, in insertion order.
    Map(Vec<(String, FieldValue)>),
}

impl FieldValue {
    /// Returns `true` if this is a `Null` value.
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// Returns `true` if this value is unset as a filter operand:
    /// null, the empty string, or an empty list.
    ///
    /// A filter group whose value is unset is a no-op regardless of its
    /// condition.
    pub fn is_unset(&self) -> bool {
        match self {
            FieldValue::Null => true,
            FieldValue::Str(s) => s.is_empty(),
            FieldValue::List(items) => items.is_empty(),
            _ => false,
        }
    }

    /// Extracts the string value, if present.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Extracts the number value, if present.
    pub fn as_number(&self) -> Option<Number> {
        match self {
            FieldValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Extracts the boolean value, if present.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Extracts the list items, if present.
    pub fn as_list(&self) -> Option<&[FieldValue]> {
        match self {
            FieldValue::List(items) => Some(items),
            _ => None,
        }
    }

    /// Compares two values of the same type.
    ///
    /// Strings compare lexicographically, numbers numerically (mixed
    /// numeric types are handled by [`Number::compare`]), and booleans with
    /// `false < true`. `Null` sorts after every other value so unset fields
    /// land at the end of sorted output. Mismatched types, lists, maps, and
    /// NaN return `None`.
    pub fn compare(&self, other: &FieldValue) -> Option<Ordering> {
        match (self, other) {
            (FieldValue::Str(a), FieldValue::Str(b)) => Some(a.cmp(b)),
            (FieldValue::Number(a), FieldValue::Number(b)) => a.compare(*b),
            (FieldValue::Bool(a), FieldValue::Bool(b)) => Some(a.cmp(b)),

            (FieldValue::Null, FieldValue::Null) => Some(Ordering::Equal),
            (FieldValue::Null, _) => Some(Ordering::Greater),
            (_, FieldValue::Null) => Some(Ordering::Less),

            _ => None,
        }
    }

    /// Returns a stable string rendering for substring search.
    ///
    /// Strings pass through verbatim and `Null` normalizes to the empty
    /// string (a missing field never matches a query). Everything else is
    /// serialized to its JSON text; if serialization fails the result
    /// degrades to the empty string rather than an error.
    pub fn to_query_string(&self) -> String {
        match self {
            FieldValue::Str(s) => s.clone(),
            FieldValue::Null => String::new(),
            other => serde_json::to_string(other).unwrap_or_default(),
        }
    }
}

impl Serialize for FieldValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            FieldValue::Null => serializer.serialize_unit(),
            FieldValue::Bool(b) => serializer.serialize_bool(*b),
            FieldValue::Number(Number::I64(n)) => serializer.serialize_i64(*n),
            FieldValue::Number(Number::U64(n)) => serializer.serialize_u64(*n),
            FieldValue::Number(Number::F64(n)) => serializer.serialize_f64(*n),
            FieldValue::Str(s) => serializer.serialize_str(s),
            FieldValue::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            FieldValue::Map(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (key, value) in entries {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
        }
    }
}

/// Numeric value supporting all common numeric types.
///
/// Numbers are stored in one of three variants to preserve precision:
/// - `I64` for signed integers
/// - `U64` for unsigned integers
/// - `F64` for floating point
///
/// Comparisons between different numeric types are handled by converting
/// to the appropriate common type, and equality is defined through that
/// comparison, so `I64(1) == F64(1.0)`.
#[derive(Debug, Clone, Copy)]
pub enum Number {
    /// Signed 64-bit integer.
    I64(i64),
    /// Unsigned 64-bit integer.
    U64(u64),
    /// 64-bit floating point.
    F64(f64),
}

impl Number {
    /// Converts the number to f64 for comparison.
    pub fn to_f64(self) -> f64 {
        match self {
            Number::I64(n) => n as f64,
            Number::U64(n) => n as f64,
            Number::F64(n) => n,
        }
    }

    /// Compares two numbers, handling mixed types.
    ///
    /// Returns `None` when NaN is involved.
    pub fn compare(self, other: Number) -> Option<Ordering> {
        match (self, other) {
            // Same type comparisons
            (Number::I64(a), Number::I64(b)) => Some(a.cmp(&b)),
            (Number::U64(a), Number::U64(b)) => Some(a.cmp(&b)),
            (Number::F64(a), Number::F64(b)) => a.partial_cmp(&b),

            // Mixed type comparisons - convert to f64
            _ => self.to_f64().partial_cmp(&other.to_f64()),
        }
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        self.compare(*other) == Some(Ordering::Equal)
    }
}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.compare(*other)
    }
}

// Conversions from primitive types

macro_rules! number_from_int {
    ($($ty:ty => $variant:ident as $repr:ty),* $(,)?) => {
        $(
            impl From<$ty> for Number {
                fn from(n: $ty) -> Self {
                    Number::$variant(n as $repr)
                }
            }
        )*
    };
}

number_from_int! {
    i8 => I64 as i64,
    i16 => I64 as i64,
    i32 => I64 as i64,
    i64 => I64 as i64,
    isize => I64 as i64,
    u8 => U64 as u64,
    u16 => U64 as u64,
    u32 => U64 as u64,
    u64 => U64 as u64,
    usize => U64 as u64,
    f32 => F64 as f64,
    f64 => F64 as f64,
}

impl From<Number> for FieldValue {
    fn from(n: Number) -> Self {
        FieldValue::Number(n)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Str(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Str(s)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Bool(b)
    }
}

impl From<Vec<FieldValue>> for FieldValue {
    fn from(items: Vec<FieldValue>) -> Self {
        FieldValue::List(items)
    }
}

impl<V> From<Option<V>> for FieldValue
where
    V: Into<FieldValue>,
{
    fn from(value: Option<V>) -> Self {
        match value {
            Some(v) => v.into(),
            None => FieldValue::Null,
        }
    }
}

macro_rules! field_value_from_number {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for FieldValue {
                fn from(n: $ty) -> Self {
                    FieldValue::Number(Number::from(n))
                }
            }
        )*
    };
}

field_value_from_number!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

impl From<&serde_json::Value> for FieldValue {
    fn from(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => FieldValue::Null,
            serde_json::Value::Bool(b) => FieldValue::Bool(*b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    FieldValue::Number(Number::I64(i))
                } else if let Some(u) = n.as_u64() {
                    FieldValue::Number(Number::U64(u))
                } else {
                    FieldValue::Number(Number::F64(n.as_f64().unwrap_or(f64::NAN)))
                }
            }
            serde_json::Value::String(s) => FieldValue::Str(s.clone()),
            serde_json::Value::Array(items) => {
                FieldValue::List(items.iter().map(FieldValue::from).collect())
            }
            serde_json::Value::Object(entries) => FieldValue::Map(
                entries
                    .iter()
                    .map(|(k, v)| (k.clone(), FieldValue::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<serde_json::Value> for FieldValue {
    fn from(value: serde_json::Value) -> Self {
        FieldValue::from(&value)
    }
}
