//! Record access for typed collections.
//!
//! The engines never see a concrete record type: they look fields up through
//! an accessor function `Fn(&T, &str) -> FieldValue`. The [`Collatable`]
//! trait packages that accessor for types that want to declare their
//! queryable fields once.

use crate::value::FieldValue;

/// Trait for record types whose fields can be shaped by the engines.
///
/// # Example
///
/// ```
/// use collate::{Collatable, FieldValue};
///
/// struct Joke {
///     setup: String,
///     rating: Option<u8>,
/// }
///
/// impl Collatable for Joke {
///     fn field_value(&self, field: &str) -> FieldValue {
///         match field {
///             "setup" => FieldValue::from(self.setup.as_str()),
///             "rating" => FieldValue::from(self.rating),
///             _ => FieldValue::Null,
///         }
///     }
/// }
///
/// let joke = Joke { setup: "Knock knock".into(), rating: Some(4) };
/// assert_eq!(Joke::accessor(&joke, "rating"), FieldValue::from(4u8));
/// ```
pub trait Collatable {
    /// Returns the value of a field for engine evaluation.
    ///
    /// Unknown fields must return [`FieldValue::Null`].
    fn field_value(&self, field: &str) -> FieldValue;

    /// Returns a static accessor function suitable for passing to the
    /// engines, e.g. `engine.filtered_data(&items, &config, Joke::accessor)`.
    fn accessor(item: &Self, field: &str) -> FieldValue
    where
        Self: Sized,
    {
        item.field_value(field)
    }
}

/// JSON objects are records out of the box: fields are looked up by key and
/// anything that is not an object yields `Null` for every field.
impl Collatable for serde_json::Value {
    fn field_value(&self, field: &str) -> FieldValue {
        match self.get(field) {
            Some(value) => FieldValue::from(value),
            None => FieldValue::Null,
        }
    }
}
