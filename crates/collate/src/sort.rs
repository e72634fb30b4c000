//! Sort engine: key-based or comparator-based reordering.
//!
//! Sorting produces a new ordered view and never mutates the input. The
//! sort is stable, which pagination relies on: equal-key records keep their
//! relative input order across re-derivations.

use std::cmp::Ordering;
use std::fmt;

use crate::value::FieldValue;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortOrder {
    /// Ascending order (smallest first).
    #[default]
    Asc,
    /// Descending order (largest first).
    Desc,
}

impl SortOrder {
    /// Applies this direction to an ordering.
    ///
    /// For `Asc`, returns the ordering unchanged.
    /// For `Desc`, reverses the ordering.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    }

    /// Returns the display name of this direction.
    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }

    /// Human-readable label, suitable for a picker widget.
    pub fn label(self) -> &'static str {
        match self {
            SortOrder::Asc => "Ascending",
            SortOrder::Desc => "Descending",
        }
    }

    /// Compact symbolic rendering.
    pub fn symbol(self) -> &'static str {
        match self {
            SortOrder::Asc => "↑",
            SortOrder::Desc => "↓",
        }
    }

    /// Parses a display name back into a direction.
    pub fn parse(name: &str) -> Option<SortOrder> {
        match name {
            "asc" => Some(SortOrder::Asc),
            "desc" => Some(SortOrder::Desc),
            _ => None,
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A caller-supplied comparator, always authored as if sorting ascending.
pub type CompareFn<T> = Box<dyn Fn(&T, &T) -> Ordering + Send + Sync>;

/// Sort configuration, owned by the caller.
///
/// `key`/`order` select declarative sorting; a custom comparator takes
/// precedence over the key and is reversed when the order is descending.
/// With no order set the configuration is the unsorted state and the input
/// passes through unchanged.
pub struct SortConfig<T> {
    /// Field to sort by. `None` means unsorted.
    pub key: Option<String>,
    /// Direction. `None` means unsorted.
    pub order: Option<SortOrder>,
    sort_fn: Option<CompareFn<T>>,
}

impl<T> SortConfig<T> {
    /// Creates the unsorted configuration.
    pub fn new() -> Self {
        SortConfig {
            key: None,
            order: None,
            sort_fn: None,
        }
    }

    /// Creates a configuration sorting by a field.
    pub fn by(key: impl Into<String>, order: SortOrder) -> Self {
        SortConfig {
            key: Some(key.into()),
            order: Some(order),
            sort_fn: None,
        }
    }

    /// Installs a custom comparator; it takes precedence over the key.
    pub fn set_comparator<F>(&mut self, sort_fn: F)
    where
        F: Fn(&T, &T) -> Ordering + Send + Sync + 'static,
    {
        self.sort_fn = Some(Box::new(sort_fn));
    }

    /// Builder-style [`set_comparator`](SortConfig::set_comparator).
    pub fn with_comparator<F>(mut self, sort_fn: F) -> Self
    where
        F: Fn(&T, &T) -> Ordering + Send + Sync + 'static,
    {
        self.set_comparator(sort_fn);
        self
    }

    /// Removes the custom comparator.
    pub fn clear_comparator(&mut self) {
        self.sort_fn = None;
    }

    /// Resets to the unsorted state, keeping any comparator installed.
    pub fn clear(&mut self) {
        self.key = None;
        self.order = None;
    }

    fn comparator(&self) -> Option<&(dyn Fn(&T, &T) -> Ordering + Send + Sync)> {
        self.sort_fn.as_deref()
    }
}

impl<T> Default for SortConfig<T> {
    fn default() -> Self {
        SortConfig::new()
    }
}

impl<T> fmt::Debug for SortConfig<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SortConfig")
            .field("key", &self.key)
            .field("order", &self.order)
            .field("sort_fn", &self.sort_fn.as_ref().map(|_| ".."))
            .finish()
    }
}

/// Produces a new ordered view of the collection.
///
/// - No order set, or neither key nor comparator set: pass-through in
///   input order.
/// - Custom comparator present: sorts with it, reversed for descending.
/// - Otherwise: sorts by the configured key with
///   [`FieldValue::compare`]; incomparable pairs keep their stable
///   relative order, and unset fields sort last under either direction.
///
/// The sort is stable and the input is never mutated.
///
/// # Example
///
/// ```
/// use collate::{sorted_data, Collatable, SortConfig, SortOrder};
///
/// let data = vec![
///     serde_json::json!({ "id": 2, "name": "Bob" }),
///     serde_json::json!({ "id": 1, "name": "Alice" }),
/// ];
///
/// let config = SortConfig::by("name", SortOrder::Asc);
/// let sorted = sorted_data(&data, &config, <serde_json::Value as Collatable>::accessor);
/// assert_eq!(sorted[0]["name"], "Alice");
/// ```
pub fn sorted_data<'a, T, F>(items: &'a [T], config: &SortConfig<T>, accessor: F) -> Vec<&'a T>
where
    F: Fn(&T, &str) -> FieldValue,
{
    let mut results: Vec<&T> = items.iter().collect();

    let Some(order) = config.order else {
        return results;
    };

    if let Some(compare) = config.comparator() {
        results.sort_by(|a, b| order.apply(compare(a, b)));
        return results;
    }

    let Some(key) = config.key.as_deref() else {
        return results;
    };

    results.sort_by(|a, b| {
        let left = accessor(a, key);
        let right = accessor(b, key);
        // Unset fields stay last regardless of direction
        match (left.is_null(), right.is_null()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            (false, false) => match left.compare(&right) {
                Some(ordering) => order.apply(ordering),
                // Incomparable pair: leave the stable order alone
                None => Ordering::Equal,
            },
        }
    });
    results
}
