//! Filter conditions and the condition registry.
//!
//! A condition is a named binary predicate over `(field_value, filter_value)`.
//! The [`ConditionRegistry`] maps condition names to predicates; the standard
//! registry carries the twelve built-in conditions, and callers may register
//! their own or start from an empty registry in tests.

use std::collections::HashMap;
use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::value::FieldValue;

/// The built-in filter conditions.
///
/// Conditions are identified by name in filter configurations so a registry
/// can also carry caller-defined conditions; this enum covers the standard
/// set and its UI metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Condition {
    /// Deep structural equality.
    Eq,
    /// Negation of `Eq`.
    Ne,
    /// Less than.
    Lt,
    /// Less than or equal.
    Lte,
    /// Greater than.
    Gt,
    /// Greater than or equal.
    Gte,
    /// List membership or substring containment.
    In,
    /// Negation of `In` for lists and strings; false for anything else.
    Nin,
    /// Inclusive range check against a `[low, high]` pair.
    Between,
    /// Regular expression match over string fields.
    Regex,
    /// Null or empty string.
    Empty,
    /// Negation of `Empty`.
    NotEmpty,
}

impl Condition {
    /// Every built-in condition, in registry order.
    pub const ALL: [Condition; 12] = [
        Condition::Eq,
        Condition::Ne,
        Condition::Lt,
        Condition::Lte,
        Condition::Gt,
        Condition::Gte,
        Condition::In,
        Condition::Nin,
        Condition::Between,
        Condition::Regex,
        Condition::Empty,
        Condition::NotEmpty,
    ];

    /// Returns the registry name of this condition.
    pub fn as_str(self) -> &'static str {
        match self {
            Condition::Eq => "eq",
            Condition::Ne => "ne",
            Condition::Lt => "lt",
            Condition::Lte => "lte",
            Condition::Gt => "gt",
            Condition::Gte => "gte",
            Condition::In => "in",
            Condition::Nin => "nin",
            Condition::Between => "between",
            Condition::Regex => "regex",
            Condition::Empty => "empty",
            Condition::NotEmpty => "notEmpty",
        }
    }

    /// Parses a registry name back into a built-in condition.
    pub fn parse(name: &str) -> Option<Condition> {
        Condition::ALL.into_iter().find(|c| c.as_str() == name)
    }

    /// Human-readable label, suitable for a picker widget.
    pub fn label(self) -> &'static str {
        match self {
            Condition::Eq => "Equals",
            Condition::Ne => "Not equals",
            Condition::Lt => "Less than",
            Condition::Lte => "Less than or equal",
            Condition::Gt => "Greater than",
            Condition::Gte => "Greater than or equal",
            Condition::In => "Includes",
            Condition::Nin => "Does not include",
            Condition::Between => "Between",
            Condition::Regex => "Regex",
            Condition::Empty => "Empty",
            Condition::NotEmpty => "Not empty",
        }
    }

    /// Descriptive phrase, suitable for tooltips.
    pub fn description(self) -> &'static str {
        match self {
            Condition::Eq => "is equal to",
            Condition::Ne => "is not equal to",
            Condition::Lt => "is less than",
            Condition::Lte => "is less than or equal to",
            Condition::Gt => "is greater than",
            Condition::Gte => "is greater than or equal to",
            Condition::In => "is one of",
            Condition::Nin => "is not one of",
            Condition::Between => "is between",
            Condition::Regex => "matches regex",
            Condition::Empty => "is empty",
            Condition::NotEmpty => "is not empty",
        }
    }

    /// Compact symbolic rendering.
    pub fn symbol(self) -> &'static str {
        match self {
            Condition::Eq => "=",
            Condition::Ne => "≠",
            Condition::Lt => "<",
            Condition::Lte => "≤",
            Condition::Gt => ">",
            Condition::Gte => "≥",
            Condition::In => "includes",
            Condition::Nin => "!includes",
            Condition::Between => "-",
            Condition::Regex => "∼",
            Condition::Empty => "∅",
            Condition::NotEmpty => "≠ ∅",
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<Condition> for String {
    fn from(condition: Condition) -> Self {
        condition.as_str().to_string()
    }
}

/// A condition predicate: `(field_value, filter_value) -> bool`.
pub type ConditionFn = Box<dyn Fn(&FieldValue, &FieldValue) -> bool + Send + Sync>;

/// Name-keyed mapping from condition to predicate.
///
/// The registry is injected into the
/// [`FilterEngine`](crate::FilterEngine) rather than referenced as ambient
/// state, so tests can substitute or extend conditions. A lookup miss at
/// evaluation time is a fatal configuration error, never a silent skip.
///
/// # Example
///
/// ```
/// use collate::{ConditionRegistry, FieldValue};
///
/// let mut registry = ConditionRegistry::standard();
/// registry.register("divisibleBy", |field, filter| {
///     match (field.as_number(), filter.as_number()) {
///         (Some(f), Some(d)) if d.to_f64() != 0.0 => f.to_f64() % d.to_f64() == 0.0,
///         _ => false,
///     }
/// });
///
/// assert!(registry.contains("divisibleBy"));
/// assert!(registry.contains("eq"));
/// ```
pub struct ConditionRegistry {
    conditions: HashMap<String, ConditionFn>,
}

impl ConditionRegistry {
    /// Creates a registry with no conditions.
    pub fn empty() -> Self {
        ConditionRegistry {
            conditions: HashMap::new(),
        }
    }

    /// Creates the standard registry with all built-in conditions.
    pub fn standard() -> Self {
        let mut registry = ConditionRegistry::empty();
        registry.register(Condition::Eq, eq);
        registry.register(Condition::Ne, |a, b| !eq(a, b));
        registry.register(Condition::Lt, lt);
        registry.register(Condition::Lte, lte);
        registry.register(Condition::Gt, gt);
        registry.register(Condition::Gte, gte);
        registry.register(Condition::In, is_in);
        registry.register(Condition::Nin, nin);
        registry.register(Condition::Between, between);
        registry.register(Condition::Regex, regex_match);
        registry.register(Condition::Empty, |a, _| is_empty(a));
        registry.register(Condition::NotEmpty, |a, _| !is_empty(a));
        registry
    }

    /// Returns the process-wide standard registry, constructed once.
    pub fn global() -> &'static ConditionRegistry {
        static STANDARD: Lazy<ConditionRegistry> = Lazy::new(ConditionRegistry::standard);
        &STANDARD
    }

    /// Registers a condition under the given name, replacing any existing
    /// predicate with that name.
    pub fn register<F>(&mut self, name: impl Into<String>, predicate: F)
    where
        F: Fn(&FieldValue, &FieldValue) -> bool + Send + Sync + 'static,
    {
        self.conditions.insert(name.into(), Box::new(predicate));
    }

    /// Looks up a condition predicate by name.
    pub fn get(&self, name: &str) -> Option<&ConditionFn> {
        self.conditions.get(name)
    }

    /// Returns `true` if a condition with this name is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.conditions.contains_key(name)
    }

    /// Returns the registered condition names, unordered.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.conditions.keys().map(String::as_str)
    }
}

impl Default for ConditionRegistry {
    fn default() -> Self {
        ConditionRegistry::standard()
    }
}

impl fmt::Debug for ConditionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.names().collect();
        names.sort_unstable();
        f.debug_struct("ConditionRegistry")
            .field("conditions", &names)
            .finish()
    }
}

// ============================================================================
// Built-in predicates
// ============================================================================

fn eq(field: &FieldValue, filter: &FieldValue) -> bool {
    field == filter
}

/// Ordering comparison that refuses null operands: a missing field never
/// satisfies a relational condition, even though `Null` participates in
/// sort ordering.
fn ordered(field: &FieldValue, filter: &FieldValue) -> Option<std::cmp::Ordering> {
    if field.is_null() || filter.is_null() {
        return None;
    }
    field.compare(filter)
}

fn lt(field: &FieldValue, filter: &FieldValue) -> bool {
    ordered(field, filter) == Some(std::cmp::Ordering::Less)
}

fn lte(field: &FieldValue, filter: &FieldValue) -> bool {
    matches!(
        ordered(field, filter),
        Some(std::cmp::Ordering::Less | std::cmp::Ordering::Equal)
    )
}

fn gt(field: &FieldValue, filter: &FieldValue) -> bool {
    ordered(field, filter) == Some(std::cmp::Ordering::Greater)
}

fn gte(field: &FieldValue, filter: &FieldValue) -> bool {
    matches!(
        ordered(field, filter),
        Some(std::cmp::Ordering::Greater | std::cmp::Ordering::Equal)
    )
}

fn is_in(field: &FieldValue, filter: &FieldValue) -> bool {
    match field {
        FieldValue::List(items) => items.iter().any(|item| item == filter),
        FieldValue::Str(s) => filter
            .as_str()
            .map(|needle| s.contains(needle))
            .unwrap_or(false),
        _ => false,
    }
}

fn nin(field: &FieldValue, filter: &FieldValue) -> bool {
    // Deliberately false (not true) for non-list, non-string fields: a
    // field that supports no membership test fails both `in` and `nin`.
    match field {
        FieldValue::List(_) | FieldValue::Str(_) => !is_in(field, filter),
        _ => false,
    }
}

fn between(field: &FieldValue, filter: &FieldValue) -> bool {
    let Some([low, high]) = filter.as_list().and_then(|r| <&[_; 2]>::try_from(r).ok()) else {
        return false;
    };
    // An inverted range ([high, low]) is always false by construction.
    gte(field, low) && lte(field, high)
}

fn regex_match(field: &FieldValue, filter: &FieldValue) -> bool {
    let (Some(text), Some(pattern)) = (field.as_str(), filter.as_str()) else {
        return false;
    };
    match Regex::new(pattern) {
        Ok(re) => re.is_match(text),
        Err(_) => false, // Invalid pattern
    }
}

fn is_empty(field: &FieldValue) -> bool {
    match field {
        FieldValue::Null => true,
        FieldValue::Str(s) => s.is_empty(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn standard() -> ConditionRegistry {
        ConditionRegistry::standard()
    }

    fn check(registry: &ConditionRegistry, name: &str, a: FieldValue, b: FieldValue) -> bool {
        registry.get(name).expect("condition registered")(&a, &b)
    }

    #[test]
    fn standard_registry_is_complete() {
        let registry = standard();
        for condition in Condition::ALL {
            assert!(
                registry.contains(condition.as_str()),
                "missing {condition}"
            );
        }
        assert!(!registry.contains("bogus"));
    }

    #[test]
    fn global_registry_is_standard() {
        assert!(ConditionRegistry::global().contains("between"));
        assert!(!ConditionRegistry::global().contains("bogus"));
    }

    #[test]
    fn names_roundtrip() {
        assert_eq!(Condition::parse("eq"), Some(Condition::Eq));
        assert_eq!(Condition::parse("notEmpty"), Some(Condition::NotEmpty));
        assert_eq!(Condition::parse("bogus"), None);
        assert_eq!(Condition::Gte.to_string(), "gte");
    }

    #[test]
    fn metadata() {
        assert_eq!(Condition::Eq.label(), "Equals");
        assert_eq!(Condition::Nin.description(), "is not one of");
        assert_eq!(Condition::Lte.symbol(), "≤");
    }

    #[test]
    fn eq_is_deep() {
        let registry = standard();
        assert!(check(
            &registry,
            "eq",
            FieldValue::List(vec![FieldValue::from(1i64)]),
            FieldValue::List(vec![FieldValue::from(1.0f64)]),
        ));
        assert!(!check(
            &registry,
            "eq",
            FieldValue::from("1"),
            FieldValue::from(1i64),
        ));
        assert!(check(&registry, "ne", FieldValue::from("a"), FieldValue::from("b")));
    }

    #[test]
    fn ordering_conditions() {
        let registry = standard();
        assert!(check(&registry, "lt", FieldValue::from(1i64), FieldValue::from(2i64)));
        assert!(check(&registry, "lte", FieldValue::from(2i64), FieldValue::from(2i64)));
        assert!(check(&registry, "gt", FieldValue::from(3i64), FieldValue::from(2i64)));
        assert!(check(&registry, "gte", FieldValue::from(2i64), FieldValue::from(2i64)));

        // Lexicographic for strings
        assert!(check(&registry, "lt", FieldValue::from("a"), FieldValue::from("b")));

        // Null and mismatched types never satisfy relational conditions
        assert!(!check(&registry, "lt", FieldValue::Null, FieldValue::from(2i64)));
        assert!(!check(&registry, "gt", FieldValue::Null, FieldValue::from(2i64)));
        assert!(!check(&registry, "lt", FieldValue::from("1"), FieldValue::from(2i64)));
    }

    #[test]
    fn in_over_lists_and_strings() {
        let registry = standard();
        let tags = FieldValue::List(vec![FieldValue::from("a"), FieldValue::from("b")]);
        assert!(check(&registry, "in", tags.clone(), FieldValue::from("a")));
        assert!(!check(&registry, "in", tags, FieldValue::from("c")));

        assert!(check(&registry, "in", FieldValue::from("hello"), FieldValue::from("ell")));
        assert!(!check(&registry, "in", FieldValue::from("hello"), FieldValue::from("xyz")));

        // Not a list or string: false
        assert!(!check(&registry, "in", FieldValue::from(5i64), FieldValue::from(5i64)));
    }

    #[test]
    fn nin_asymmetry() {
        let registry = standard();
        let tags = FieldValue::List(vec![FieldValue::from("a")]);
        assert!(check(&registry, "nin", tags.clone(), FieldValue::from("b")));
        assert!(!check(&registry, "nin", tags, FieldValue::from("a")));

        // A numeric field fails both `in` and `nin`
        assert!(!check(&registry, "in", FieldValue::from(5i64), FieldValue::from(5i64)));
        assert!(!check(&registry, "nin", FieldValue::from(5i64), FieldValue::from(5i64)));
    }

    #[test]
    fn between_inclusive() {
        let registry = standard();
        let range = FieldValue::List(vec![FieldValue::from(1i64), FieldValue::from(5i64)]);
        assert!(check(&registry, "between", FieldValue::from(1i64), range.clone()));
        assert!(check(&registry, "between", FieldValue::from(3i64), range.clone()));
        assert!(check(&registry, "between", FieldValue::from(5i64), range.clone()));
        assert!(!check(&registry, "between", FieldValue::from(6i64), range));
    }

    #[test]
    fn between_inverted_range_is_always_false() {
        let registry = standard();
        let inverted = FieldValue::List(vec![FieldValue::from(5i64), FieldValue::from(1i64)]);
        for n in 0i64..7 {
            assert!(!check(&registry, "between", FieldValue::from(n), inverted.clone()));
        }
    }

    #[test]
    fn between_malformed_range() {
        let registry = standard();
        assert!(!check(
            &registry,
            "between",
            FieldValue::from(3i64),
            FieldValue::List(vec![FieldValue::from(1i64)]),
        ));
        assert!(!check(&registry, "between", FieldValue::from(3i64), FieldValue::from(1i64)));
    }

    #[test]
    fn regex_matching() {
        let registry = standard();
        assert!(check(
            &registry,
            "regex",
            FieldValue::from("hello123"),
            FieldValue::from(r"^hello\d+$"),
        ));
        assert!(!check(
            &registry,
            "regex",
            FieldValue::from("hello"),
            FieldValue::from(r"^hello\d+$"),
        ));
    }

    #[test]
    fn regex_never_errors() {
        let registry = standard();
        // Invalid pattern: false, not an error
        assert!(!check(
            &registry,
            "regex",
            FieldValue::from("hello"),
            FieldValue::from("("),
        ));
        // Non-string field: false
        assert!(!check(
            &registry,
            "regex",
            FieldValue::from(42i64),
            FieldValue::from(r"\d+"),
        ));
    }

    #[test]
    fn empty_and_not_empty() {
        let registry = standard();
        assert!(check(&registry, "empty", FieldValue::Null, FieldValue::Null));
        assert!(check(&registry, "empty", FieldValue::from(""), FieldValue::Null));
        assert!(!check(&registry, "empty", FieldValue::from("x"), FieldValue::Null));
        assert!(!check(&registry, "empty", FieldValue::from(0i64), FieldValue::Null));

        assert!(check(&registry, "notEmpty", FieldValue::from("x"), FieldValue::Null));
        assert!(!check(&registry, "notEmpty", FieldValue::Null, FieldValue::Null));
    }

    #[test]
    fn custom_condition_registration() {
        let mut registry = ConditionRegistry::empty();
        assert!(!registry.contains("eq"));

        registry.register("always", |_, _| true);
        assert!(check(&registry, "always", FieldValue::Null, FieldValue::Null));

        // Replacement is allowed
        registry.register("always", |_, _| false);
        assert!(!check(&registry, "always", FieldValue::Null, FieldValue::Null));
    }
}
