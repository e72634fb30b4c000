//! Filter engine: per-field condition groups combined with logical AND.
//!
//! A [`FilterConfig`] maps field names to [`FilterGroup`]s. Each group is
//! either declarative (a condition name plus an operand, resolved through a
//! [`ConditionRegistry`]) or a caller-supplied predicate. The
//! [`FilterEngine`] reduces a collection to the records for which every
//! configured group passes.

use std::fmt;

use crate::condition::ConditionRegistry;
use crate::error::{CollateError, Result};
use crate::value::FieldValue;

/// A caller-supplied predicate over the whole record.
pub type FilterFn<T> = Box<dyn Fn(&T) -> bool + Send + Sync>;

/// Filter state for a single field.
///
/// A group carries a condition name, a comparison operand, and optionally a
/// custom predicate. The group is a no-op (every record passes) while its
/// condition is absent or its value is unset, even when a predicate is
/// installed; clearing a filter resets the value and keeps the condition,
/// so a UI can blank a filter input without forgetting which condition was
/// picked.
pub struct FilterGroup<T> {
    /// Condition name, resolved through the registry at evaluation time.
    pub condition: Option<String>,
    /// Comparison operand. `Null` means unset.
    pub value: FieldValue,
    filter_fn: Option<FilterFn<T>>,
}

impl<T> FilterGroup<T> {
    /// Creates an empty, no-op group.
    pub fn new() -> Self {
        FilterGroup {
            condition: None,
            value: FieldValue::Null,
            filter_fn: None,
        }
    }

    /// Creates a declarative group from a condition name and operand.
    ///
    /// ```
    /// use collate::{Condition, FilterGroup};
    ///
    /// let group: FilterGroup<()> = FilterGroup::rule(Condition::Eq, "Alice");
    /// ```
    pub fn rule(condition: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        FilterGroup {
            condition: Some(condition.into()),
            value: value.into(),
            filter_fn: None,
        }
    }

    /// Builder-style [`set_filter_fn`](FilterGroup::set_filter_fn).
    ///
    /// The predicate replaces declarative evaluation while the group is
    /// active; activation still requires a condition and a set operand,
    /// so a cleared filter stays a no-op even with a predicate installed.
    pub fn with_filter_fn<F>(mut self, filter_fn: F) -> Self
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        self.set_filter_fn(filter_fn);
        self
    }

    /// Replaces the comparison operand.
    pub fn set_value(&mut self, value: impl Into<FieldValue>) {
        self.value = value.into();
    }

    /// Resets the operand to unset, keeping the condition.
    pub fn clear_value(&mut self) {
        self.value = FieldValue::Null;
    }

    /// Installs a custom predicate, used instead of the declarative rule
    /// while the group is active.
    pub fn set_filter_fn<F>(&mut self, filter_fn: F)
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        self.filter_fn = Some(Box::new(filter_fn));
    }

    /// Removes the custom predicate, reverting to declarative evaluation.
    pub fn clear_filter_fn(&mut self) {
        self.filter_fn = None;
    }

    /// Resolves this group to an evaluatable rule.
    ///
    /// The no-op test comes first: a group with no condition or an unset
    /// operand (null, empty string, or empty list) resolves to `None` even
    /// when a custom predicate is installed, so clearing a filter always
    /// deactivates the group. An active group dispatches to the predicate
    /// when one is present, otherwise to the declarative rule.
    pub fn resolve(&self) -> Option<FilterRule<'_, T>> {
        let condition = self.condition.as_deref()?;
        if self.value.is_unset() {
            return None;
        }
        if let Some(filter_fn) = &self.filter_fn {
            return Some(FilterRule::Custom(filter_fn.as_ref()));
        }
        Some(FilterRule::Declarative {
            condition,
            value: &self.value,
        })
    }
}

impl<T> Default for FilterGroup<T> {
    fn default() -> Self {
        FilterGroup::new()
    }
}

impl<T> fmt::Debug for FilterGroup<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterGroup")
            .field("condition", &self.condition)
            .field("value", &self.value)
            .field("filter_fn", &self.filter_fn.as_ref().map(|_| ".."))
            .finish()
    }
}

/// A filter group resolved for evaluation, dispatched on its tag.
pub enum FilterRule<'g, T> {
    /// Condition name plus operand, to be looked up in the registry.
    Declarative {
        /// The condition name.
        condition: &'g str,
        /// The comparison operand.
        value: &'g FieldValue,
    },
    /// Caller-supplied predicate, replacing declarative evaluation.
    Custom(&'g (dyn Fn(&T) -> bool + Send + Sync)),
}

/// Insertion-ordered filter configuration: one group per field.
///
/// The configuration is owned by the caller and typically long-lived;
/// [`clear_filter`](FilterConfig::clear_filter) and
/// [`clear_filters`](FilterConfig::clear_filters) mutate it in place, which
/// any holder of the configuration observes. Field evaluation order is
/// insertion order, though groups combine with a pure AND so the order
/// carries no semantics.
pub struct FilterConfig<T> {
    entries: Vec<(String, FilterGroup<T>)>,
}

impl<T> FilterConfig<T> {
    /// Creates an empty configuration (every record passes).
    pub fn new() -> Self {
        FilterConfig {
            entries: Vec::new(),
        }
    }

    /// Sets the group for a field, replacing any existing group.
    pub fn set(&mut self, field: impl Into<String>, group: FilterGroup<T>) {
        let field = field.into();
        match self.entries.iter_mut().find(|(name, _)| *name == field) {
            Some((_, existing)) => *existing = group,
            None => self.entries.push((field, group)),
        }
    }

    /// Builder-style [`set`](FilterConfig::set).
    pub fn with(mut self, field: impl Into<String>, group: FilterGroup<T>) -> Self {
        self.set(field, group);
        self
    }

    /// Returns the group configured for a field.
    pub fn get(&self, field: &str) -> Option<&FilterGroup<T>> {
        self.entries
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, group)| group)
    }

    /// Returns the group configured for a field, mutably.
    pub fn get_mut(&mut self, field: &str) -> Option<&mut FilterGroup<T>> {
        self.entries
            .iter_mut()
            .find(|(name, _)| name == field)
            .map(|(_, group)| group)
    }

    /// Removes a field's group entirely.
    pub fn remove(&mut self, field: &str) -> Option<FilterGroup<T>> {
        let index = self.entries.iter().position(|(name, _)| name == field)?;
        Some(self.entries.remove(index).1)
    }

    /// Resets one field's operand to unset, keeping its condition.
    pub fn clear_filter(&mut self, field: &str) {
        if let Some(group) = self.get_mut(field) {
            group.clear_value();
        }
    }

    /// Resets every field's operand to unset.
    pub fn clear_filters(&mut self) {
        for (_, group) in &mut self.entries {
            group.clear_value();
        }
    }

    /// Iterates the configured fields and groups in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FilterGroup<T>)> {
        self.entries
            .iter()
            .map(|(name, group)| (name.as_str(), group))
    }

    /// Returns `true` if no field is configured.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of configured fields.
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

impl<T> Default for FilterConfig<T> {
    fn default() -> Self {
        FilterConfig::new()
    }
}

impl<T> fmt::Debug for FilterConfig<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.entries.iter().map(|(name, group)| (name, group)))
            .finish()
    }
}

/// Evaluates filter configurations against collections.
///
/// The engine owns its condition registry; construct it with
/// [`FilterEngine::new`] to inject a custom registry, or use the default
/// standard one.
///
/// # Example
///
/// ```
/// use collate::{Condition, FilterConfig, FilterEngine, FilterGroup};
///
/// let data = vec![
///     serde_json::json!({ "id": 1, "name": "Alice" }),
///     serde_json::json!({ "id": 2, "name": "Bob" }),
/// ];
///
/// let config = FilterConfig::new()
///     .with("name", FilterGroup::rule(Condition::Eq, "Alice"));
///
/// let engine = FilterEngine::default();
/// let filtered = engine
///     .filtered_data(&data, &config, <serde_json::Value as collate::Collatable>::accessor)
///     .unwrap();
/// assert_eq!(filtered.len(), 1);
/// assert_eq!(filtered[0]["id"], 1);
/// ```
#[derive(Debug, Default)]
pub struct FilterEngine {
    registry: ConditionRegistry,
}

impl FilterEngine {
    /// Creates an engine with an injected condition registry.
    pub fn new(registry: ConditionRegistry) -> Self {
        FilterEngine { registry }
    }

    /// Returns the engine's registry.
    pub fn registry(&self) -> &ConditionRegistry {
        &self.registry
    }

    /// Tests a single record against the configuration.
    ///
    /// Fields combine with logical AND and evaluation short-circuits on the
    /// first failing field. An unrecognized condition name is a
    /// configuration error and propagates immediately.
    pub fn matches<T, F>(&self, item: &T, config: &FilterConfig<T>, accessor: F) -> Result<bool>
    where
        F: Fn(&T, &str) -> FieldValue,
    {
        for (field, group) in config.iter() {
            let Some(rule) = group.resolve() else {
                continue;
            };

            let pass = match rule {
                FilterRule::Custom(filter_fn) => filter_fn(item),
                FilterRule::Declarative { condition, value } => {
                    let Some(predicate) = self.registry.get(condition) else {
                        return Err(CollateError::UnknownCondition {
                            field: field.to_string(),
                            condition: condition.to_string(),
                        });
                    };
                    predicate(&accessor(item, field), value)
                }
            };

            if !pass {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Reduces a collection to the records passing every configured group.
    ///
    /// Input order is preserved and the input is never mutated.
    pub fn filtered_data<'a, T, F>(
        &self,
        items: &'a [T],
        config: &FilterConfig<T>,
        accessor: F,
    ) -> Result<Vec<&'a T>>
    where
        F: Fn(&T, &str) -> FieldValue,
    {
        let mut results = Vec::new();
        for item in items {
            if self.matches(item, config, &accessor)? {
                results.push(item);
            }
        }
        Ok(results)
    }
}
