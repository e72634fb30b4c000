//! Search engine: debounced substring scan across named fields.
//!
//! A record matches when at least one configured key's value, rendered to a
//! string, contains the query as a substring. The engine reads the query
//! through a [`Debouncer`] so keystroke-level changes are coalesced; the
//! derived output only ever reflects the settled query.

use std::time::{Duration, Instant};

use crate::debounce::Debouncer;
use crate::value::FieldValue;

/// Search configuration, owned by the caller.
#[derive(Debug, Clone, Default)]
pub struct SearchConfig {
    /// The live query string, mutated as the user types.
    pub query: String,
    /// Field names to scan, in order.
    pub keys: Vec<String>,
    /// Compare case-sensitively. Defaults to false.
    pub case_sensitive: bool,
}

impl SearchConfig {
    /// Creates a configuration scanning the given keys.
    pub fn new<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        SearchConfig {
            query: String::new(),
            keys: keys.into_iter().map(Into::into).collect(),
            case_sensitive: false,
        }
    }

    /// Builder-style query assignment.
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    /// Builder-style case sensitivity toggle.
    pub fn case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }
}

/// Evaluates search configurations against collections.
///
/// The engine holds the single piece of state in the whole pipeline: the
/// debounced copy of the query. Feed configuration changes in with
/// [`observe`](SearchEngine::observe), advance the clock with
/// [`poll`](SearchEngine::poll) (or [`flush`](SearchEngine::flush) when
/// there is no keystroke stream), and derive output with
/// [`searched_data`](SearchEngine::searched_data).
///
/// # Example
///
/// ```
/// use std::time::Instant;
/// use collate::{Collatable, SearchConfig, SearchEngine};
///
/// let data = vec![
///     serde_json::json!({ "id": 1, "name": "Alice" }),
///     serde_json::json!({ "id": 2, "name": "Bob" }),
/// ];
///
/// let config = SearchConfig::new(["name"]).with_query("alice");
/// let mut engine = SearchEngine::new();
/// engine.observe(&config, Instant::now());
/// engine.flush();
///
/// let found = engine.searched_data(&data, &config, <serde_json::Value as Collatable>::accessor);
/// assert_eq!(found.len(), 1);
/// assert_eq!(found[0]["id"], 1);
/// ```
#[derive(Debug, Clone)]
pub struct SearchEngine {
    query: Debouncer<String>,
}

impl SearchEngine {
    /// Creates an engine with the default 150ms debounce window.
    pub fn new() -> Self {
        SearchEngine {
            query: Debouncer::new(String::new()),
        }
    }

    /// Creates an engine with a custom debounce window.
    pub fn with_window(window: Duration) -> Self {
        SearchEngine {
            query: Debouncer::with_window(String::new(), window),
        }
    }

    /// Observes the configuration's current query.
    ///
    /// A changed query restarts the quiescence window; an unchanged one is
    /// a no-op.
    pub fn observe(&mut self, config: &SearchConfig, now: Instant) {
        self.query.submit(config.query.clone(), now);
    }

    /// Commits a settled query change, if any. Returns `true` on commit.
    pub fn poll(&mut self, now: Instant) -> bool {
        self.query.poll(now)
    }

    /// Commits any pending query immediately.
    pub fn flush(&mut self) -> bool {
        self.query.flush()
    }

    /// Drops any pending query so later polls cannot mutate state.
    pub fn cancel(&mut self) {
        self.query.cancel()
    }

    /// The settled query the output is derived from.
    pub fn query(&self) -> &str {
        self.query.value()
    }

    /// Reduces a collection to the records matching the settled query.
    ///
    /// An empty settled query or an empty key list passes the whole input
    /// through. Field values are rendered with
    /// [`FieldValue::to_query_string`]; both sides are lowercased unless
    /// the configuration is case-sensitive.
    pub fn searched_data<'a, T, F>(
        &self,
        items: &'a [T],
        config: &SearchConfig,
        accessor: F,
    ) -> Vec<&'a T>
    where
        F: Fn(&T, &str) -> FieldValue,
    {
        let query = self.query.value();
        if query.is_empty() || config.keys.is_empty() {
            return items.iter().collect();
        }

        let needle = normalize(query, config.case_sensitive);
        items
            .iter()
            .filter(|item| {
                config.keys.iter().any(|key| {
                    let haystack =
                        normalize(&accessor(item, key).to_query_string(), config.case_sensitive);
                    haystack.contains(&needle)
                })
            })
            .collect()
    }
}

impl Default for SearchEngine {
    fn default() -> Self {
        SearchEngine::new()
    }
}

fn normalize(text: &str, case_sensitive: bool) -> String {
    if case_sensitive {
        text.to_string()
    } else {
        text.to_lowercase()
    }
}
