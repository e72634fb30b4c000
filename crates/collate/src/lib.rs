//! Composable data shaping for in-memory collections.
//!
//! `collate` turns a collection of uniform records into a presentable view
//! through four independent stages: filtering, debounced text search,
//! sorting, and pagination. Each stage is a pure derivation that reads
//! caller-owned configuration and borrows from the input; chaining them is
//! the caller's job, which keeps every combination of stages available
//! without a monolithic pipeline type.
//!
//! Records expose their fields through the [`Collatable`] trait (or a plain
//! accessor closure), which maps a field name to a [`FieldValue`]. Filters
//! pair a field with a named condition from the [`ConditionRegistry`] and a
//! comparison value; search normalizes and substring-matches across chosen
//! keys; sort orders by key or custom comparator; pagination windows the
//! result.
//!
//! # Quick start
//!
//! ```
//! use std::time::Instant;
//! use collate::{
//!     paginated_data, sorted_data, Collatable, FilterConfig, FilterEngine,
//!     FilterGroup, PaginationConfig, SearchConfig, SearchEngine, SortConfig,
//!     SortOrder,
//! };
//!
//! let jokes = vec![
//!     serde_json::json!({ "id": 1, "type": "programming", "setup": "A SQL query walks into a bar", "rating": 5 }),
//!     serde_json::json!({ "id": 2, "type": "dad", "setup": "I'm reading a book about anti-gravity", "rating": 3 }),
//!     serde_json::json!({ "id": 3, "type": "programming", "setup": "Why do programmers prefer dark mode?", "rating": 4 }),
//! ];
//! let accessor = <serde_json::Value as Collatable>::accessor;
//!
//! // Filter: programming jokes only.
//! let filters = FilterConfig::new().with("type", FilterGroup::rule("eq", "programming"));
//! let engine = FilterEngine::default();
//! let filtered = engine.filtered_data(&jokes, &filters, accessor)?;
//!
//! // Search: debounced query over the setup text.
//! let search = SearchConfig::new(["setup"]).with_query("bar");
//! let mut searcher = SearchEngine::new();
//! searcher.observe(&search, Instant::now());
//! searcher.flush();
//! let searched = searcher.searched_data(&filtered, &search, |j, f| accessor(j, f));
//!
//! // Sort and paginate what's left.
//! let sort = SortConfig::by("rating", SortOrder::Desc);
//! let sorted = sorted_data(&searched, &sort, |j, f| accessor(j, f));
//! let pages = PaginationConfig::new(10);
//! let page = paginated_data(&sorted, &pages);
//!
//! assert_eq!(page.len(), 1);
//! assert_eq!(page[0]["id"], 1);
//! # Ok::<(), collate::CollateError>(())
//! ```

pub mod condition;
pub mod debounce;
pub mod error;
pub mod filter;
pub mod page;
pub mod record;
pub mod search;
pub mod sort;
pub mod value;

pub use condition::{Condition, ConditionFn, ConditionRegistry};
pub use debounce::{Debouncer, DEBOUNCE_WINDOW};
pub use error::{CollateError, Result};
pub use filter::{FilterConfig, FilterEngine, FilterFn, FilterGroup, FilterRule};
pub use page::{paginated_data, results_count_text, PaginationConfig, DEFAULT_PER_PAGE};
pub use record::Collatable;
pub use search::{SearchConfig, SearchEngine};
pub use sort::{sorted_data, CompareFn, SortConfig, SortOrder};
pub use value::{FieldValue, Number};
