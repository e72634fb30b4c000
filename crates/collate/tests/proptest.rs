//! Property-based tests for the shaping laws using proptest.

use proptest::prelude::*;

use collate::{
    paginated_data, sorted_data, FieldValue, FilterConfig, FilterEngine, FilterGroup,
    PaginationConfig, SearchConfig, SearchEngine, SortConfig, SortOrder,
};

// ============================================================================
// Test helpers
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
struct TestItem {
    value: i64,
    name: String,
    active: bool,
}

fn item_accessor(item: &TestItem, field: &str) -> FieldValue {
    match field {
        "value" => FieldValue::from(item.value),
        "name" => FieldValue::from(item.name.as_str()),
        "active" => FieldValue::from(item.active),
        _ => FieldValue::Null,
    }
}

// Strategy to generate test items
fn test_item_strategy() -> impl Strategy<Value = TestItem> {
    (any::<i64>(), "[a-z]{1,10}", any::<bool>()).prop_map(|(value, name, active)| TestItem {
        value,
        name,
        active,
    })
}

fn settled_searcher(config: &SearchConfig) -> SearchEngine {
    let mut engine = SearchEngine::new();
    engine.observe(config, std::time::Instant::now());
    engine.flush();
    engine
}

// ============================================================================
// Property tests
// ============================================================================

proptest! {
    /// Filtering never returns more items than the input.
    #[test]
    fn filter_never_grows_collection(
        items in prop::collection::vec(test_item_strategy(), 0..100),
        threshold in any::<i64>(),
    ) {
        let config = FilterConfig::new().with("value", FilterGroup::rule("gt", threshold));
        let engine = FilterEngine::default();

        let results = engine.filtered_data(&items, &config, item_accessor).unwrap();
        prop_assert!(results.len() <= items.len());
    }

    /// Filtering the filtered output again changes nothing.
    #[test]
    fn filter_is_idempotent(
        items in prop::collection::vec(test_item_strategy(), 0..100),
        threshold in any::<i64>(),
    ) {
        let config = FilterConfig::new().with("value", FilterGroup::rule("lte", threshold));
        let engine = FilterEngine::default();

        let once: Vec<TestItem> = engine
            .filtered_data(&items, &config, item_accessor)
            .unwrap()
            .into_iter()
            .cloned()
            .collect();
        let twice: Vec<TestItem> = engine
            .filtered_data(&once, &config, item_accessor)
            .unwrap()
            .into_iter()
            .cloned()
            .collect();

        prop_assert_eq!(once, twice);
    }

    /// An empty configuration, or one whose groups are all no-ops, is the
    /// identity in input order.
    #[test]
    fn noop_filters_are_identity(
        items in prop::collection::vec(test_item_strategy(), 0..100),
    ) {
        let engine = FilterEngine::default();

        let empty: FilterConfig<TestItem> = FilterConfig::new();
        let results = engine.filtered_data(&items, &empty, item_accessor).unwrap();
        prop_assert_eq!(results.len(), items.len());

        // Groups with a cleared value or no condition are skipped entirely.
        let mut cleared = FilterConfig::new().with("value", FilterGroup::rule("gt", 0));
        if let Some(group) = cleared.get_mut("value") {
            group.clear_value();
        }
        let results = engine.filtered_data(&items, &cleared, item_accessor).unwrap();
        let expected: Vec<&TestItem> = items.iter().collect();
        prop_assert_eq!(results, expected);
    }

    /// Every returned record contains the lowercased query in some key;
    /// every excluded record contains it in none.
    #[test]
    fn search_partitions_by_substring(
        items in prop::collection::vec(test_item_strategy(), 0..100),
        query in "[a-z]{1,3}",
    ) {
        let config = SearchConfig::new(["name"]).with_query(query.clone());
        let engine = settled_searcher(&config);

        let results = engine.searched_data(&items, &config, item_accessor);
        let kept: Vec<&TestItem> = results.clone();

        for item in &results {
            prop_assert!(item.name.to_lowercase().contains(&query));
        }
        for item in &items {
            if !kept.iter().any(|k| std::ptr::eq(*k, item)) {
                prop_assert!(!item.name.to_lowercase().contains(&query));
            }
        }
    }

    /// Records with equal sort keys keep their relative input order.
    #[test]
    fn sort_is_stable_on_equal_keys(
        items in prop::collection::vec(test_item_strategy(), 0..100),
    ) {
        let config = SortConfig::by("active", SortOrder::Asc);

        let sorted = sorted_data(&items, &config, item_accessor);

        let mut last_index_per_key = std::collections::HashMap::new();
        for item in &sorted {
            let index = items
                .iter()
                .position(|i| std::ptr::eq(i, *item))
                .unwrap();
            if let Some(&prev) = last_index_per_key.get(&item.active) {
                prop_assert!(index > prev);
            }
            last_index_per_key.insert(item.active, index);
        }
    }

    /// Sorting is a permutation: same length, same multiset of items.
    #[test]
    fn sort_is_a_permutation(
        items in prop::collection::vec(test_item_strategy(), 0..100),
    ) {
        let config = SortConfig::by("value", SortOrder::Desc);

        let sorted = sorted_data(&items, &config, item_accessor);
        prop_assert_eq!(sorted.len(), items.len());

        let mut values: Vec<i64> = sorted.iter().map(|i| i.value).collect();
        let mut expected: Vec<i64> = items.iter().map(|i| i.value).collect();
        values.sort_unstable();
        expected.sort_unstable();
        prop_assert_eq!(values, expected);
    }

    /// Concatenating every page reconstructs the collection exactly.
    #[test]
    fn pagination_is_total(
        items in prop::collection::vec(any::<i64>(), 0..100),
        per_page in 1usize..20,
    ) {
        let mut config = PaginationConfig::new(per_page);

        let mut reassembled = Vec::new();
        for page in 1..=config.total_pages(items.len()) {
            config.set_page(page, items.len()).unwrap();
            reassembled.extend_from_slice(paginated_data(&items, &config));
        }

        prop_assert_eq!(reassembled, items);
    }

    /// Pages outside 1..=totalPages are empty, rejected by set_page, and
    /// unreachable by navigation.
    #[test]
    fn pagination_respects_boundaries(
        items in prop::collection::vec(any::<i64>(), 0..100),
        per_page in 1usize..20,
    ) {
        let mut config = PaginationConfig::new(per_page);
        let total_pages = config.total_pages(items.len());

        config.page = total_pages + 1;
        prop_assert!(paginated_data(&items, &config).is_empty());
        config.page = 1;

        prop_assert!(config.set_page(total_pages + 1, items.len()).is_err());
        prop_assert_eq!(config.page, 1);

        config.prev_page();
        prop_assert_eq!(config.page, 1);

        if total_pages > 0 {
            config.set_page(total_pages, items.len()).unwrap();
            config.next_page(items.len());
            prop_assert_eq!(config.page, total_pages);
        }
    }
}
