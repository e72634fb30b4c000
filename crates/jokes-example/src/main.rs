//! `jokes`: a worked example of shaping a collection with collate.
//!
//! Loads a joke collection from JSON, then filters, searches, sorts, and
//! paginates it from command-line flags. Demonstrates the intended chaining
//! of the four stages over a concrete record type.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use collate::{
    paginated_data, results_count_text, sorted_data, Collatable, FieldValue, FilterConfig,
    FilterEngine, FilterGroup, PaginationConfig, SearchConfig, SearchEngine, SortConfig,
    SortOrder,
};
use serde::Deserialize;

const DEFAULT_JOKES: &str = include_str!("../jokes.json");

#[derive(Debug, Clone, Deserialize)]
struct Joke {
    id: u64,
    #[serde(rename = "type")]
    joke_type: String,
    setup: String,
    punchline: String,
    rating: Option<u8>,
}

impl Collatable for Joke {
    fn field_value(&self, field: &str) -> FieldValue {
        match field {
            "id" => FieldValue::from(self.id),
            "type" => FieldValue::from(self.joke_type.as_str()),
            "setup" => FieldValue::from(self.setup.as_str()),
            "punchline" => FieldValue::from(self.punchline.as_str()),
            "rating" => FieldValue::from(self.rating),
            _ => FieldValue::Null,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "jokes", about = "Filter, search, sort, and page a joke collection")]
struct Args {
    /// Path to a JSON file of jokes; bundled data when omitted
    #[arg(long)]
    data: Option<PathBuf>,

    /// Only jokes of this type (general, knock-knock, programming, dad)
    #[arg(long)]
    joke_type: Option<String>,

    /// Only jokes rated at least this value (0-5)
    #[arg(long)]
    min_rating: Option<u8>,

    /// Substring to search for in setups and punchlines
    #[arg(long)]
    search: Option<String>,

    /// Field to sort by (id, type, setup, rating)
    #[arg(long)]
    sort: Option<String>,

    /// Sort descending instead of ascending
    #[arg(long)]
    desc: bool,

    /// Page to show, 1-based
    #[arg(long, default_value_t = 1)]
    page: usize,

    /// Jokes per page
    #[arg(long, default_value_t = 5)]
    per_page: usize,
}

fn load_jokes(path: Option<&PathBuf>) -> Result<Vec<Joke>> {
    let text = match path {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read jokes from {}", path.display()))?,
        None => DEFAULT_JOKES.to_string(),
    };
    serde_json::from_str(&text).context("failed to parse jokes JSON")
}

fn build_filters(args: &Args) -> FilterConfig<Joke> {
    let mut config = FilterConfig::new();
    if let Some(joke_type) = &args.joke_type {
        config.set("type", FilterGroup::rule("eq", joke_type.as_str()));
    }
    if let Some(min_rating) = args.min_rating {
        config.set("rating", FilterGroup::rule("gte", min_rating));
    }
    config
}

fn shape<'a>(jokes: &'a [Joke], args: &Args) -> Result<(Vec<&'a Joke>, usize)> {
    let filters = build_filters(args);
    let engine = FilterEngine::default();
    let filtered = engine.filtered_data(jokes, &filters, Joke::accessor)?;

    let search = SearchConfig::new(["setup", "punchline"])
        .with_query(args.search.clone().unwrap_or_default());
    let mut searcher = SearchEngine::new();
    searcher.observe(&search, Instant::now());
    // One-shot CLI invocation, nothing to debounce against
    searcher.flush();
    let searched = searcher.searched_data(&filtered, &search, |j, f| Joke::accessor(j, f));

    let mut sort = SortConfig::new();
    if let Some(key) = &args.sort {
        sort.key = Some(key.clone());
        sort.order = Some(if args.desc { SortOrder::Desc } else { SortOrder::Asc });
    }
    let sorted = sorted_data(&searched, &sort, |j, f| Joke::accessor(j, f));

    let count = sorted.len();
    let mut pages = PaginationConfig::new(args.per_page);
    if count > 0 {
        pages.set_page(args.page, count)?;
    }
    let page: Vec<&Joke> = paginated_data(&sorted, &pages)
        .iter()
        .map(|j| ***j)
        .collect();
    Ok((page, count))
}

fn render(page: &[&Joke], count: usize, args: &Args) {
    let mut pages = PaginationConfig::new(args.per_page);
    pages.page = args.page;

    for joke in page {
        let rating = joke
            .rating
            .map(|r| format!("{r}/5"))
            .unwrap_or_else(|| "unrated".to_string());
        println!("#{} [{}] ({})", joke.id, joke.joke_type, rating);
        println!("  {}", joke.setup);
        println!("  {}", joke.punchline);
        println!();
    }
    println!("{}", results_count_text(count, &pages));
}

fn main() -> Result<()> {
    let args = Args::parse();
    let jokes = load_jokes(args.data.as_ref())?;
    let (page, count) = shape(&jokes, &args)?;
    render(&page, count, &args);
    Ok(())
}
