use super::title::capitalize;
use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

pub const MAX_TAGS: usize = 8;
pub const DEFAULT_TAGS: &[&str] = &["Automotive", "Vehicle", "Car"];

const BRANDS: &[&str] = &[
    "ford",
    "chevrolet",
    "chev",
    "dodge",
    "toyota",
    "honda",
    "bmw",
    "mercedes",
    "audi",
    "porsche",
    "ferrari",
    "lamborghini",
    "mustang",
    "camaro",
    "corvette",
    "charger",
    "challenger",
    "supra",
    "gtr",
    "skyline",
    "viper",
    "jesko",
];

const TERMS: &[&str] = &[
    "muscle",
    "sports",
    "supercar",
    "hypercar",
    "race",
    "racing",
    "drift",
    "drag",
    "turbo",
    "v8",
    "v12",
    "engine",
    "horsepower",
    "torque",
    "modified",
    "custom",
    "tuned",
    "stock",
    "concept",
    "prototype",
];

const COLORS: &[&str] = &[
    "black", "white", "red", "blue", "green", "yellow", "orange", "purple", "silver", "gray",
    "gold", "matte", "gloss", "chrome",
];

const STOP_WORDS: &[&str] = &[
    "the",
    "and",
    "or",
    "but",
    "with",
    "for",
    "from",
    "to",
    "in",
    "on",
    "at",
    "by",
    "of",
    "a",
    "an",
    "this",
    "that",
    "these",
    "those",
    "is",
    "are",
    "was",
    "were",
    "be",
    "been",
    "being",
    "have",
    "has",
    "had",
    "having",
    "do",
    "does",
    "did",
    "doing",
    "car",
    "cars",
    "vehicle",
    "auto",
    "automobile",
];

static WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[a-zA-Z0-9]+\b").expect("valid word pattern"));

/// Generate up to [`MAX_TAGS`] tags for a title.
///
/// Vocabulary terms found anywhere in the title come first (brands, then
/// descriptive terms, then colours), followed by the remaining significant
/// words in title order.
pub fn tags_from_title(title: &str) -> Vec<String> {
    let lower = title.to_lowercase();
    let mut tags: Vec<String> = Vec::new();

    for term in BRANDS.iter().chain(TERMS).chain(COLORS) {
        if lower.contains(term) {
            tags.push(capitalize(term));
        }
    }

    for word in WORD.find_iter(&lower).map(|m| m.as_str()) {
        if word.len() > 2
            && !STOP_WORDS.contains(&word)
            && !tags.iter().any(|t| t.to_lowercase() == word)
        {
            tags.push(capitalize(word));
        }
    }

    let mut seen = HashSet::new();
    tags.retain(|t| seen.insert(t.clone()));
    tags.truncate(MAX_TAGS);

    if tags.is_empty() {
        DEFAULT_TAGS.iter().map(|t| t.to_string()).collect()
    } else {
        tags
    }
}
