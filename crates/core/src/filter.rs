//! Search, filter and sort pipeline over fetched posts
//!
//! [`filter_posts`] applies the stages below in order. A stage whose
//! parameter is empty or unset is skipped entirely:
//!
//! 1. text search over `title` and `body` (case-insensitive substring)
//! 2. category filter (any tag in the requested set)
//! 3. user filter
//! 4. minimum likes
//! 5. maximum likes
//! 6. stable sort by the selected [`SortOption`]
//!
//! The input slice is never touched; the result is a fresh `Vec`.

use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::posts::Post;

/// Ordering applied as the last pipeline stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortOption {
    Newest,
    Oldest,
    MostLikes,
    LeastLikes,
    TitleAsc,
    TitleDesc,
}

impl SortOption {
    pub const ALL: [SortOption; 6] = [
        SortOption::Newest,
        SortOption::Oldest,
        SortOption::MostLikes,
        SortOption::LeastLikes,
        SortOption::TitleAsc,
        SortOption::TitleDesc,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortOption::Newest => "newest",
            SortOption::Oldest => "oldest",
            SortOption::MostLikes => "most-likes",
            SortOption::LeastLikes => "least-likes",
            SortOption::TitleAsc => "title-asc",
            SortOption::TitleDesc => "title-desc",
        }
    }

    /// Human readable label
    pub fn label(&self) -> &'static str {
        match self {
            SortOption::Newest => "Newest first",
            SortOption::Oldest => "Oldest first",
            SortOption::MostLikes => "Most liked",
            SortOption::LeastLikes => "Least liked",
            SortOption::TitleAsc => "Title (A-Z)",
            SortOption::TitleDesc => "Title (Z-A)",
        }
    }

    fn compare(&self, a: &Post, b: &Post) -> Ordering {
        match self {
            SortOption::Newest => b.id.cmp(&a.id),
            SortOption::Oldest => a.id.cmp(&b.id),
            SortOption::MostLikes => b.likes().cmp(&a.likes()),
            SortOption::LeastLikes => a.likes().cmp(&b.likes()),
            SortOption::TitleAsc => locale_compare(&a.title, &b.title),
            SortOption::TitleDesc => locale_compare(&b.title, &a.title),
        }
    }
}

impl fmt::Display for SortOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid sort option: {0}. Valid options: newest, oldest, most-likes, least-likes, title-asc, title-desc")]
pub struct ParseSortOptionError(pub String);

impl FromStr for SortOption {
    type Err = ParseSortOptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortOption::ALL
            .into_iter()
            .find(|option| option.as_str() == s)
            .ok_or_else(|| ParseSortOptionError(s.to_string()))
    }
}

/// User-selected search, filter and sort configuration
///
/// `FilterParams::default()` keeps every post in fetch order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterParams {
    pub search_term: String,
    pub categories: BTreeSet<String>,
    pub user_ids: BTreeSet<u64>,
    pub min_likes: Option<i64>,
    pub max_likes: Option<i64>,
    pub sort: Option<SortOption>,
}

/// Parse a numeric bound typed by the user
///
/// Empty or malformed input means "no bound". Decimal input is truncated toward zero, so `"1.5"` is 1 and `"-1.5"` is -1.
pub fn parse_bound(input: &str) -> Option<i64> {
    let input = input.trim();
    if let Ok(bound) = input.parse::<i64>() {
        return Some(bound);
    }

    input
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .map(|value| value.trunc() as i64)
}

fn matches_search(post: &Post, term: &str) -> bool {
    post.title.to_lowercase().contains(term) || post.body.to_lowercase().contains(term)
}

fn matches_categories(post: &Post, categories: &BTreeSet<String>) -> bool {
    post.tags.iter().any(|tag| categories.contains(tag))
}

fn likes_at_least(likes: u64, min: i64) -> bool {
    min <= 0 || likes >= min as u64
}

fn likes_at_most(likes: u64, max: i64) -> bool {
    max >= 0 && likes <= max as u64
}

/// Run the full pipeline over `posts`
pub fn filter_posts(posts: &[Post], params: &FilterParams) -> Vec<Post> {
    let mut result: Vec<Post> = posts.to_vec();

    if !params.search_term.is_empty() {
        let term = params.search_term.to_lowercase();
        result.retain(|post| matches_search(post, &term));
        log::trace!("search {:?}: {} posts left", params.search_term, result.len());
    }

    if !params.categories.is_empty() {
        result.retain(|post| matches_categories(post, &params.categories));
        log::trace!("categories {:?}: {} posts left", params.categories, result.len());
    }

    if !params.user_ids.is_empty() {
        result.retain(|post| params.user_ids.contains(&post.user_id));
        log::trace!("users {:?}: {} posts left", params.user_ids, result.len());
    }

    if let Some(min) = params.min_likes {
        result.retain(|post| likes_at_least(post.likes(), min));
        log::trace!("min likes {}: {} posts left", min, result.len());
    }

    if let Some(max) = params.max_likes {
        result.retain(|post| likes_at_most(post.likes(), max));
        log::trace!("max likes {}: {} posts left", max, result.len());
    }

    if let Some(sort) = params.sort {
        // `sort_by` is stable, equal keys keep their fetch order.
        result.sort_by(|a, b| sort.compare(a, b));
    }

    log::debug!("filtered {} posts down to {}", posts.len(), result.len());
    result
}

/// Primary-strength character groups, in collation order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum CharClass {
    Space,
    Punctuation,
    Digit,
    Letter,
}

impl CharClass {
    fn of(c: char) -> Self {
        if c.is_whitespace() {
            CharClass::Space
        } else if c.is_alphabetic() {
            CharClass::Letter
        } else if c.is_numeric() {
            CharClass::Digit
        } else {
            CharClass::Punctuation
        }
    }
}

/// Letters NFD leaves alone but that collate with a base letter
fn fold_letter(c: char) -> Option<&'static str> {
    let folded = match c {
        'ø' => "o",
        'æ' => "ae",
        'œ' => "oe",
        'ß' => "ss",
        'đ' | 'ð' => "d",
        'ł' => "l",
        'ħ' => "h",
        'ı' => "i",
        'þ' => "th",
        _ => return None,
    };
    Some(folded)
}

fn primary_key(s: &str) -> Vec<(CharClass, char)> {
    let mut key = Vec::with_capacity(s.len());
    for c in s
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
    {
        match fold_letter(c) {
            Some(folded) => key.extend(folded.chars().map(|f| (CharClass::Letter, f))),
            None => key.push((CharClass::of(c), c)),
        }
    }
    key
}

fn accent_key(s: &str) -> String {
    s.nfd().flat_map(char::to_lowercase).collect()
}

fn case_key(s: &str) -> Vec<bool> {
    s.nfd().map(char::is_uppercase).collect()
}

/// Locale-aware title comparison
///
/// At primary strength whitespace sorts before punctuation and symbols, those
/// before digits, and digits before letters. Letters compare without regard
/// to accents or case, with `ø`, `æ`, `ß` and friends folded onto their base
/// letters. Accents then break ties, then case (lowercase sorts first). Raw
/// code points settle anything left so the ordering is total.
pub fn locale_compare(a: &str, b: &str) -> Ordering {
    primary_key(a)
        .cmp(&primary_key(b))
        .then_with(|| accent_key(a).cmp(&accent_key(b)))
        .then_with(|| case_key(a).cmp(&case_key(b)))
        .then_with(|| a.cmp(b))
}
