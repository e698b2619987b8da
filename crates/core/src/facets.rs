//! Filter choices derived from the fetched posts
use std::collections::{BTreeSet, HashSet};

use serde::Serialize;

use crate::posts::Post;

/// Categories and users that can be selected as filters
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct FacetsOutput {
    pub total_posts: usize,
    pub categories: Vec<String>,
    pub user_ids: Vec<u64>,
}

/// Distinct tags in the order they first appear
pub fn collect_categories(posts: &[Post]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut categories = Vec::new();

    for tag in posts.iter().flat_map(|post| &post.tags) {
        if seen.insert(tag) {
            categories.push(tag.clone());
        }
    }

    categories
}

/// Distinct user ids, ascending. Anonymous posts (user 0) are left out.
pub fn collect_user_ids(posts: &[Post]) -> Vec<u64> {
    posts
        .iter()
        .map(|post| post.user_id)
        .filter(|id| *id != 0)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

pub fn build_facets(posts: &[Post]) -> FacetsOutput {
    FacetsOutput {
        total_posts: posts.len(),
        categories: collect_categories(posts),
        user_ids: collect_user_ids(posts),
    }
}
