use serde::Serialize;

use crate::filter::{filter_posts, FilterParams};
use crate::posts::Post;

/// Effective filters, echoed back with the results
#[derive(Debug, Serialize, Clone, Default, PartialEq, Eq)]
pub struct AppliedFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub categories: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub users: Vec<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_likes: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_likes: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
}

impl From<&FilterParams> for AppliedFilters {
    fn from(params: &FilterParams) -> Self {
        AppliedFilters {
            search: (!params.search_term.is_empty()).then(|| params.search_term.clone()),
            categories: params.categories.iter().cloned().collect(),
            users: params.user_ids.iter().copied().collect(),
            min_likes: params.min_likes,
            max_likes: params.max_likes,
            sort: params.sort.map(|s| s.to_string()),
        }
    }
}

impl AppliedFilters {
    pub fn is_empty(&self) -> bool {
        *self == AppliedFilters::default()
    }
}

/// Filtered post listing
#[derive(Debug, Serialize, Clone)]
pub struct PostListOutput {
    pub total_posts: usize,
    pub matched: usize,
    pub filters: AppliedFilters,
    pub posts: Vec<Post>,
}

/// Run the pipeline and wrap the result for display
pub fn transform_posts(posts: &[Post], params: &FilterParams) -> PostListOutput {
    let filtered = filter_posts(posts, params);

    PostListOutput {
        total_posts: posts.len(),
        matched: filtered.len(),
        filters: AppliedFilters::from(params),
        posts: filtered,
    }
}

/// Author label for a post; user 0 means nobody claimed it
pub fn display_user(user_id: u64) -> String {
    if user_id == 0 {
        "Anonymous".to_string()
    } else {
        format!("User {user_id}")
    }
}
