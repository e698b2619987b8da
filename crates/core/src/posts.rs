//! Post records as returned by the posts API
//!
//! The API has shipped reactions in more than one shape over time, so
//! deserialization goes through [`RawPost`] and lands in the canonical
//! [`Post`]. Everything downstream reads `post.reactions` and never looks at
//! the wire shape again.

use serde::{Deserialize, Serialize};

/// Like/dislike counters attached to a post
#[derive(Debug, Default, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
pub struct Reactions {
    #[serde(default)]
    pub likes: u64,
    #[serde(default)]
    pub dislikes: u64,
}

/// Canonical post record
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(from = "RawPost")]
pub struct Post {
    pub id: u64,
    pub title: String,
    pub body: String,
    #[serde(rename = "userId")]
    pub user_id: u64,
    pub tags: Vec<String>,
    pub reactions: Reactions,
}

impl Post {
    pub fn likes(&self) -> u64 {
        self.reactions.likes
    }

    pub fn dislikes(&self) -> u64 {
        self.reactions.dislikes
    }
}

/// `reactions` as it may appear on the wire
#[derive(Debug, Deserialize, Clone)]
#[serde(untagged)]
pub enum RawReactions {
    Nested(RawNestedReactions),
    /// Older API revisions sent a single reaction count.
    Count(u64),
}

/// Nested reaction counters; a missing key falls back to the flat field
#[derive(Debug, Default, Deserialize, Clone, Copy)]
pub struct RawNestedReactions {
    #[serde(default)]
    pub likes: Option<u64>,
    #[serde(default)]
    pub dislikes: Option<u64>,
}

/// Post as it appears on the wire, before normalization
#[derive(Debug, Deserialize, Clone)]
pub struct RawPost {
    pub id: u64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(rename = "userId", default)]
    pub user_id: Option<u64>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub reactions: Option<RawReactions>,
    #[serde(default)]
    pub likes: Option<u64>,
    #[serde(default)]
    pub dislikes: Option<u64>,
}

impl From<RawPost> for Post {
    fn from(raw: RawPost) -> Self {
        let nested = match raw.reactions {
            Some(RawReactions::Nested(nested)) => nested,
            Some(RawReactions::Count(_)) | None => RawNestedReactions::default(),
        };
        let reactions = Reactions {
            likes: nested.likes.or(raw.likes).unwrap_or(0),
            dislikes: nested.dislikes.or(raw.dislikes).unwrap_or(0),
        };

        Post {
            id: raw.id,
            title: raw.title.unwrap_or_default(),
            body: raw.body.unwrap_or_default(),
            user_id: raw.user_id.unwrap_or(0),
            tags: raw.tags.unwrap_or_default(),
            reactions,
        }
    }
}

/// Posts API response envelope
///
/// Pagination metadata is carried along but nothing filters on it.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct PostsResponse {
    #[serde(default)]
    pub posts: Vec<Post>,
    pub total: Option<u64>,
    pub skip: Option<u64>,
    pub limit: Option<u64>,
}

/// Decode a posts API response body into canonical posts
pub fn parse_posts_response(body: &str) -> Result<Vec<Post>, serde_json::Error> {
    let response: PostsResponse = serde_json::from_str(body)?;
    log::debug!(
        "decoded {} posts (total reported: {:?})",
        response.posts.len(),
        response.total
    );
    Ok(response.posts)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_nested_reactions() {
        let json = r#"{"id":1,"title":"t","body":"b","userId":3,"tags":["a"],"reactions":{"likes":5,"dislikes":2}}"#;
        let post: Post = serde_json::from_str(json).unwrap();

        assert_eq!(post.likes(), 5);
        assert_eq!(post.dislikes(), 2);
        assert_eq!(post.user_id, 3);
        assert_eq!(post.tags, vec!["a".to_string()]);
    }

    #[test]
    fn test_parse_flat_reactions() {
        let json = r#"{"id":1,"title":"t","body":"b","userId":3,"tags":[],"likes":7,"dislikes":1}"#;
        let post: Post = serde_json::from_str(json).unwrap();

        assert_eq!(post.likes(), 7);
        assert_eq!(post.dislikes(), 1);
    }

    #[test]
    fn test_nested_reactions_win_over_flat() {
        let json = r#"{"id":1,"reactions":{"likes":0,"dislikes":4},"likes":99,"dislikes":99}"#;
        let post: Post = serde_json::from_str(json).unwrap();

        assert_eq!(post.likes(), 0);
        assert_eq!(post.dislikes(), 4);
    }

    #[test]
    fn test_partial_nested_reactions_default_to_zero() {
        let json = r#"{"id":1,"reactions":{"likes":3}}"#;
        let post: Post = serde_json::from_str(json).unwrap();

        assert_eq!(post.likes(), 3);
        assert_eq!(post.dislikes(), 0);
    }

    #[test]
    fn test_missing_nested_key_falls_back_to_flat_field() {
        let json = r#"{"id":1,"reactions":{"likes":3},"dislikes":5}"#;
        let post: Post = serde_json::from_str(json).unwrap();
        assert_eq!(post.likes(), 3);
        assert_eq!(post.dislikes(), 5);

        let json = r#"{"id":2,"reactions":{"dislikes":1},"likes":40}"#;
        let post: Post = serde_json::from_str(json).unwrap();
        assert_eq!(post.likes(), 40);
        assert_eq!(post.dislikes(), 1);
    }

    #[test]
    fn test_empty_nested_reactions_use_flat_fields() {
        let json = r#"{"id":1,"reactions":{},"likes":8,"dislikes":2}"#;
        let post: Post = serde_json::from_str(json).unwrap();

        assert_eq!(post.reactions, Reactions { likes: 8, dislikes: 2 });
    }

    #[test]
    fn test_numeric_reactions_fall_back_to_flat_fields() {
        let json = r#"{"id":1,"reactions":12,"likes":2}"#;
        let post: Post = serde_json::from_str(json).unwrap();

        assert_eq!(post.likes(), 2);
        assert_eq!(post.dislikes(), 0);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let post: Post = serde_json::from_str(r#"{"id":9}"#).unwrap();

        assert_eq!(post.id, 9);
        assert_eq!(post.title, "");
        assert_eq!(post.body, "");
        assert_eq!(post.user_id, 0);
        assert!(post.tags.is_empty());
        assert_eq!(post.reactions, Reactions::default());
    }

    #[test]
    fn test_serializes_canonical_shape() {
        let post: Post =
            serde_json::from_str(r#"{"id":1,"title":"t","likes":4,"dislikes":1}"#).unwrap();
        let value = serde_json::to_value(&post).unwrap();

        assert_eq!(value["reactions"]["likes"], 4);
        assert_eq!(value["reactions"]["dislikes"], 1);
        assert_eq!(value["userId"], 0);
        assert!(value.get("likes").is_none());
    }

    #[test]
    fn test_parse_posts_response_ignores_pagination() {
        let body = r#"{
            "posts": [
                {"id":1,"title":"First","body":"x","userId":1,"tags":["love"],"reactions":{"likes":10,"dislikes":0}},
                {"id":2,"title":"Second","body":"y","userId":2,"tags":[],"reactions":{"likes":1,"dislikes":3}}
            ],
            "total": 251,
            "skip": 0,
            "limit": 30
        }"#;

        let posts = parse_posts_response(body).unwrap();

        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].title, "First");
        assert_eq!(posts[1].dislikes(), 3);
    }

    #[test]
    fn test_parse_posts_response_without_posts_field() {
        let posts = parse_posts_response(r#"{"total":0}"#).unwrap();
        assert!(posts.is_empty());
    }

    #[test]
    fn test_parse_posts_response_invalid_json() {
        assert!(parse_posts_response("not json").is_err());
    }
}
