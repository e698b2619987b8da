//! Core library for postboard
//!
//! This crate implements the **Functional Core** of the postboard application,
//! following the Functional Core - Imperative Shell architectural pattern.
//!
//! - **`postboard_core`** (this crate): Pure transformation functions with zero I/O
//! - **`postboard`**: HTTP fetching, terminal output and the MCP server (the
//!   Imperative Shell)
//!
//! # Module Organization
//!
//! - [`posts`]: Post records and normalization of the API's wire shapes
//! - [`filter`]: The search, filter and sort pipeline
//! - [`facets`]: Category and user choices derived from a post list
//! - [`listing`]: Output models consumed by every front end
//!
//! # Example Usage
//!
//! ```rust
//! use postboard_core::filter::{FilterParams, SortOption};
//! use postboard_core::listing::transform_posts;
//! use postboard_core::posts::parse_posts_response;
//!
//! let body = r#"{"posts":[
//!     {"id":1,"title":"a","body":"","userId":1,"tags":[],"reactions":{"likes":5,"dislikes":0}},
//!     {"id":2,"title":"b","body":"","userId":1,"tags":[],"likes":9}
//! ]}"#;
//! let posts = parse_posts_response(body).unwrap();
//!
//! let params = FilterParams {
//!     sort: Some(SortOption::MostLikes),
//!     ..Default::default()
//! };
//! let output = transform_posts(&posts, &params);
//!
//! assert_eq!(output.posts[0].id, 2);
//! assert_eq!(output.matched, 2);
//! ```

pub mod facets;
pub mod filter;
pub mod listing;
pub mod posts;
