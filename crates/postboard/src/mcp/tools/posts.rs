use crate::posts::PostsConfig;
use crate::prelude::eprintln;
use postboard_core::filter::{parse_bound, FilterParams, SortOption};
use serde::Deserialize;

use super::{json_tool_result, JsonRpcError};

#[derive(Debug, Deserialize, Default)]
struct PostsListArgs {
    search: Option<String>,
    categories: Option<Vec<String>>,
    users: Option<Vec<u64>>,
    min_likes: Option<serde_json::Value>,
    max_likes: Option<serde_json::Value>,
    sort: Option<String>,
    api_url: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
struct PostsFacetsArgs {
    api_url: Option<String>,
}

fn parse_args<T: serde::de::DeserializeOwned + Default>(
    arguments: Option<serde_json::Value>,
) -> Result<T, JsonRpcError> {
    match arguments {
        None | Some(serde_json::Value::Null) => Ok(T::default()),
        Some(value) => serde_json::from_value(value)
            .map_err(|e| JsonRpcError::invalid_params(format!("Invalid arguments: {e}"))),
    }
}

/// Numbers are truncated toward zero, strings go through [`parse_bound`],
/// anything else is no bound
fn bound_from_value(value: Option<&serde_json::Value>) -> Option<i64> {
    match value? {
        serde_json::Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|v| v.is_finite()).map(|v| v.trunc() as i64)),
        serde_json::Value::String(s) => parse_bound(s),
        _ => None,
    }
}

fn to_filter_params(args: &PostsListArgs) -> Result<FilterParams, JsonRpcError> {
    let sort = args
        .sort
        .as_deref()
        .filter(|s| !s.is_empty())
        .map(str::parse::<SortOption>)
        .transpose()
        .map_err(|e| JsonRpcError::invalid_params(e.to_string()))?;

    Ok(FilterParams {
        search_term: args.search.clone().unwrap_or_default(),
        categories: args.categories.iter().flatten().cloned().collect(),
        user_ids: args.users.iter().flatten().copied().collect(),
        min_likes: bound_from_value(args.min_likes.as_ref()),
        max_likes: bound_from_value(args.max_likes.as_ref()),
        sort,
    })
}

pub async fn handle_posts_list(
    arguments: Option<serde_json::Value>,
    global: &crate::Global,
) -> Result<serde_json::Value, JsonRpcError> {
    let args: PostsListArgs = parse_args(arguments)?;
    let params = to_filter_params(&args)?;

    if global.verbose {
        eprintln!("Calling posts_list: {:?}", params);
    }

    let config = PostsConfig::from_global(global).with_overrides(args.api_url);
    let list_data = crate::posts::list_posts_data(&config, &params, None)
        .await
        .map_err(|e| JsonRpcError::internal(format!("Tool execution error: {e}")))?;

    json_tool_result(&list_data)
}

pub async fn handle_posts_facets(
    arguments: Option<serde_json::Value>,
    global: &crate::Global,
) -> Result<serde_json::Value, JsonRpcError> {
    let args: PostsFacetsArgs = parse_args(arguments)?;

    if global.verbose {
        eprintln!("Calling posts_facets");
    }

    let config = PostsConfig::from_global(global).with_overrides(args.api_url);
    let facets = crate::posts::facets_data(&config, None)
        .await
        .map_err(|e| JsonRpcError::internal(format!("Tool execution error: {e}")))?;

    json_tool_result(&facets)
}
