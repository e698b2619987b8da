use crate::prelude::{eprintln, println, *};
use colored::Colorize;
use indicatif::ProgressBar;
use postboard_core::filter::{parse_bound, FilterParams, SortOption};
use postboard_core::listing::{display_user, transform_posts, AppliedFilters, PostListOutput};

use super::{load_posts, loading_spinner, truncate_text, PostsConfig};

const BODY_PREVIEW_LEN: usize = 300;

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone, Default)]
pub struct ListOptions {
    /// Case-insensitive text to look for in titles and bodies
    #[arg(short, long, default_value = "")]
    pub search: String,

    /// Keep posts tagged with any of these categories (can be repeated)
    #[arg(short, long = "category", value_name = "TAG")]
    pub categories: Vec<String>,

    /// Keep posts written by any of these users (can be repeated)
    #[arg(short, long = "user", value_name = "USER_ID")]
    pub users: Vec<u64>,

    /// Minimum number of likes (ignored when not a number)
    #[arg(long, value_name = "N")]
    pub min_likes: Option<String>,

    /// Maximum number of likes (ignored when not a number)
    #[arg(long, value_name = "N")]
    pub max_likes: Option<String>,

    /// Sort order: newest, oldest, most-likes, least-likes, title-asc, title-desc
    #[arg(long, value_name = "ORDER")]
    pub sort: Option<SortOption>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl ListOptions {
    pub fn to_filter_params(&self) -> FilterParams {
        FilterParams {
            search_term: self.search.clone(),
            categories: self.categories.iter().cloned().collect(),
            user_ids: self.users.iter().copied().collect(),
            min_likes: self.min_likes.as_deref().and_then(parse_bound),
            max_likes: self.max_likes.as_deref().and_then(parse_bound),
            sort: self.sort,
        }
    }
}

pub async fn run(options: ListOptions, global: crate::Global) -> Result<()> {
    let params = options.to_filter_params();

    if global.verbose {
        eprintln!("Filters: {:?}", params);
    }

    let config = PostsConfig::from_global(&global);
    let spinner = loading_spinner(!options.json)?;
    let output = list_posts_data(&config, &params, spinner.as_ref()).await?;

    if options.json {
        output_json(&output)?;
    } else {
        output_formatted(&output)?;
    }

    Ok(())
}

/// Fetches the posts and returns the filtered, sorted listing
pub async fn list_posts_data(
    config: &PostsConfig,
    params: &FilterParams,
    spinner: Option<&ProgressBar>,
) -> Result<PostListOutput> {
    let posts = load_posts(config, spinner).await?;
    Ok(transform_posts(&posts, params))
}

fn format_list_json(output: &PostListOutput) -> Result<String> {
    serde_json::to_string_pretty(output).map_err(|e| eyre!("JSON serialization failed: {}", e))
}

fn describe_filters(filters: &AppliedFilters) -> Vec<String> {
    let mut parts = Vec::new();

    if let Some(search) = &filters.search {
        parts.push(format!("search \"{search}\""));
    }
    if !filters.categories.is_empty() {
        parts.push(format!("categories {}", filters.categories.join(", ")));
    }
    if !filters.users.is_empty() {
        let users: Vec<String> = filters.users.iter().map(|u| display_user(*u)).collect();
        parts.push(format!("users {}", users.join(", ")));
    }
    if let Some(min) = filters.min_likes {
        parts.push(format!("likes >= {min}"));
    }
    if let Some(max) = filters.max_likes {
        parts.push(format!("likes <= {max}"));
    }
    if let Some(sort) = filters.sort.as_deref().and_then(|s| s.parse::<SortOption>().ok()) {
        parts.push(format!("sorted by {}", sort.label()));
    }

    parts
}

fn format_list_text(output: &PostListOutput) -> String {
    let mut result = String::new();

    result.push_str(&format!("\n{}\n", "=".repeat(80).bright_cyan()));
    result.push_str(&format!(
        "{}\n",
        format!("POSTS ({} of {})", output.matched, output.total_posts)
            .bright_cyan()
            .bold()
    ));
    result.push_str(&format!("{}\n", "=".repeat(80).bright_cyan()));

    if !output.filters.is_empty() {
        result.push_str(&format!(
            "{}: {}\n",
            "Filters".green(),
            describe_filters(&output.filters).join(" | ").bright_white()
        ));
    }

    if output.posts.is_empty() {
        result.push_str(&format!(
            "\n{}\n",
            "No posts match the current filters.".yellow()
        ));
    }

    for post in &output.posts {
        let title = if post.title.is_empty() {
            "(No title)"
        } else {
            post.title.as_str()
        };
        result.push_str(&format!(
            "\n{} {}\n",
            format!("[{}]", post.id).yellow().bold(),
            title.white().bold()
        ));

        if !post.body.is_empty() {
            result.push_str(&format!(
                "    {}\n",
                truncate_text(&post.body, BODY_PREVIEW_LEN)
            ));
        }

        let tags = if post.tags.is_empty() {
            "No tags".to_string()
        } else {
            post.tags.join(", ")
        };
        result.push_str(&format!(
            "    {}: {} | {}: {} | {}: {}\n",
            "Likes".green(),
            post.likes().to_string().bright_yellow(),
            "Dislikes".green(),
            post.dislikes().to_string().bright_magenta(),
            "Tags".green(),
            tags.cyan()
        ));
        result.push_str(&format!(
            "    {}: {}\n",
            "Posted by".green(),
            display_user(post.user_id).bright_white()
        ));
    }

    result.push('\n');
    result
}

fn output_json(output: &PostListOutput) -> Result<()> {
    let json = format_list_json(output)?;
    println!("{}", json);
    Ok(())
}

fn output_formatted(output: &PostListOutput) -> Result<()> {
    let formatted = format_list_text(output);
    print!("{}", formatted);
    Ok(())
}
