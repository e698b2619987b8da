use crate::prelude::{eprintln, *};
use indicatif::{ProgressBar, ProgressStyle};
use postboard_core::posts::Post;

pub mod client;
pub mod facets;
pub mod list;
pub mod raw;

pub use facets::facets_data;
pub use list::list_posts_data;

#[derive(Debug, clap::Parser)]
#[command(name = "posts")]
#[command(about = "Browse, search and filter posts")]
pub struct App {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// List posts with search, filters and sorting applied
    #[clap(name = "list")]
    List(list::ListOptions),

    /// Dump the unfiltered post list as returned by the API
    #[clap(name = "raw")]
    Raw(raw::RawOptions),

    /// Show the categories and users available as filters
    #[clap(name = "facets")]
    Facets(facets::FacetsOptions),
}

/// Posts API settings resolved from flags and environment
#[derive(Debug, Clone)]
pub struct PostsConfig {
    pub api_url: String,
}

impl PostsConfig {
    pub const DEFAULT_API_URL: &'static str = "https://dummyjson.com/posts";

    pub fn from_global(global: &crate::Global) -> Self {
        Self {
            api_url: global.api_url.clone(),
        }
    }

    /// Apply per-call overrides to the configuration
    pub fn with_overrides(mut self, api_url: Option<String>) -> Self {
        if let Some(url) = api_url {
            self.api_url = url;
        }
        self
    }
}

impl Default for PostsConfig {
    fn default() -> Self {
        Self {
            api_url: Self::DEFAULT_API_URL.to_string(),
        }
    }
}

pub async fn run(app: App, global: crate::Global) -> Result<()> {
    if global.verbose {
        eprintln!("Posts API: {}", global.api_url);
        eprintln!();
    }

    match app.command {
        Commands::List(options) => list::run(options, global).await,
        Commands::Raw(options) => raw::run(options, global).await,
        Commands::Facets(options) => facets::run(options, global).await,
    }
}

/// Spinner shown on stderr while the posts are loading
pub fn loading_spinner(enabled: bool) -> Result<Option<ProgressBar>> {
    if !enabled {
        return Ok(None);
    }

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}")?);
    spinner.set_message("Loading posts...");
    spinner.enable_steady_tick(std::time::Duration::from_millis(100));

    Ok(Some(spinner))
}

/// Fetch the posts once, keeping the spinner up until the request settles
pub async fn load_posts(config: &PostsConfig, spinner: Option<&ProgressBar>) -> Result<Vec<Post>> {
    let client = reqwest::Client::new();
    let result = client::fetch_posts(&client, config).await;

    if let Some(s) = spinner {
        s.finish_and_clear();
    }

    Ok(result?)
}

pub fn truncate_text(text: &str, max_len: usize) -> String {
    match text.char_indices().nth(max_len) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}
