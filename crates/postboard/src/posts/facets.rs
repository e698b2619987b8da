use crate::prelude::{println, *};
use colored::Colorize;
use indicatif::ProgressBar;
use postboard_core::facets::{build_facets, FacetsOutput};
use postboard_core::listing::display_user;

use super::{load_posts, loading_spinner, PostsConfig};

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
pub struct FacetsOptions {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(options: FacetsOptions, global: crate::Global) -> Result<()> {
    let config = PostsConfig::from_global(&global);
    let spinner = loading_spinner(!options.json)?;
    let facets = facets_data(&config, spinner.as_ref()).await?;

    if options.json {
        let json = serde_json::to_string_pretty(&facets)
            .map_err(|e| eyre!("Failed to serialize output: {}", e))?;
        println!("{}", json);
    } else {
        print!("{}", format_facets_text(&facets));
    }

    Ok(())
}

/// Fetches the posts and returns the filter choices they offer
pub async fn facets_data(config: &PostsConfig, spinner: Option<&ProgressBar>) -> Result<FacetsOutput> {
    let posts = load_posts(config, spinner).await?;
    Ok(build_facets(&posts))
}

fn format_facets_text(facets: &FacetsOutput) -> String {
    let mut result = String::new();

    result.push_str(&format!(
        "\n{} ({})\n",
        "CATEGORIES".bright_cyan().bold(),
        facets.categories.len()
    ));
    if facets.categories.is_empty() {
        result.push_str(&format!("  {}\n", "none".yellow()));
    } else {
        result.push_str(&format!("  {}\n", facets.categories.join(", ")));
    }

    result.push_str(&format!(
        "\n{} ({})\n",
        "USERS".bright_cyan().bold(),
        facets.user_ids.len()
    ));
    if facets.user_ids.is_empty() {
        result.push_str(&format!("  {}\n", "none".yellow()));
    } else {
        let users: Vec<String> = facets.user_ids.iter().map(|id| display_user(*id)).collect();
        result.push_str(&format!("  {}\n", users.join(", ")));
    }

    result.push_str(&format!(
        "\n{}: {}\n\n",
        "Filter with".green(),
        "postboard posts list --category <TAG> --user <USER_ID>".cyan()
    ));

    result
}
