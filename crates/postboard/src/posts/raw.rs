use crate::prelude::{println, *};
use postboard_core::posts::Post;

use super::{load_posts, loading_spinner, truncate_text, PostsConfig};

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
pub struct RawOptions {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(options: RawOptions, global: crate::Global) -> Result<()> {
    let config = PostsConfig::from_global(&global);
    let spinner = loading_spinner(!options.json)?;
    let posts = load_posts(&config, spinner.as_ref()).await?;

    if options.json {
        let json = serde_json::to_string_pretty(&posts)
            .map_err(|e| eyre!("Failed to serialize output: {}", e))?;
        println!("{}", json);
        return Ok(());
    }

    println!("\nPosts ({}):\n", posts.len());
    build_raw_table(&posts).printstd();

    Ok(())
}

fn build_raw_table(posts: &[Post]) -> prettytable::Table {
    let mut table = crate::prelude::new_table();
    table.add_row(prettytable::row![b => "ID", "Title", "Tags", "Likes", "Dislikes"]);

    for post in posts {
        table.add_row(prettytable::row![
            post.id,
            truncate_text(&post.title, 60),
            post.tags.join(", "),
            post.likes(),
            post.dislikes()
        ]);
    }

    table
}
