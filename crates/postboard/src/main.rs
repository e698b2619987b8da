use crate::prelude::*;
use clap::Parser;

mod error;
mod mcp;
mod posts;
mod prelude;

#[derive(Debug, clap::Parser)]
#[command(
    author,
    version,
    about,
    long_about = "Search, filter and sort posts from the DummyJSON posts API"
)]
pub struct App {
    #[command(subcommand)]
    pub command: SubCommands,

    #[clap(flatten)]
    global: Global,
}

#[derive(Debug, Clone, clap::Args)]
pub struct Global {
    /// Posts API endpoint
    #[clap(
        long,
        env = "POSTBOARD_API_URL",
        global = true,
        default_value = posts::PostsConfig::DEFAULT_API_URL
    )]
    api_url: String,

    /// Whether to display additional information.
    #[clap(long, env = "POSTBOARD_VERBOSE", global = true, default_value = "false")]
    verbose: bool,
}

#[derive(Debug, clap::Parser)]
pub enum SubCommands {
    /// Browse, search and filter posts
    Posts(crate::posts::App),

    /// Model Context Protocol server
    MCP(crate::mcp::App),
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    color_eyre::install()?;

    let app = App::parse();

    match app.command {
        SubCommands::Posts(sub_app) => crate::posts::run(sub_app, app.global).await,
        SubCommands::MCP(sub_app) => crate::mcp::run(sub_app, app.global).await,
    }
    .map_err(|err: color_eyre::eyre::Report| eyre!(err))
}
