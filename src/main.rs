pub mod config;
pub mod github;
pub mod resolve;
pub mod tag;
pub mod types;

use clap::Parser;

use crate::config::{Config, Inputs};
use crate::github::GitHubClient;
use crate::tag::TagUpsert;

#[derive(Parser)]
#[command(
    name = "retag",
    about = "Create or move a floating git tag on GitHub"
)]
struct Cli {
    /// Tag to create or move (falls back to INPUT_TAG_NAME)
    #[arg(long)]
    tag: Option<String>,

    /// Branch, tag, or commit SHA the tag should point at
    /// (falls back to INPUT_REF, then GITHUB_SHA)
    #[arg(long = "ref")]
    reference: Option<String>,

    /// Repository in owner/name format (falls back to GITHUB_REPOSITORY)
    #[arg(long)]
    repo: Option<String>,

    /// API token (falls back to GITHUB_TOKEN)
    #[arg(long)]
    token: Option<String>,

    /// REST endpoint, for GitHub Enterprise (falls back to GITHUB_API_URL)
    #[arg(long)]
    api_url: Option<String>,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env(Inputs {
        tag: cli.tag,
        reference: cli.reference,
        repo: cli.repo,
        token: cli.token,
        api_url: cli.api_url,
    })?;

    let client = GitHubClient::new(config.repo.clone(), config.token.clone(), &config.api_url);

    println!("Resolving '{}' in {}...", config.reference, config.repo);
    let sha = resolve::resolve(&client, &config.reference)?;
    println!("Resolved to {}", sha);

    match tag::upsert(&client, &config.tag, &sha)? {
        TagUpsert::Created => println!("Tag '{}' created at {}", config.tag, sha),
        TagUpsert::Moved => println!("Tag '{}' moved to {}", config.tag, sha),
    }

    Ok(())
}
