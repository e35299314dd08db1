use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use portfolio_chat::connector::api::Router;
use portfolio_chat::domain::{DEFAULT_MAX_TOKENS, DEFAULT_OWNER_NAME, DEFAULT_TEMPERATURE};
use portfolio_chat::{Commands, Container, ContainerConfig, Provider};

#[derive(Parser)]
#[command(name = "portfolio-chat")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Completion backend used by `serve` and shown by `prompt`
    #[arg(long, global = true, value_enum, default_value = "groq")]
    provider: Provider,

    /// Model identifier (defaults to the provider's default model)
    #[arg(short, long, global = true)]
    model: Option<String>,

    #[arg(long, global = true, default_value_t = DEFAULT_TEMPERATURE)]
    temperature: f32,

    #[arg(long, global = true, default_value_t = DEFAULT_MAX_TOKENS)]
    max_tokens: u32,

    /// Plain-text resume to answer from (defaults to the built-in resume)
    #[arg(long, global = true)]
    resume: Option<PathBuf>,

    /// Name of the portfolio owner, used in the prompt and greeting
    #[arg(long, global = true, default_value = DEFAULT_OWNER_NAME)]
    owner: String,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let container = Container::new(ContainerConfig {
        provider: cli.provider,
        model: cli.model,
        temperature: cli.temperature,
        max_tokens: cli.max_tokens,
        resume_path: cli.resume,
        owner_name: cli.owner,
    })?;

    let router = Router::new(&container);
    let output = router.route(cli.command).await?;
    println!("{}", output);

    Ok(())
}
