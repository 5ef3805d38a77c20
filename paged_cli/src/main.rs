mod commands;
mod output;
mod settings;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::commands::Extraction;
use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "paged")]
#[command(about = "Inspect pagination links and build JSON response envelopes")]
struct Cli {
    /// Output format: table, json or markdown
    #[arg(long, default_value = "table", global = true)]
    output: String,

    /// TOML file with `default_limit` and `max_limit`
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Page size used when the request has no usable limit
    #[arg(long, global = true)]
    default_limit: Option<u64>,

    /// Cap applied to requested limits
    #[arg(long, global = true)]
    max_limit: Option<u64>,

    /// Reject malformed limit/offset values instead of defaulting them
    #[arg(long, global = true)]
    strict: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show pagination parameters and previous/next links for a request URL
    Links(commands::links::LinksArgs),
    /// Wrap a JSON array as a paginated collection envelope
    Collection(commands::envelope::CollectionArgs),
    /// Wrap a JSON value as a single-resource success envelope
    Success(commands::envelope::SuccessArgs),
    /// Build an error envelope
    Error(commands::envelope::ErrorArgs),
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("paged=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let format = match cli.output.as_str() {
        "json" => OutputFormat::Json,
        "markdown" | "md" => OutputFormat::Markdown,
        _ => OutputFormat::Table,
    };

    let overrides = settings::Overrides {
        default_limit: cli.default_limit,
        max_limit: cli.max_limit,
    };
    let config = settings::load(cli.config.as_deref(), &overrides)?;
    let extraction = Extraction {
        config,
        strict: cli.strict,
    };

    match &cli.command {
        Commands::Links(args) => commands::links::run(args, &extraction, &format)?,
        Commands::Collection(args) => commands::envelope::run_collection(args, &extraction, &format)?,
        Commands::Success(args) => commands::envelope::run_success(args, &format)?,
        Commands::Error(args) => commands::envelope::run_error(args, &format)?,
    }

    Ok(())
}
