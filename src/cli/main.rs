//! dataverse-erd - render Dataverse solutions as ER diagrams
//!
//! Usage:
//!   dataverse-erd solutions [--url <url>] [--token <token>]
//!   dataverse-erd generate <solution> [--format <format>] [--output <path>]
//!
//! The URL and token default to DATAVERSE_URL and DATAVERSE_TOKEN.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand, ValueEnum};
use dataverse_erd::cli::commands::generate::{GenerateArgs, handle_generate};
use dataverse_erd::cli::commands::solutions::handle_solutions;
use dataverse_erd::cli::commands::{ConnectionArgs, resolve_connection};
use dataverse_erd::export::DiagramFormat;

#[derive(Parser)]
#[command(name = "dataverse-erd")]
#[command(about = "Render Dataverse solutions as Mermaid, PlantUML or Graphviz ER diagrams")]
#[command(version)]
struct Cli {
    #[command(flatten)]
    connection: ConnectionOpts,

    /// Overall deadline for fetching, in seconds
    #[arg(long, global = true, default_value_t = 300)]
    timeout: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct ConnectionOpts {
    /// Path to configuration file (TOML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Environment URL (e.g. https://contoso.crm.dynamics.com)
    #[arg(long, global = true)]
    url: Option<String>,

    /// Bearer token for the Web API
    #[arg(long, global = true)]
    token: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, global = true)]
    request_timeout: Option<u64>,

    /// Number of tables fetched concurrently
    #[arg(long, global = true)]
    concurrency: Option<usize>,
}

impl From<ConnectionOpts> for ConnectionArgs {
    fn from(opts: ConnectionOpts) -> Self {
        ConnectionArgs {
            config: opts.config,
            url: opts.url,
            token: opts.token,
            request_timeout: opts.request_timeout,
            concurrency: opts.concurrency,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// List visible solutions
    Solutions,

    /// Fetch a solution and render its ER diagram
    Generate {
        /// Solution unique name
        solution: String,

        /// Diagram notation
        #[arg(short, long, default_value = "mermaid")]
        format: FormatArg,

        /// Output file or directory (stdout if not provided)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Leave attributes out of entity blocks
        #[arg(long)]
        no_attributes: bool,

        /// Leave relationships out
        #[arg(long)]
        no_relationships: bool,

        /// Maximum attributes shown per entity
        #[arg(long)]
        max_attributes: Option<usize>,
    },
}

#[derive(Clone, ValueEnum)]
enum FormatArg {
    Mermaid,
    Plantuml,
    Graphviz,
}

impl From<FormatArg> for DiagramFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Mermaid => DiagramFormat::Mermaid,
            FormatArg::Plantuml => DiagramFormat::PlantUml,
            FormatArg::Graphviz => DiagramFormat::Graphviz,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = resolve_connection(&cli.connection.into())?;
    let runtime = tokio::runtime::Runtime::new().context("Failed to start async runtime")?;

    match cli.command {
        Commands::Solutions => runtime.block_on(handle_solutions(config, cli.timeout))?,
        Commands::Generate {
            solution,
            format,
            output,
            no_attributes,
            no_relationships,
            max_attributes,
        } => {
            let args = GenerateArgs {
                solution,
                format: format.into(),
                output,
                no_attributes,
                no_relationships,
                max_attributes,
                deadline: cli.timeout,
            };
            runtime.block_on(handle_generate(&args, config))?;
        }
    }

    Ok(())
}
