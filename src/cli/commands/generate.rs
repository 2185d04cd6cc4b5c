//! Generate command implementation

use std::path::PathBuf;
use std::time::Duration;

use crate::cli::error::CliError;
use crate::cli::output::{format_schema_summary, write_diagram};
use crate::client::ConnectionConfig;
use crate::export::{DiagramExporter, DiagramFormat, FormatConfig};
use crate::fetch::SchemaFetcher;

/// Arguments for the `generate` command
pub struct GenerateArgs {
    /// Solution unique name
    pub solution: String,
    /// Target notation
    pub format: DiagramFormat,
    /// Output file or directory (stdout if not provided)
    pub output: Option<PathBuf>,
    /// Leave attribute lines out of entity blocks
    pub no_attributes: bool,
    /// Leave relationship lines out
    pub no_relationships: bool,
    /// Emit at most this many attributes per entity
    pub max_attributes: Option<usize>,
    /// Overall deadline for the fetch in seconds
    pub deadline: u64,
}

impl GenerateArgs {
    fn format_config(&self) -> FormatConfig {
        let mut config = FormatConfig::new(self.format)
            .with_attributes(!self.no_attributes)
            .with_relationships(!self.no_relationships);
        if let Some(max) = self.max_attributes {
            config = config.with_max_attributes(max);
        }
        config
    }
}

/// Handle the `generate` command
pub async fn handle_generate(args: &GenerateArgs, config: ConnectionConfig) -> Result<(), CliError> {
    if args.solution.trim().is_empty() {
        return Err(CliError::InvalidArgument(
            "Solution name cannot be empty".to_string(),
        ));
    }

    eprintln!("Fetching solution {} from {}...", args.solution, config);

    let fetcher = SchemaFetcher::connect(config)?;
    let schema = tokio::time::timeout(
        Duration::from_secs(args.deadline),
        fetcher.fetch_solution(&args.solution),
    )
    .await
    .map_err(|_| CliError::Timeout(args.deadline))??;

    eprintln!("{}", format_schema_summary(&schema));

    let result = DiagramExporter::new(args.format_config()).export(&schema);

    match &args.output {
        Some(target) => {
            let path = write_diagram(&result, target)?;
            eprintln!("Diagram written to: {}", path.display());
        }
        None => print!("{}", result.content),
    }

    Ok(())
}
