//! Solutions command implementation

use std::time::Duration;

use crate::cli::error::CliError;
use crate::cli::output::format_solution_list;
use crate::client::ConnectionConfig;
use crate::fetch::SchemaFetcher;

/// Handle the `solutions` command
pub async fn handle_solutions(config: ConnectionConfig, deadline: u64) -> Result<(), CliError> {
    eprintln!("Listing solutions in {}...", config);

    let fetcher = SchemaFetcher::connect(config)?;
    let solutions = tokio::time::timeout(Duration::from_secs(deadline), fetcher.list_solutions())
        .await
        .map_err(|_| CliError::Timeout(deadline))??;

    print!("{}", format_solution_list(&solutions));
    Ok(())
}
