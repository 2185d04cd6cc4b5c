//! CLI module for the dataverse-erd binary

pub mod commands;
pub mod error;
pub mod output;

pub use error::CliError;
