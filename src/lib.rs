//! Dataverse ERD - entity-relationship diagrams from Dataverse solutions
//!
//! Provides:
//! - A connection layer for the Dataverse Web API metadata endpoints
//! - Concurrent assembly of a solution's tables, attributes and relationships
//! - Pure renderers for Mermaid, PlantUML and Graphviz DOT

pub mod client;
pub mod export;
pub mod fetch;
pub mod models;

#[cfg(feature = "cli")]
pub mod cli;

// Re-export commonly used types
pub use client::{ConnectionConfig, FetchError, FetchResult, MetadataTransport};
#[cfg(feature = "api-backend")]
pub use client::api::HttpTransport;
pub use export::{
    DiagramExporter, DiagramFormat, ExportError, ExportResult, FormatConfig, render,
};
pub use fetch::SchemaFetcher;

// Re-export models
pub use models::{
    Attribute, AttributeType, Relationship, RelationshipType, Schema, SolutionSummary, Table,
};
