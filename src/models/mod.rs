//! Schema model
//!
//! Defines the in-memory schema model produced by the fetcher and consumed by
//! the diagram exporters. A `Schema` is built once per fetch and never mutated
//! afterwards.

pub mod attribute;
pub mod relationship;
pub mod schema;
pub mod table;

pub use attribute::{Attribute, AttributeType};
pub use relationship::{Relationship, RelationshipType};
pub use schema::{Schema, SolutionSummary};
pub use table::Table;
