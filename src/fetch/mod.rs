//! Schema fetching
//!
//! Assembles a [`Schema`] from the metadata service:
//! 1. resolve the solution by unique name (fatal on failure)
//! 2. list the solution's table components (fatal on failure)
//! 3. fetch every table concurrently, dropping the ones that fail
//!
//! Relationship failures never drop a table; its relationship list is left empty.

pub mod relationships;

use futures::stream::{self, StreamExt};
use std::collections::HashSet;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::client::wire::{
    AttributeRecord, Collection, ComponentRecord, EntityDefinitionRecord,
    LookupRelationshipRecord, ManyToManyRecord, SolutionListRecord, SolutionRecord,
};
use crate::client::{FetchError, FetchResult, MetadataTransport, get_typed, queries};
use crate::models::{Relationship, Schema, SolutionSummary, Table};

#[cfg(feature = "api-backend")]
use crate::client::{ConnectionConfig, api::HttpTransport};

/// Table fetch parallelism when none is configured
pub const DEFAULT_MAX_CONCURRENCY: usize = 8;

/// Fetches solution metadata through a [`MetadataTransport`]
///
/// # Example
///
/// ```rust,no_run
/// use dataverse_erd::client::ConnectionConfig;
/// use dataverse_erd::fetch::SchemaFetcher;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = ConnectionConfig::new("https://contoso.crm.dynamics.com", "token");
/// let fetcher = SchemaFetcher::connect(config)?;
/// let schema = fetcher.fetch_solution("CustomerManagement").await?;
/// println!("{} tables", schema.tables.len());
/// # Ok(())
/// # }
/// ```
pub struct SchemaFetcher<T> {
    transport: T,
    max_concurrency: usize,
}

#[cfg(feature = "api-backend")]
impl SchemaFetcher<HttpTransport> {
    /// Create a fetcher bound to one environment and credential
    pub fn connect(config: ConnectionConfig) -> FetchResult<Self> {
        let transport = HttpTransport::new(&config)?;
        Ok(Self::new(transport).with_max_concurrency(config.concurrency()))
    }
}

impl<T: MetadataTransport> SchemaFetcher<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
        }
    }

    /// Set the table fetch parallelism. Zero is clamped to one.
    pub fn with_max_concurrency(mut self, max_concurrency: usize) -> Self {
        self.max_concurrency = max_concurrency.max(1);
        self
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Fetch a solution with all of its tables.
    ///
    /// Fails with [`FetchError::NotFound`] when no solution has this unique
    /// name. Tables that cannot be fetched are left out of the result.
    pub async fn fetch_solution(&self, unique_name: &str) -> FetchResult<Schema> {
        let solution = self.resolve_solution(unique_name).await?;
        info!(
            solution = %solution.uniquename,
            id = %solution.solutionid,
            "Resolved solution"
        );

        let table_ids = self.list_table_ids(solution.solutionid).await?;
        info!("Found {} table components", table_ids.len());

        let tables = self.fetch_tables(&table_ids).await;
        info!(
            "Fetched {} of {} tables for solution {}",
            tables.len(),
            table_ids.len(),
            solution.uniquename
        );

        Ok(Schema {
            display_name: solution.display_name(),
            version: solution.version(),
            publisher_prefix: solution.publisher_prefix(),
            unique_name: solution.uniquename,
            tables,
        })
    }

    /// List visible solutions, sorted by display name.
    ///
    /// Sorting ignores case; equal display names are ordered by unique name.
    pub async fn list_solutions(&self) -> FetchResult<Vec<SolutionSummary>> {
        let response: Collection<SolutionListRecord> =
            get_typed(&self.transport, &queries::visible_solutions()).await?;

        let mut solutions: Vec<SolutionSummary> =
            response.value.into_iter().map(SolutionSummary::from).collect();
        solutions.sort_by(|a, b| {
            a.display_name
                .to_lowercase()
                .cmp(&b.display_name.to_lowercase())
                .then_with(|| a.unique_name.cmp(&b.unique_name))
        });

        Ok(solutions)
    }

    async fn resolve_solution(&self, unique_name: &str) -> FetchResult<SolutionRecord> {
        let response: Collection<SolutionRecord> =
            get_typed(&self.transport, &queries::solution_by_name(unique_name)).await?;

        response
            .value
            .into_iter()
            .next()
            .ok_or_else(|| FetchError::NotFound(unique_name.to_string()))
    }

    /// Table ids of a solution, without duplicates, in service order.
    async fn list_table_ids(&self, solution_id: Uuid) -> FetchResult<Vec<Uuid>> {
        let response: Collection<ComponentRecord> =
            get_typed(&self.transport, &queries::solution_components(solution_id)).await?;

        let mut seen = HashSet::new();
        Ok(response
            .value
            .into_iter()
            .map(|c| c.objectid)
            .filter(|id| seen.insert(*id))
            .collect())
    }

    /// Fan out one fetch per table and keep the successes.
    ///
    /// Completion order decides the order of the result.
    async fn fetch_tables(&self, table_ids: &[Uuid]) -> Vec<Table> {
        let results: Vec<(Uuid, FetchResult<Table>)> = stream::iter(table_ids.iter().copied())
            .map(|id| async move { (id, self.fetch_table(id).await) })
            .buffer_unordered(self.max_concurrency)
            .collect()
            .await;

        let mut seen = HashSet::new();
        let mut tables = Vec::with_capacity(results.len());
        for (id, result) in results {
            match result {
                Ok(table) if seen.insert(table.logical_name.clone()) => tables.push(table),
                Ok(table) => {
                    warn!(table_id = %id, table = %table.logical_name, "Skipping duplicate table");
                }
                Err(e) => {
                    warn!(table_id = %id, error = %e, "Failed to fetch table metadata, skipping");
                }
            }
        }
        tables
    }

    /// Fetch one table: definition, attributes and relationships.
    pub async fn fetch_table(&self, table_id: Uuid) -> FetchResult<Table> {
        let entity_path = queries::entity_definition(table_id);
        let attributes_path = queries::entity_attributes(table_id);

        let (entity, attributes) = futures::try_join!(
            get_typed::<EntityDefinitionRecord, _>(&self.transport, &entity_path),
            get_typed::<Collection<AttributeRecord>, _>(&self.transport, &attributes_path),
        )?;

        let relationships = match self.fetch_relationships(table_id, &entity.logical_name).await {
            Ok(relationships) => relationships,
            Err(e) => {
                warn!(
                    table = %entity.logical_name,
                    error = %e,
                    "Failed to fetch relationships, continuing without them"
                );
                Vec::new()
            }
        };

        debug!(
            table = %entity.logical_name,
            attributes = attributes.value.len(),
            relationships = relationships.len(),
            "Fetched table"
        );

        Ok(Table {
            display_name: entity.display_name(),
            schema_name: entity.schema_name(),
            table_type: entity.table_type(),
            primary_id_attribute: entity.primary_id_attribute,
            primary_name_attribute: entity.primary_name_attribute,
            attributes: attributes
                .value
                .into_iter()
                .map(AttributeRecord::into_attribute)
                .collect(),
            relationships,
            logical_name: entity.logical_name,
        })
    }

    /// Fetch the three relationship collections concurrently.
    ///
    /// Any failure fails the whole list.
    async fn fetch_relationships(
        &self,
        table_id: Uuid,
        logical_name: &str,
    ) -> FetchResult<Vec<Relationship>> {
        let one_to_many_path = queries::one_to_many_relationships(table_id);
        let many_to_one_path = queries::many_to_one_relationships(table_id);
        let many_to_many_path = queries::many_to_many_relationships(table_id);

        let (one_to_many, many_to_one, many_to_many) = futures::try_join!(
            get_typed::<Collection<LookupRelationshipRecord>, _>(&self.transport, &one_to_many_path),
            get_typed::<Collection<LookupRelationshipRecord>, _>(&self.transport, &many_to_one_path),
            get_typed::<Collection<ManyToManyRecord>, _>(&self.transport, &many_to_many_path),
        )?;

        let mut collected = relationships::one_to_many(one_to_many.value, logical_name);
        collected.extend(relationships::many_to_one(many_to_one.value, logical_name));
        collected.extend(relationships::many_to_many(many_to_many.value, logical_name));
        Ok(collected)
    }
}
