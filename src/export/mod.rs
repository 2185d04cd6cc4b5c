//! Export functionality
//!
//! Renders a [`Schema`] as an entity-relationship diagram in one of:
//! - Mermaid (`erDiagram`)
//! - PlantUML (IE notation entities)
//! - Graphviz DOT (record nodes)
//!
//! Rendering is pure: no I/O, no state between calls, and the same schema and
//! config always produce the same text.

pub mod edges;
pub mod graphviz;
pub mod identifier;
pub mod mermaid;
pub mod plantuml;
pub mod render;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::models::Schema;

pub use graphviz::GraphvizSyntax;
pub use identifier::sanitize_identifier;
pub use mermaid::MermaidSyntax;
pub use plantuml::PlantUmlSyntax;
pub use render::DiagramSyntax;

/// Error during export
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("Unknown diagram format: {0} (expected mermaid, plantuml or graphviz)")]
    UnknownFormat(String),
}

/// Target diagram notation
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum DiagramFormat {
    #[default]
    Mermaid,
    PlantUml,
    Graphviz,
}

impl DiagramFormat {
    pub const ALL: [DiagramFormat; 3] = [
        DiagramFormat::Mermaid,
        DiagramFormat::PlantUml,
        DiagramFormat::Graphviz,
    ];

    /// File extension for saved diagrams
    pub fn file_extension(&self) -> &'static str {
        match self {
            DiagramFormat::Mermaid => "mmd",
            DiagramFormat::PlantUml => "puml",
            DiagramFormat::Graphviz => "dot",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DiagramFormat::Mermaid => "mermaid",
            DiagramFormat::PlantUml => "plantuml",
            DiagramFormat::Graphviz => "graphviz",
        }
    }

    fn syntax(&self) -> &'static dyn DiagramSyntax {
        match self {
            DiagramFormat::Mermaid => &MermaidSyntax,
            DiagramFormat::PlantUml => &PlantUmlSyntax,
            DiagramFormat::Graphviz => &GraphvizSyntax,
        }
    }
}

impl fmt::Display for DiagramFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DiagramFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mermaid" | "mmd" => Ok(DiagramFormat::Mermaid),
            "plantuml" | "puml" => Ok(DiagramFormat::PlantUml),
            "graphviz" | "dot" => Ok(DiagramFormat::Graphviz),
            _ => Err(ExportError::UnknownFormat(s.to_string())),
        }
    }
}

/// Rendering options
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FormatConfig {
    /// Target notation
    #[serde(default)]
    pub format: DiagramFormat,

    /// Emit attribute lines inside entity blocks
    #[serde(default = "default_true")]
    pub include_attributes: bool,

    /// Emit relationship lines
    #[serde(default = "default_true")]
    pub include_relationships: bool,

    /// Emit at most this many attributes per entity
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_attributes: Option<usize>,
}

fn default_true() -> bool {
    true
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self::new(DiagramFormat::default())
    }
}

impl FormatConfig {
    pub fn new(format: DiagramFormat) -> Self {
        Self {
            format,
            include_attributes: true,
            include_relationships: true,
            max_attributes: None,
        }
    }

    pub fn with_attributes(mut self, include: bool) -> Self {
        self.include_attributes = include;
        self
    }

    pub fn with_relationships(mut self, include: bool) -> Self {
        self.include_relationships = include;
        self
    }

    pub fn with_max_attributes(mut self, max: usize) -> Self {
        self.max_attributes = Some(max);
        self
    }
}

/// Result of an export operation
#[derive(Debug, Clone, PartialEq)]
pub struct ExportResult {
    /// Diagram source text
    pub content: String,
    /// Notation of `content`
    pub format: DiagramFormat,
    /// Suggested file name, `{solution unique name}.{extension}`
    pub file_name: String,
}

/// Render `schema` as diagram text.
///
/// # Example
///
/// ```rust
/// use dataverse_erd::export::{render, DiagramFormat, FormatConfig};
/// use dataverse_erd::models::{Schema, Table};
///
/// let schema = Schema::new("Demo", vec![Table::new("account")]);
/// let text = render(&schema, &FormatConfig::new(DiagramFormat::Mermaid));
/// assert!(text.starts_with("erDiagram"));
/// ```
pub fn render(schema: &Schema, config: &FormatConfig) -> String {
    render::render_document(config.format.syntax(), schema, config)
}

/// Exporter bound to one [`FormatConfig`]
#[derive(Debug, Clone, Default)]
pub struct DiagramExporter {
    config: FormatConfig,
}

impl DiagramExporter {
    pub fn new(config: FormatConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FormatConfig {
        &self.config
    }

    pub fn render(&self, schema: &Schema) -> String {
        render(schema, &self.config)
    }

    /// Render and attach a suggested file name.
    pub fn export(&self, schema: &Schema) -> ExportResult {
        ExportResult {
            content: self.render(schema),
            format: self.config.format,
            file_name: suggested_file_name(schema, self.config.format),
        }
    }
}

/// `{solution unique name}.{extension}`, with the name made file-system safe.
pub fn suggested_file_name(schema: &Schema, format: DiagramFormat) -> String {
    let stem: String = schema
        .unique_name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' || c == '-' { c } else { '_' })
        .collect();
    let stem = if stem.is_empty() { "diagram".to_string() } else { stem };
    format!("{}.{}", stem, format.file_extension())
}
