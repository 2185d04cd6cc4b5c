//! Output formatting for CLI

use std::path::{Path, PathBuf};

use crate::cli::error::CliError;
use crate::export::ExportResult;
use crate::models::{Schema, SolutionSummary};

/// Format the solution list as aligned columns
pub fn format_solution_list(solutions: &[SolutionSummary]) -> String {
    if solutions.is_empty() {
        return "No visible solutions found.\n".to_string();
    }

    let name_width = solutions
        .iter()
        .map(|s| s.unique_name.chars().count())
        .max()
        .unwrap_or(0)
        .max("UNIQUE NAME".len());
    let version_width = solutions
        .iter()
        .map(|s| s.version.chars().count())
        .max()
        .unwrap_or(0)
        .max("VERSION".len());

    let mut output = format!(
        "{:<name_width$}  {:<version_width$}  DISPLAY NAME\n",
        "UNIQUE NAME", "VERSION"
    );
    for solution in solutions {
        output.push_str(&format!(
            "{:<name_width$}  {:<version_width$}  {}\n",
            solution.unique_name, solution.version, solution.display_name
        ));
    }
    output.push_str(&format!("\n{} solution(s)\n", solutions.len()));
    output
}

/// One-line summary of a fetched schema, printed to stderr
pub fn format_schema_summary(schema: &Schema) -> String {
    let relationships: usize = schema.tables.iter().map(|t| t.relationships.len()).sum();
    format!(
        "Fetched {} ({}): {} table(s), {} relationship(s)",
        schema.display_name,
        schema.unique_name,
        schema.tables.len(),
        relationships
    )
}

/// Write a rendered diagram.
///
/// When `target` is an existing directory the suggested file name is used
/// inside it. Returns the path written.
pub fn write_diagram(result: &ExportResult, target: &Path) -> Result<PathBuf, CliError> {
    let path = if target.is_dir() {
        target.join(&result.file_name)
    } else {
        target.to_path_buf()
    };

    std::fs::write(&path, &result.content)
        .map_err(|e| CliError::FileWriteError(path.clone(), e.to_string()))?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::DiagramFormat;

    fn summary(unique: &str, display: &str, version: &str) -> SolutionSummary {
        SolutionSummary {
            unique_name: unique.to_string(),
            display_name: display.to_string(),
            version: version.to_string(),
        }
    }

    fn sample_result() -> ExportResult {
        ExportResult {
            content: "erDiagram\n".to_string(),
            format: DiagramFormat::Mermaid,
            file_name: "CustomerManagement.mmd".to_string(),
        }
    }

    #[test]
    fn test_format_solution_list_aligns_columns() {
        let output = format_solution_list(&[
            summary("CustomerManagement", "Customer Management", "1.0.0.0"),
            summary("Sales", "Sales", "2.1.0.0"),
        ]);
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines[0], "UNIQUE NAME         VERSION  DISPLAY NAME");
        assert_eq!(lines[1], "CustomerManagement  1.0.0.0  Customer Management");
        assert_eq!(lines[2], "Sales               2.1.0.0  Sales");
        assert!(output.ends_with("2 solution(s)\n"));
    }

    #[test]
    fn test_format_solution_list_empty() {
        assert_eq!(format_solution_list(&[]), "No visible solutions found.\n");
    }

    #[test]
    fn test_write_diagram_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("out.mmd");

        let written = write_diagram(&sample_result(), &target).unwrap();
        assert_eq!(written, target);
        assert_eq!(std::fs::read_to_string(&target).unwrap(), "erDiagram\n");
    }

    #[test]
    fn test_write_diagram_into_directory_uses_suggested_name() {
        let dir = tempfile::tempdir().unwrap();

        let written = write_diagram(&sample_result(), dir.path()).unwrap();
        assert_eq!(written, dir.path().join("CustomerManagement.mmd"));
        assert!(written.exists());
    }

    #[test]
    fn test_write_diagram_reports_path_on_failure() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("missing").join("out.mmd");

        let err = write_diagram(&sample_result(), &target).unwrap_err();
        assert!(matches!(err, CliError::FileWriteError(path, _) if path == target));
    }
}
