//! Shelves file commands.
//!
//! # Usage
//!
//! ```bash
//! # Check a shelves file before deploying it
//! shelf-cli validate shelves.yaml
//!
//! # Show the search variables every shelf will send
//! shelf-cli variables shelves.yaml
//!
//! # Only one shelf
//! shelf-cli variables shelves.yaml --shelf home-deals
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use shelf_core::{QueryOptions, SchemaWarning, ShelvesFile, build_query_options};

use super::CommandError;

/// Outcome of a successful validation.
#[derive(Debug)]
pub struct ValidationReport {
    pub shelves: usize,
    pub warnings: Vec<SchemaWarning>,
}

/// Read and parse a shelves file.
fn read_file(path: &Path) -> Result<ShelvesFile, CommandError> {
    let text = std::fs::read_to_string(path).map_err(|source| CommandError::Io {
        path: path.display().to_string(),
        source,
    })?;
    Ok(ShelvesFile::from_yaml(&text)?)
}

/// Validate a shelves file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, or a definition is invalid.
pub fn validate(path: &Path) -> Result<ValidationReport, CommandError> {
    let file = read_file(path)?;
    validate_file(&file)
}

fn validate_file(file: &ShelvesFile) -> Result<ValidationReport, CommandError> {
    let warnings = shelf_core::validate(file)?;
    Ok(ValidationReport {
        shelves: file.shelves.len(),
        warnings,
    })
}

/// Query options of every shelf (or one), as pretty JSON keyed by shelf name.
///
/// # Errors
///
/// Returns an error if the file cannot be read or `shelf` does not exist.
pub fn variables(path: &Path, shelf: Option<&str>) -> Result<String, CommandError> {
    let file = read_file(path)?;
    variables_json(&file, shelf)
}

fn variables_json(file: &ShelvesFile, shelf: Option<&str>) -> Result<String, CommandError> {
    let options: BTreeMap<&str, QueryOptions> = match shelf {
        Some(name) => {
            let definition = file
                .get(name)
                .ok_or_else(|| CommandError::UnknownShelf(name.to_string()))?;
            BTreeMap::from([(name, build_query_options(&definition.config))])
        }
        None => file
            .shelves
            .iter()
            .map(|d| (d.name.as_str(), build_query_options(&d.config)))
            .collect(),
    };

    Ok(serde_json::to_string_pretty(&options)?)
}
