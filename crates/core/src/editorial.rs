//! Editorial shelf file.
//!
//! The file lists every shelf a page can render:
//!
//! ```yaml
//! shelves:
//!   - name: deals
//!     treePath: store.home/shelf#deals
//!     config:
//!       category: 25
//!       maxItems: 8
//! ```

use serde::{Deserialize, Serialize};

use crate::config::ShelfConfig;

/// Errors that can occur when reading a shelves file.
#[derive(thiserror::Error, Debug)]
pub enum EditorialError {
    /// The document is not valid YAML or does not match the shelf layout.
    #[error("invalid shelves file: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Every shelf of a store.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ShelvesFile {
    #[serde(default)]
    pub shelves: Vec<ShelfDefinition>,
}

impl ShelvesFile {
    /// Parse a shelves file from YAML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not YAML or a shelf config carries an
    /// unknown field.
    pub fn from_yaml(text: &str) -> Result<Self, EditorialError> {
        Ok(serde_yaml::from_str(text)?)
    }

    /// Look up a shelf by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ShelfDefinition> {
        self.shelves.iter().find(|shelf| shelf.name == name)
    }
}

/// One named shelf and where it sits in the page tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShelfDefinition {
    pub name: String,
    /// Page-tree path. Kept as any value so a misconfigured path (a number, a
    /// list) still loads and simply counts as absent.
    #[serde(default, rename = "treePath", skip_serializing_if = "Option::is_none")]
    pub tree_path: Option<serde_json::Value>,
    #[serde(default)]
    pub config: ShelfConfig,
}

impl ShelfDefinition {
    /// The page-tree path when it is a string.
    #[must_use]
    pub fn tree_path_str(&self) -> Option<&str> {
        self.tree_path.as_ref().and_then(serde_json::Value::as_str)
    }
}
