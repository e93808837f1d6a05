//! Configured shelves, loaded once at startup.
//!
//! Each shelf keeps its own [`Shelf`] (and so its own normalization memo)
//! behind a mutex. The lock is only held for the synchronous render step.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Mutex;

use shelf_core::{
    EditorialError, QueryOptions, RenderContext, SchemaError, Shelf, ShelfDefinition,
    ShelfQueryResult, ShelfView, ShelvesFile,
};
use thiserror::Error;

/// Errors that can occur when loading the shelves file.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// The file could not be read.
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The file is not a valid shelves document.
    #[error(transparent)]
    Editorial(#[from] EditorialError),

    /// A shelf definition is unusable.
    #[error("Invalid shelf definition: {0}")]
    Schema(#[from] SchemaError),
}

/// A configured shelf and its render state.
#[derive(Debug)]
pub struct ShelfEntry {
    definition: ShelfDefinition,
    shelf: Mutex<Shelf>,
}

/// The shelf state was poisoned by a panic during an earlier render.
#[derive(Debug, Error)]
#[error("shelf {0} state is poisoned")]
pub struct PoisonedShelf(pub String);

impl ShelfEntry {
    fn new(definition: ShelfDefinition) -> Self {
        let shelf = Shelf::new(definition.config.clone());
        Self {
            definition,
            shelf: Mutex::new(shelf),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.definition.name
    }

    #[must_use]
    pub fn tree_path(&self) -> Option<&str> {
        self.definition.tree_path_str()
    }

    /// Render context for this shelf on the given device.
    #[must_use]
    pub fn context(&self, is_mobile: bool) -> RenderContext {
        RenderContext {
            is_mobile,
            tree_path: self.tree_path().map(str::to_string),
        }
    }

    /// Query options of this shelf.
    #[must_use]
    pub fn query_options(&self) -> QueryOptions {
        shelf_core::build_query_options(&self.definition.config)
    }

    /// Render the shelf from a resolved query result.
    ///
    /// # Errors
    ///
    /// Returns an error if a previous render panicked while holding the lock.
    pub fn render(
        &self,
        result: &ShelfQueryResult,
        ctx: &RenderContext,
    ) -> Result<ShelfView, PoisonedShelf> {
        let mut shelf = self
            .shelf
            .lock()
            .map_err(|_| PoisonedShelf(self.name().to_string()))?;
        Ok(shelf.render(result, ctx))
    }
}

/// Every configured shelf, by name.
#[derive(Debug, Default)]
pub struct ShelfRegistry {
    shelves: BTreeMap<String, ShelfEntry>,
}

impl ShelfRegistry {
    /// Load and validate a shelves file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated.
    pub fn load(path: &Path) -> Result<Self, RegistryError> {
        let text = std::fs::read_to_string(path).map_err(|source| RegistryError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml(&text)
    }

    /// Build a registry from YAML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a valid shelves file.
    pub fn from_yaml(text: &str) -> Result<Self, RegistryError> {
        Self::from_file(ShelvesFile::from_yaml(text)?)
    }

    /// Build a registry from a parsed shelves file. Validation warnings are logged.
    ///
    /// # Errors
    ///
    /// Returns an error if a shelf definition is invalid.
    pub fn from_file(file: ShelvesFile) -> Result<Self, RegistryError> {
        let warnings = shelf_core::validate(&file)?;
        for warning in &warnings {
            tracing::warn!(%warning, "Shelf definition warning");
        }

        let shelves = file
            .shelves
            .into_iter()
            .map(|definition| (definition.name.clone(), ShelfEntry::new(definition)))
            .collect();

        Ok(Self { shelves })
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ShelfEntry> {
        self.shelves.get(name)
    }

    /// Shelves in name order.
    pub fn iter(&self) -> impl Iterator<Item = &ShelfEntry> {
        self.shelves.values()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.shelves.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.shelves.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const SHELVES: &str = r"
shelves:
  - name: new-in
    config:
      orderBy: OrderByReleaseDateDESC
  - name: deals
    treePath: store.home/shelf#deals
    config:
      maxItems: 4
";

    #[test]
    fn test_from_yaml_orders_by_name() {
        let registry = ShelfRegistry::from_yaml(SHELVES).unwrap();
        assert_eq!(registry.len(), 2);
        let names: Vec<&str> = registry.iter().map(ShelfEntry::name).collect();
        assert_eq!(names, vec!["deals", "new-in"]);
    }

    #[test]
    fn test_entry_context_and_options() {
        let registry = ShelfRegistry::from_yaml(SHELVES).unwrap();
        let deals = registry.get("deals").unwrap();
        let ctx = deals.context(true);
        assert!(ctx.is_mobile);
        assert_eq!(ctx.tree_path.as_deref(), Some("store.home/shelf#deals"));
        assert_eq!(deals.query_options().variables.to, 3);
        assert!(registry.get("missing").is_none());
    }

    #[test]
    fn test_render_loading() {
        let registry = ShelfRegistry::from_yaml(SHELVES).unwrap();
        let entry = registry.get("new-in").unwrap();
        let view = entry
            .render(&ShelfQueryResult::loading(), &entry.context(false))
            .unwrap();
        assert!(matches!(view, ShelfView::Loading));
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let err = ShelfRegistry::from_yaml("shelves:\n  - name: a\n  - name: a\n").unwrap_err();
        assert!(matches!(err, RegistryError::Schema(SchemaError::DuplicateName(_))));
    }

    #[test]
    fn test_cleared_fields_load_with_fallbacks() {
        let registry = ShelfRegistry::from_yaml(
            "shelves:\n  - name: a\n    treePath: store.home/shelf#a\n    config:\n      trackingId: ''\n      specificationFilters:\n        - { id: '', value: x }\n",
        )
        .unwrap();
        let entry = registry.get("a").unwrap();

        assert_eq!(
            entry.query_options().variables.specification_filters,
            vec!["specificationFilter_:x".to_string()]
        );

        let view = entry
            .render(
                &ShelfQueryResult::ready(std::sync::Arc::from(Vec::new())),
                &entry.context(false),
            )
            .unwrap();
        match view {
            ShelfView::List(provider) => assert_eq!(provider.list_name, "shelf#a"),
            other => panic!("expected a list, got {other:?}"),
        }
    }

    #[test]
    fn test_invalid_yaml_rejected() {
        let err = ShelfRegistry::from_yaml("shelves: [").unwrap_err();
        assert!(matches!(err, RegistryError::Editorial(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = ShelfRegistry::load(Path::new("/nonexistent/shelves.yaml")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/shelves.yaml"));
    }
}
