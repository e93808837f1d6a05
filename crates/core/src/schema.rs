//! Page-builder schema and load-time validation of shelf definitions.
//!
//! The schema tells the page editor which values each enum property accepts.
//! Every enum list comes from the catalogs ([`ordenation_values`] for sort orders)
//! so what the editor offers is exactly what deserialization accepts.
//!
//! Validation runs once, when a shelves file is loaded. Rendering never checks
//! configuration again.

use std::collections::{BTreeMap, HashSet};

use serde::Serialize;

use crate::config::{InstallmentCriteria, PaginationDotsVisibility};
use crate::editorial::ShelvesFile;
use crate::ordenation::{OrderBy, ordenation_labels, ordenation_values};

/// Title message key of the shelf block in the page editor.
pub const SHELF_SCHEMA_TITLE: &str = "admin/editor.shelf.title";

// =============================================================================
// Component Schema
// =============================================================================

/// An enum-valued editor property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnumProperty {
    pub title: &'static str,
    #[serde(rename = "type")]
    pub kind: &'static str,
    #[serde(rename = "enum")]
    pub values: Vec<&'static str>,
    pub enum_names: Vec<&'static str>,
    pub default: &'static str,
}

/// Editor schema of the shelf block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComponentSchema {
    pub title: &'static str,
    pub properties: BTreeMap<&'static str, EnumProperty>,
}

const fn installment_label(criteria: InstallmentCriteria) -> &'static str {
    match criteria {
        InstallmentCriteria::MaxWithoutInterest => {
            "admin/editor.shelf.installmentCriteria.maxWithoutInterest"
        }
        InstallmentCriteria::MaxWithInterest => {
            "admin/editor.shelf.installmentCriteria.maxWithInterest"
        }
    }
}

const fn dots_label(visibility: PaginationDotsVisibility) -> &'static str {
    match visibility {
        PaginationDotsVisibility::Visible => "admin/editor.shelf.paginationDots.visible",
        PaginationDotsVisibility::Hidden => "admin/editor.shelf.paginationDots.hidden",
        PaginationDotsVisibility::MobileOnly => "admin/editor.shelf.paginationDots.mobileOnly",
        PaginationDotsVisibility::DesktopOnly => "admin/editor.shelf.paginationDots.desktopOnly",
    }
}

/// Build the editor schema of the shelf block.
#[must_use]
pub fn component_schema() -> ComponentSchema {
    let mut properties = BTreeMap::new();

    properties.insert(
        "orderBy",
        EnumProperty {
            title: "admin/editor.shelf.orderBy.title",
            kind: "string",
            values: ordenation_values(),
            enum_names: ordenation_labels(),
            default: OrderBy::default().wire_value(),
        },
    );

    properties.insert(
        "installmentCriteria",
        EnumProperty {
            title: "admin/editor.shelf.installmentCriteria.title",
            kind: "string",
            values: InstallmentCriteria::ALL
                .iter()
                .map(|c| c.wire_value())
                .collect(),
            enum_names: InstallmentCriteria::ALL
                .iter()
                .map(|c| installment_label(*c))
                .collect(),
            default: InstallmentCriteria::default().wire_value(),
        },
    );

    properties.insert(
        "paginationDotsVisibility",
        EnumProperty {
            title: "admin/editor.shelf.paginationDots.title",
            kind: "string",
            values: PaginationDotsVisibility::ALL
                .iter()
                .map(|v| v.wire_value())
                .collect(),
            enum_names: PaginationDotsVisibility::ALL
                .iter()
                .map(|v| dots_label(*v))
                .collect(),
            default: PaginationDotsVisibility::default().wire_value(),
        },
    );

    ComponentSchema {
        title: SHELF_SCHEMA_TITLE,
        properties,
    }
}

// =============================================================================
// Validation
// =============================================================================

/// A definition problem that makes a shelves file unusable.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// A shelf has an empty name.
    #[error("shelf #{index} has an empty name")]
    EmptyName {
        /// Position of the shelf in the file.
        index: usize,
    },
    /// Two shelves share a name.
    #[error("duplicate shelf name: {0}")]
    DuplicateName(String),
}

/// A definition that loads but will probably not do what the editor meant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaWarning {
    /// `maxItems` is zero or negative, so the shelf is always empty.
    NonPositiveMaxItems { shelf: String, max_items: i64 },
    /// `treePath` is not a string and is ignored.
    NonStringTreePath { shelf: String },
    /// A specification filter has an empty id and matches no specification.
    EmptyFilterId { shelf: String, index: usize },
    /// `trackingId` is empty, so the list name comes from the tree path.
    EmptyTrackingId { shelf: String },
}

impl std::fmt::Display for SchemaWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NonPositiveMaxItems { shelf, max_items } => write!(
                f,
                "shelf {shelf}: maxItems is {max_items}, the shelf will always be empty"
            ),
            Self::NonStringTreePath { shelf } => {
                write!(f, "shelf {shelf}: treePath is not a string and will be ignored")
            }
            Self::EmptyFilterId { shelf, index } => {
                write!(f, "shelf {shelf}: specification filter #{index} has an empty id")
            }
            Self::EmptyTrackingId { shelf } => write!(
                f,
                "shelf {shelf}: trackingId is empty, the list name falls back to the tree path"
            ),
        }
    }
}

/// Validate every shelf of a file.
///
/// # Errors
///
/// Returns the first hard error found, in file order.
pub fn validate(file: &ShelvesFile) -> Result<Vec<SchemaWarning>, SchemaError> {
    let mut seen = HashSet::new();
    let mut warnings = Vec::new();

    for (index, shelf) in file.shelves.iter().enumerate() {
        if shelf.name.trim().is_empty() {
            return Err(SchemaError::EmptyName { index });
        }

        if !seen.insert(shelf.name.as_str()) {
            return Err(SchemaError::DuplicateName(shelf.name.clone()));
        }

        let config = &shelf.config;

        warnings.extend(
            config
                .specification_filters
                .iter()
                .enumerate()
                .filter(|(_, filter)| filter.id.is_empty())
                .map(|(index, _)| SchemaWarning::EmptyFilterId {
                    shelf: shelf.name.clone(),
                    index,
                }),
        );

        if config.tracking_id.as_deref() == Some("") {
            warnings.push(SchemaWarning::EmptyTrackingId {
                shelf: shelf.name.clone(),
            });
        }

        if let Some(max_items) = config.max_items
            && max_items <= 0
        {
            warnings.push(SchemaWarning::NonPositiveMaxItems {
                shelf: shelf.name.clone(),
                max_items,
            });
        }

        if shelf.tree_path.is_some() && shelf.tree_path_str().is_none() {
            warnings.push(SchemaWarning::NonStringTreePath {
                shelf: shelf.name.clone(),
            });
        }
    }

    Ok(warnings)
}
