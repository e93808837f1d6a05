//! Product records: raw search results and their display-ready form.
//!
//! Raw types follow the search API field names (including the upper-case
//! offer fields and the `commertialOffer` spelling). Normalized types are what
//! the product list renders.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::InstallmentCriteria;

// =============================================================================
// Raw Types
// =============================================================================

/// A product as returned by the search API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawProduct {
    pub product_id: String,
    pub product_name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub link_text: String,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub categories: Vec<String>,
    /// SKUs. `None` when the search returned no item data.
    #[serde(default)]
    pub items: Option<Vec<RawItem>>,
}

/// A SKU of a raw product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawItem {
    pub item_id: String,
    pub name: String,
    #[serde(default)]
    pub images: Vec<RawImage>,
    #[serde(default)]
    pub sellers: Option<Vec<RawSeller>>,
}

/// A SKU image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawImage {
    #[serde(default)]
    pub image_id: Option<String>,
    pub image_url: String,
    #[serde(default)]
    pub image_label: Option<String>,
}

/// A seller offering a SKU.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSeller {
    pub seller_id: String,
    #[serde(default)]
    pub seller_name: Option<String>,
    #[serde(default)]
    pub commertial_offer: Option<RawOffer>,
}

impl RawSeller {
    /// Whether the seller has stock to sell.
    #[must_use]
    pub fn is_available(&self) -> bool {
        self.commertial_offer
            .as_ref()
            .is_some_and(|offer| offer.available_quantity > 0)
    }
}

/// Commercial offer of a seller for a SKU.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RawOffer {
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub list_price: f64,
    #[serde(default)]
    pub available_quantity: i64,
    #[serde(default)]
    pub installments: Vec<RawInstallment>,
}

/// An installment option of an offer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RawInstallment {
    pub value: f64,
    #[serde(default)]
    pub interest_rate: f64,
    #[serde(default)]
    pub total_value_plus_interest_rate: f64,
    pub number_of_installments: i64,
    #[serde(default)]
    pub name: Option<String>,
}

// =============================================================================
// Normalized Types
// =============================================================================

/// Product image ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductImage {
    pub url: String,
    pub alt: String,
}

/// Installment option with decimal amounts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Installment {
    pub count: i64,
    pub value: Decimal,
    pub interest_rate: Decimal,
    pub total: Decimal,
}

impl Installment {
    #[must_use]
    pub fn is_interest_free(&self) -> bool {
        self.interest_rate.is_zero()
    }
}

/// The SKU a product tile shows: first buyable SKU, first seller with stock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedSku {
    pub item_id: String,
    pub name: String,
    pub image: Option<ProductImage>,
    pub seller_id: String,
    pub price: Decimal,
    pub list_price: Decimal,
    pub available_quantity: i64,
    pub installments: Vec<Installment>,
}

impl NormalizedSku {
    /// Whether the list price is above the selling price.
    #[must_use]
    pub fn has_discount(&self) -> bool {
        self.list_price > self.price
    }
}

/// A buyable product, ready for the product list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedProduct {
    pub product_id: String,
    pub product_name: String,
    pub brand: Option<String>,
    pub link_text: String,
    /// Product page path (`/{linkText}/p`).
    pub link: String,
    pub description: Option<String>,
    pub categories: Vec<String>,
    pub sku: NormalizedSku,
    /// Buyable SKUs, each keeping only sellers with stock.
    pub items: Vec<RawItem>,
}

impl NormalizedProduct {
    /// The installment option to display for the given criteria.
    #[must_use]
    pub fn installment(&self, criteria: InstallmentCriteria) -> Option<&Installment> {
        let candidates = self.sku.installments.iter();
        match criteria {
            InstallmentCriteria::MaxWithoutInterest => candidates
                .filter(|i| i.is_interest_free())
                .max_by_key(|i| i.count),
            InstallmentCriteria::MaxWithInterest => candidates.max_by_key(|i| i.count),
        }
    }
}
