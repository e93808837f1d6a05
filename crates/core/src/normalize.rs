//! Raw product to display product conversion.
//!
//! A product survives normalization only when it is buyable: at least one SKU
//! has at least one seller with stock. Everything else is dropped silently.

use std::sync::Arc;

use rust_decimal::Decimal;

use crate::product::{
    Installment, NormalizedProduct, NormalizedSku, ProductImage, RawImage, RawInstallment,
    RawItem, RawProduct, RawSeller,
};

/// Convert a search API float amount to a two-place decimal.
///
/// Amounts outside the decimal range saturate instead of reading as zero;
/// NaN becomes zero.
fn money(amount: f64) -> Decimal {
    if let Some(value) = Decimal::from_f64_retain(amount) {
        return value.round_dp(2);
    }

    tracing::debug!(amount, "Amount out of decimal range");
    if amount.is_nan() {
        Decimal::ZERO
    } else if amount.is_sign_negative() {
        Decimal::MIN
    } else {
        Decimal::MAX
    }
}

fn convert_image(image: &RawImage) -> ProductImage {
    ProductImage {
        url: image.image_url.clone(),
        alt: image.image_label.clone().unwrap_or_default(),
    }
}

fn convert_installment(installment: &RawInstallment) -> Installment {
    Installment {
        count: installment.number_of_installments,
        value: money(installment.value),
        interest_rate: money(installment.interest_rate),
        total: money(installment.total_value_plus_interest_rate),
    }
}

/// Keep only the sellers with stock; `None` when none are left.
fn buyable_item(item: &RawItem) -> Option<RawItem> {
    let sellers: Vec<RawSeller> = item
        .sellers
        .as_deref()?
        .iter()
        .filter(|seller| seller.is_available())
        .cloned()
        .collect();

    if sellers.is_empty() {
        return None;
    }

    Some(RawItem {
        sellers: Some(sellers),
        ..item.clone()
    })
}

fn convert_sku(item: &RawItem) -> Option<NormalizedSku> {
    let seller = item.sellers.as_deref()?.first()?;
    let offer = seller.commertial_offer.as_ref()?;

    Some(NormalizedSku {
        item_id: item.item_id.clone(),
        name: item.name.clone(),
        image: item.images.first().map(convert_image),
        seller_id: seller.seller_id.clone(),
        price: money(offer.price),
        list_price: money(offer.list_price),
        available_quantity: offer.available_quantity,
        installments: offer.installments.iter().map(convert_installment).collect(),
    })
}

/// Normalize one product, or `None` if it cannot be bought.
#[must_use]
pub fn normalize_buyable(product: &RawProduct) -> Option<NormalizedProduct> {
    let items: Vec<RawItem> = product
        .items
        .as_deref()?
        .iter()
        .filter_map(buyable_item)
        .collect();

    let sku = convert_sku(items.first()?)?;

    Some(NormalizedProduct {
        product_id: product.product_id.clone(),
        product_name: product.product_name.clone(),
        brand: product.brand.clone(),
        link_text: product.link_text.clone(),
        link: format!("/{}/p", product.link_text),
        description: product.description.clone(),
        categories: product.categories.clone(),
        sku,
        items,
    })
}

/// Normalize a product sequence in one pass, keeping relative order.
#[must_use]
pub fn normalize_products(products: &[RawProduct]) -> Vec<NormalizedProduct> {
    products.iter().filter_map(normalize_buyable).collect()
}

/// Single-entry cache of the last normalized sequence.
///
/// Keyed by the identity of the raw sequence (`Arc` pointer), not its
/// contents: handing in the same `Arc` again is a hit, anything else
/// recomputes and replaces the entry.
#[derive(Debug, Default)]
pub struct ProductMemo {
    entry: Option<(Arc<[RawProduct]>, Arc<[NormalizedProduct]>)>,
    computations: u64,
}

impl ProductMemo {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalized products for `raw`, recomputed only when `raw` is a new sequence.
    pub fn normalize(
        &mut self,
        raw: Option<&Arc<[RawProduct]>>,
    ) -> Option<Arc<[NormalizedProduct]>> {
        let raw = raw?;

        if let Some((cached_raw, cached)) = &self.entry
            && Arc::ptr_eq(cached_raw, raw)
        {
            return Some(Arc::clone(cached));
        }

        let normalized: Arc<[NormalizedProduct]> = normalize_products(raw).into();
        self.computations += 1;
        self.entry = Some((Arc::clone(raw), Arc::clone(&normalized)));
        Some(normalized)
    }

    /// How many times the sequence has actually been normalized.
    #[must_use]
    pub const fn computations(&self) -> u64 {
        self.computations
    }

    /// Whether nothing has been cached yet.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entry.is_none()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use std::str::FromStr;

    use super::*;
    use crate::config::InstallmentCriteria;
    use crate::fixtures::raw_product;

    #[test]
    fn test_money_rounds_to_cents() {
        assert_eq!(money(19.999).to_string(), "20.00");
        assert_eq!(money(5.0), Decimal::new(5, 0));
    }

    #[test]
    fn test_money_out_of_range_saturates() {
        assert_eq!(money(1e30), Decimal::MAX);
        assert_eq!(money(f64::INFINITY), Decimal::MAX);
        assert_eq!(money(-1e30), Decimal::MIN);
        assert_eq!(money(f64::NAN), Decimal::ZERO);
    }

    #[test]
    fn test_normalize_buyable_product() {
        let product = normalize_buyable(&raw_product("1", &[5])).unwrap();
        assert_eq!(product.product_id, "1");
        assert_eq!(product.link, "/product-1/p");
        assert_eq!(product.sku.item_id, "1-1");
        assert_eq!(product.sku.seller_id, "seller-0");
        assert_eq!(product.sku.price, Decimal::from_str("79.90").unwrap());
        assert_eq!(product.sku.list_price, Decimal::from_str("99.90").unwrap());
        assert!(product.sku.has_discount());
        assert_eq!(
            product.sku.image.as_ref().map(|i| i.url.as_str()),
            Some("https://cdn.example.com/1.jpg")
        );
    }

    #[test]
    fn test_unavailable_product_is_rejected() {
        assert!(normalize_buyable(&raw_product("1", &[0])).is_none());
        assert!(normalize_buyable(&raw_product("1", &[])).is_none());
    }

    #[test]
    fn test_product_without_items_is_rejected() {
        let mut product = raw_product("1", &[3]);
        product.items = None;
        assert!(normalize_buyable(&product).is_none());
        product.items = Some(Vec::new());
        assert!(normalize_buyable(&product).is_none());
    }

    #[test]
    fn test_unavailable_sellers_are_dropped() {
        let product = normalize_buyable(&raw_product("1", &[0, 2, 0, 4])).unwrap();
        let sellers = product.items[0].sellers.as_ref().unwrap();
        let ids: Vec<&str> = sellers.iter().map(|s| s.seller_id.as_str()).collect();
        assert_eq!(ids, vec!["seller-1", "seller-3"]);
        assert_eq!(product.sku.seller_id, "seller-1");
    }

    #[test]
    fn test_normalize_products_keeps_buyable_in_order() {
        let raw = vec![
            raw_product("a", &[1]),
            raw_product("b", &[0]),
            raw_product("c", &[2]),
            raw_product("d", &[]),
            raw_product("e", &[9]),
        ];
        let ids: Vec<String> = normalize_products(&raw)
            .into_iter()
            .map(|p| p.product_id)
            .collect();
        assert_eq!(ids, vec!["a", "c", "e"]);
    }

    #[test]
    fn test_normalize_empty_sequence() {
        assert!(normalize_products(&[]).is_empty());
    }

    #[test]
    fn test_installment_selection() {
        let product = normalize_buyable(&raw_product("1", &[1])).unwrap();
        let free = product
            .installment(InstallmentCriteria::MaxWithoutInterest)
            .unwrap();
        assert_eq!(free.count, 3);
        assert!(free.is_interest_free());

        let any = product
            .installment(InstallmentCriteria::MaxWithInterest)
            .unwrap();
        assert_eq!(any.count, 6);
        assert_eq!(any.total, Decimal::from_str("85.20").unwrap());
    }

    #[test]
    fn test_memo_reuses_same_sequence() {
        let raw: Arc<[RawProduct]> = vec![raw_product("a", &[1]), raw_product("b", &[0])].into();
        let mut memo = ProductMemo::new();
        assert!(memo.is_empty());

        let first = memo.normalize(Some(&raw)).unwrap();
        let second = memo.normalize(Some(&Arc::clone(&raw))).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(memo.computations(), 1);
        assert_eq!(first.len(), 1);
    }

    #[test]
    fn test_memo_recomputes_for_new_sequence() {
        let mut memo = ProductMemo::new();
        let raw_a: Arc<[RawProduct]> = vec![raw_product("a", &[1])].into();
        // Same contents, different allocation
        let raw_b: Arc<[RawProduct]> = vec![raw_product("a", &[1])].into();

        let first = memo.normalize(Some(&raw_a)).unwrap();
        let second = memo.normalize(Some(&raw_b)).unwrap();
        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(memo.computations(), 2);

        // Only one entry is held: going back to the first sequence recomputes
        memo.normalize(Some(&raw_a));
        assert_eq!(memo.computations(), 3);
    }

    #[test]
    fn test_memo_absent_sequence() {
        let mut memo = ProductMemo::new();
        assert!(memo.normalize(None).is_none());
        assert!(memo.is_empty());
        assert_eq!(memo.computations(), 0);
    }
}
