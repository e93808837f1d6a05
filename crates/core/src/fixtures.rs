//! Raw product builders shared by unit tests.

#![allow(clippy::unwrap_used)]

use serde_json::json;

use crate::product::RawProduct;

/// A one-SKU product with one seller per entry in `quantities`.
pub fn raw_product(id: &str, quantities: &[i64]) -> RawProduct {
    let sellers: Vec<serde_json::Value> = quantities
        .iter()
        .enumerate()
        .map(|(i, qty)| {
            json!({
                "sellerId": format!("seller-{i}"),
                "commertialOffer": {
                    "Price": 79.9,
                    "ListPrice": 99.9,
                    "AvailableQuantity": qty,
                    "Installments": [
                        { "Value": 79.9, "InterestRate": 0, "TotalValuePlusInterestRate": 79.9, "NumberOfInstallments": 1 },
                        { "Value": 26.63, "InterestRate": 0, "TotalValuePlusInterestRate": 79.9, "NumberOfInstallments": 3 },
                        { "Value": 14.2, "InterestRate": 1.99, "TotalValuePlusInterestRate": 85.2, "NumberOfInstallments": 6 }
                    ]
                }
            })
        })
        .collect();

    serde_json::from_value(json!({
        "productId": id,
        "productName": format!("Product {id}"),
        "linkText": format!("product-{id}"),
        "brand": "Acme",
        "categories": ["/Apparel/"],
        "items": [{
            "itemId": format!("{id}-1"),
            "name": "Default",
            "images": [{ "imageUrl": format!("https://cdn.example.com/{id}.jpg"), "imageLabel": "front" }],
            "sellers": sellers
        }]
    }))
    .unwrap()
}
