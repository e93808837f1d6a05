//! GraphQL query definitions for the product search.
//!
//! The search schema is not vendored, so the `Products` operation implements
//! [`GraphQLQuery`] by hand: variables and response data are the core types.

use graphql_client::{GraphQLQuery, QueryBody};
use serde::Deserialize;
use shelf_core::{QueryVariables, RawProduct};

/// Query text of the `Products` operation.
pub const PRODUCTS_QUERY: &str = include_str!("../../graphql/products.graphql");

/// Operation name of [`PRODUCTS_QUERY`].
pub const PRODUCTS_OPERATION: &str = "Products";

/// Products of one shelf window.
pub struct ShelfProducts;

/// Response data of [`ShelfProducts`].
#[derive(Debug, Clone, Deserialize)]
pub struct ProductsData {
    #[serde(default)]
    pub products: Option<Vec<RawProduct>>,
}

impl GraphQLQuery for ShelfProducts {
    type Variables = QueryVariables;
    type ResponseData = ProductsData;

    fn build_query(variables: Self::Variables) -> QueryBody<Self::Variables> {
        QueryBody {
            variables,
            query: PRODUCTS_QUERY,
            operation_name: PRODUCTS_OPERATION,
        }
    }
}
