//! Catalog route handlers.
//!
//! Listing endpoints share one query shape; tag filters are comma separated
//! (`?styles=Kundan,Pearl&sort=price-low&visible=24`).

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use nurvi_core::catalog::{Listing, PAGE_SIZE};
use nurvi_core::{Category, Price, Product, ProductId, ProductPage, ProductQuery, SortOrder};

use crate::error::{AppError, Result};
use crate::state::AppState;

const MAX_SEARCH_RESULTS: usize = 20;
const FEATURED_COUNT: usize = 8;

/// Raw listing query string.
#[derive(Debug, Default, Deserialize)]
pub struct ListingParams {
    pub category: Option<String>,
    pub min_price: Option<i64>,
    pub max_price: Option<i64>,
    pub styles: Option<String>,
    pub materials: Option<String>,
    pub occasions: Option<String>,
    pub sort: Option<String>,
    pub visible: Option<usize>,
}

impl ListingParams {
    /// Validate into a catalog query.
    ///
    /// # Errors
    ///
    /// Returns `AppError::BadRequest` for an unknown category or sort order,
    /// or an inverted price range.
    pub fn into_query(self) -> Result<ProductQuery> {
        let category = self
            .category
            .filter(|c| !c.trim().is_empty() && !c.eq_ignore_ascii_case("all"))
            .map(|c| c.parse::<Category>())
            .transpose()
            .map_err(AppError::BadRequest)?;
        let sort = self
            .sort
            .map(|s| s.parse::<SortOrder>())
            .transpose()
            .map_err(AppError::BadRequest)?
            .unwrap_or_default();

        if matches!((self.min_price, self.max_price), (Some(min), Some(max)) if min > max) {
            return Err(AppError::BadRequest(
                "min_price must not exceed max_price".to_string(),
            ));
        }

        Ok(ProductQuery {
            category,
            min_price: self.min_price.map(Price::from_rupees),
            max_price: self.max_price.map(Price::from_rupees),
            styles: split_list(self.styles.as_deref()),
            materials: split_list(self.materials.as_deref()),
            occasions: split_list(self.occasions.as_deref()),
            sort,
            visible: Some(self.visible.unwrap_or(PAGE_SIZE).max(1)),
        })
    }
}

fn split_list(raw: Option<&str>) -> Vec<String> {
    raw.map(|s| {
        s.split(',')
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(String::from)
            .collect()
    })
    .unwrap_or_default()
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
}

#[derive(Debug, Serialize)]
pub struct ProductsResponse {
    pub products: Vec<Product>,
}

fn list(state: &AppState, listing: Listing, params: ListingParams) -> Result<Json<ProductPage>> {
    let query = params.into_query()?;
    Ok(Json(state.catalog().query(listing, &query)))
}

/// GET /api/products
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(params): Query<ListingParams>,
) -> Result<Json<ProductPage>> {
    list(&state, Listing::Collections, params)
}

/// GET /api/rings
#[instrument(skip(state))]
pub async fn rings(
    State(state): State<AppState>,
    Query(params): Query<ListingParams>,
) -> Result<Json<ProductPage>> {
    list(&state, Listing::Rings, params)
}

/// GET /api/earrings
#[instrument(skip(state))]
pub async fn earrings(
    State(state): State<AppState>,
    Query(params): Query<ListingParams>,
) -> Result<Json<ProductPage>> {
    list(&state, Listing::Earrings, params)
}

/// GET /api/products/{id}
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Product>> {
    let id = ProductId::new(id);
    state
        .catalog()
        .get(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Product {id}")))
}

/// GET /api/products/featured
#[instrument(skip(state))]
pub async fn featured(State(state): State<AppState>) -> Json<ProductsResponse> {
    Json(ProductsResponse {
        products: state
            .catalog()
            .featured(FEATURED_COUNT)
            .into_iter()
            .cloned()
            .collect(),
    })
}

/// GET /api/search?q=
///
/// Fewer than three characters returns an empty list.
#[instrument(skip(state))]
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Json<ProductsResponse> {
    Json(ProductsResponse {
        products: state
            .catalog()
            .search(&params.q, MAX_SEARCH_RESULTS)
            .into_iter()
            .cloned()
            .collect(),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_params_into_query() {
        let params = ListingParams {
            category: Some("necklaces".to_string()),
            min_price: Some(500),
            max_price: Some(1500),
            styles: Some("Trendy, Minimal,,".to_string()),
            sort: Some("price-high".to_string()),
            ..ListingParams::default()
        };
        let query = params.into_query().unwrap();

        assert_eq!(query.category, Some(Category::Necklaces));
        assert_eq!(query.styles, vec!["Trendy", "Minimal"]);
        assert_eq!(query.sort, SortOrder::PriceHigh);
        assert_eq!(query.visible, Some(PAGE_SIZE));
    }

    #[test]
    fn test_all_category_means_no_filter() {
        let params = ListingParams {
            category: Some("All".to_string()),
            ..ListingParams::default()
        };
        assert_eq!(params.into_query().unwrap().category, None);
    }

    #[test]
    fn test_invalid_params_rejected() {
        let bad_sort = ListingParams {
            sort: Some("cheapest".to_string()),
            ..ListingParams::default()
        };
        assert!(matches!(bad_sort.into_query(), Err(AppError::BadRequest(_))));

        let inverted = ListingParams {
            min_price: Some(2000),
            max_price: Some(1000),
            ..ListingParams::default()
        };
        assert!(inverted.into_query().is_err());
    }
}
