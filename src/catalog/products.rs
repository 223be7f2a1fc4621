//! In-memory product fixture.

use std::collections::HashMap;
use std::time::Duration;

use serde::Serialize;

use crate::catalog::CatalogError;
use crate::routing::Query;

const DEFAULT_LIMIT: usize = 20;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Product {
    pub id: String,
    pub title: String,
    pub price: u32,
    pub category: String,
}

impl Product {
    fn new(id: &str, title: &str, price: u32, category: &str) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            price,
            category: category.to_string(),
        }
    }
}

/// One page of a product listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductList {
    pub products: Vec<Product>,
    pub total: usize,
    pub page: usize,
    pub limit: usize,
}

/// Product source with optional per-product latency.
#[derive(Debug, Clone, Default)]
pub struct ProductStore {
    products: Vec<Product>,
    delays: HashMap<String, Duration>,
}

impl ProductStore {
    pub fn new(products: Vec<Product>) -> Self {
        Self {
            products,
            delays: HashMap::new(),
        }
    }

    pub fn sample() -> Self {
        Self::new(vec![
            Product::new("1", "Linen shirt", 32000, "clothing"),
            Product::new("2", "Canvas tote", 18000, "bags"),
            Product::new("3", "Wool beanie", 15000, "clothing"),
            Product::new("4", "Leather wallet", 45000, "bags"),
            Product::new("5", "Cotton socks", 6000, "clothing"),
        ])
    }

    /// Delay lookups of product `id`.
    pub fn with_delay(mut self, id: &str, delay: Duration) -> Self {
        self.delays.insert(id.to_string(), delay);
        self
    }

    /// Filter, sort and paginate by `search`, `category`, `sort`, `limit`, `page`.
    pub async fn list(&self, query: &Query) -> Result<ProductList, CatalogError> {
        let limit = parse_number(query, "limit")?.unwrap_or(DEFAULT_LIMIT);
        let page = parse_number(query, "page")?.unwrap_or(1).max(1);

        let search = query.get("search").map(str::to_lowercase);
        let mut matched: Vec<Product> = self
            .products
            .iter()
            .filter(|p| search.as_deref().map_or(true, |s| p.title.to_lowercase().contains(s)))
            .filter(|p| query.get("category").map_or(true, |c| p.category == c))
            .cloned()
            .collect();

        match query.get("sort") {
            Some("price_asc") | None => matched.sort_by_key(|p| p.price),
            Some("price_desc") => matched.sort_by(|a, b| b.price.cmp(&a.price)),
            Some("name_asc") => matched.sort_by(|a, b| a.title.cmp(&b.title)),
            Some("name_desc") => matched.sort_by(|a, b| b.title.cmp(&a.title)),
            Some(other) => {
                return Err(CatalogError::InvalidQuery {
                    key: "sort".to_string(),
                    value: other.to_string(),
                })
            }
        }

        let total = matched.len();
        // Offsets past usize are past the end of any listing.
        let offset = (page - 1).checked_mul(limit).unwrap_or(usize::MAX);
        let products = matched.into_iter().skip(offset).take(limit).collect();
        Ok(ProductList {
            products,
            total,
            page,
            limit,
        })
    }

    pub async fn get(&self, id: &str) -> Result<Product, CatalogError> {
        if let Some(delay) = self.delays.get(id) {
            tokio::time::sleep(*delay).await;
        }
        self.products
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| CatalogError::NotFound(id.to_string()))
    }

    /// Other products in the same category.
    pub fn related(&self, product: &Product) -> Vec<Product> {
        self.products
            .iter()
            .filter(|p| p.category == product.category && p.id != product.id)
            .cloned()
            .collect()
    }
}

fn parse_number(query: &Query, key: &str) -> Result<Option<usize>, CatalogError> {
    query
        .get(key)
        .map(|raw| {
            raw.parse::<usize>().map_err(|_| CatalogError::InvalidQuery {
                key: key.to_string(),
                value: raw.to_string(),
            })
        })
        .transpose()
}
