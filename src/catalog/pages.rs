//! Page handlers registered with the router.
//!
//! A page pairs a `component` (renders from loaded data, or a loading state
//! when there is none yet) with an async `load_data`.

use std::fmt::Write as _;
use std::rc::Rc;

use futures_util::future::LocalBoxFuture;

use crate::catalog::products::{Product, ProductList, ProductStore};
use crate::catalog::CatalogError;
use crate::routing::{Params, Query};

/// Data a page component renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageData {
    Home { list: ProductList, query: Query },
    Detail { product: Product, related: Vec<Product> },
}

pub type LoadFuture = LocalBoxFuture<'static, Result<PageData, CatalogError>>;
type LoadData = Box<dyn Fn(Params, Query) -> LoadFuture>;

/// Route handler: renderer plus data loader.
pub struct Page {
    pub name: &'static str,
    pub component: fn(Option<&PageData>) -> String,
    pub load_data: LoadData,
}

impl std::fmt::Debug for Page {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Page").field("name", &self.name).finish_non_exhaustive()
    }
}

impl Page {
    pub fn home(store: Rc<ProductStore>) -> Self {
        Self {
            name: "home",
            component: render_home,
            load_data: Box::new(move |_params: Params, query: Query| -> LoadFuture {
                let store = Rc::clone(&store);
                Box::pin(async move {
                    let list = store.list(&query).await?;
                    Ok(PageData::Home { list, query })
                })
            }),
        }
    }

    pub fn detail(store: Rc<ProductStore>) -> Self {
        Self {
            name: "detail",
            component: render_detail,
            load_data: Box::new(move |params: Params, _query: Query| -> LoadFuture {
                let store = Rc::clone(&store);
                Box::pin(async move {
                    let id = params.get("id").unwrap_or_default().to_string();
                    let product = store.get(&id).await?;
                    let related = store.related(&product);
                    Ok(PageData::Detail { product, related })
                })
            }),
        }
    }

    /// Start loading data for `params` and `query`.
    pub fn load(&self, params: Params, query: Query) -> LoadFuture {
        (self.load_data)(params, query)
    }

    pub fn render(&self, data: Option<&PageData>) -> String {
        (self.component)(data)
    }
}

fn render_home(data: Option<&PageData>) -> String {
    let Some(PageData::Home { list, query }) = data else {
        return "[home] loading products...".to_string();
    };

    let mut out = format!("[home] {} products", list.total);
    if let Some(search) = query.get("search") {
        let _ = write!(out, " matching {search:?}");
    }
    let _ = write!(out, " (page {}, {} per page)", list.page, list.limit);
    for product in &list.products {
        let _ = write!(out, "\n  #{} {} - {}", product.id, product.title, product.price);
    }
    out
}

fn render_detail(data: Option<&PageData>) -> String {
    let Some(PageData::Detail { product, related }) = data else {
        return "[detail] loading product...".to_string();
    };

    let mut out = format!(
        "[detail] #{} {} - {} ({})",
        product.id, product.title, product.price, product.category
    );
    if !related.is_empty() {
        let ids: Vec<&str> = related.iter().map(|p| p.id.as_str()).collect();
        let _ = write!(out, "\n  related: {}", ids.join(", "));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::parse_query;

    #[tokio::test]
    async fn test_detail_page_loads_by_id() {
        let page = Page::detail(Rc::new(ProductStore::sample()));
        let params: Params = [("id", "3")].into_iter().collect();

        let data = page.load(params, Query::new()).await.unwrap();
        let html = page.render(Some(&data));
        assert!(html.starts_with("[detail] #3 Wool beanie"));
        assert!(html.contains("related: 1, 5"));
    }

    #[tokio::test]
    async fn test_home_page_uses_query() {
        let page = Page::home(Rc::new(ProductStore::sample()));
        let data = page.load(Params::new(), parse_query("search=wool")).await.unwrap();
        let html = page.render(Some(&data));
        assert!(html.starts_with("[home] 1 products matching \"wool\""));
    }

    #[test]
    fn test_loading_state() {
        let page = Page::home(Rc::new(ProductStore::sample()));
        assert_eq!(page.render(None), "[home] loading products...");
    }
}
