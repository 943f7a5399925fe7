use axum::Router;
use domain_catalog::{PgCategoryRepository, PgProductRepository, ProductService, handlers};

use crate::state::AppState;

pub fn router(state: &AppState) -> Router {
    let products = PgProductRepository::new(state.db.clone());
    let categories = PgCategoryRepository::new(state.db.clone());
    handlers::products::router(ProductService::new(products, categories))
}
