//! Catalog Domain
//!
//! Products, the categories they belong to, and the HTTP surface over both.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints, one action per route
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Write contract, category reference check
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← PostgreSQL or in-memory, same invariants
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Records, DTOs, read-shaped views
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_catalog::{
//!     CategoryService, InMemoryCatalogRepository, ProductService, handlers,
//! };
//!
//! let repository = InMemoryCatalogRepository::new();
//! let products = ProductService::new(repository.clone(), repository.clone());
//! let categories = CategoryService::new(repository);
//!
//! let app = axum::Router::<()>::new()
//!     .nest("/products", handlers::products::router(products))
//!     .nest("/categories", handlers::categories::router(categories));
//! ```

pub mod context;
pub mod entity;
pub mod error;
pub mod filter;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;
pub mod validation;

pub use context::{Contract, ProductAction, RequestContext};
pub use error::{CatalogError, CatalogResult};
pub use filter::CategoryPredicate;
pub use models::{
    Category, CreateCategory, CreateProduct, Product, ProductFilter, ProductView, UpdateProduct,
};
pub use postgres::{PgCategoryRepository, PgProductRepository};
pub use repository::{CategoryRepository, InMemoryCatalogRepository, ProductRepository};
pub use service::{CategoryService, ProductService};
