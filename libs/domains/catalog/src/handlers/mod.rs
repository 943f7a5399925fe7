//! HTTP endpoints for products and categories.
//!
//! Each submodule exposes a `router` taking its service and an `ApiDoc`
//! describing the routes relative to where the router is nested.

pub mod categories;
pub mod products;
