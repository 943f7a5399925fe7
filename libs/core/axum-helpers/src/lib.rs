//! # Axum Helpers
//!
//! Shared HTTP plumbing for the catalog services.
//!
//! - **[`errors`]**: `AppError` → JSON `ErrorResponse` with numeric error codes
//! - **[`extractors`]**: `IdPath`, `JsonBody` and `QueryParams` with standardized rejections
//! - **[`http`]**: CORS and security header middleware
//! - **[`server`]**: router factory with OpenAPI UIs, health checks, graceful shutdown

pub mod errors;
pub mod extractors;
pub mod http;
pub mod server;

pub use server::{
    HealthCheckFuture, HealthResponse, ShutdownCoordinator, close_postgres,
    create_production_app, create_router, health_router, run_health_checks, shutdown_signal,
};

pub use http::{create_cors_layer, security_headers};

pub use errors::{AppError, ErrorCode, ErrorResponse};

pub use extractors::{IdPath, JsonBody, QueryParams};
