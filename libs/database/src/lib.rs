//! PostgreSQL plumbing shared by the catalog crates.
//!
//! - [`postgres`]: configuration, connection with retry, migrations, health check
//! - [`repository`]: [`BaseRepository`], the generic SeaORM CRUD helper
//! - [`common`]: error type and retry with exponential backoff
//!
//! ```ignore
//! use database::postgres::{PostgresConfig, connect_from_config_with_retry, run_migrations};
//! use core_config::FromEnv;
//!
//! let db = connect_from_config_with_retry(PostgresConfig::from_env()?, None).await?;
//! run_migrations::<migration::Migrator>(&db, "catalog_api").await?;
//! ```

pub mod common;
pub mod postgres;
pub mod repository;

pub use common::{DatabaseError, DatabaseResult};
pub use repository::BaseRepository;
