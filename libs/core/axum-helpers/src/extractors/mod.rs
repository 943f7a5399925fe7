//! Custom extractors that reject with [`AppError`](crate::AppError) so every
//! failure shares the standard error body.

pub mod id_path;
pub mod json_body;
pub mod query_params;

pub use id_path::IdPath;
pub use json_body::JsonBody;
pub use query_params::QueryParams;
