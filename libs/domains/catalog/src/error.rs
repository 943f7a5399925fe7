use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;
use validator::ValidationErrors;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Product not found: {0}")]
    ProductNotFound(i32),

    #[error("Category not found: {0}")]
    CategoryNotFound(i32),

    #[error("Category with title '{0}' already exists")]
    DuplicateCategory(String),

    /// A storage constraint (foreign key or CHECK) rejected the row.
    #[error("Integrity violation: {0}")]
    Integrity(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type CatalogResult<T> = Result<T, CatalogError>;

/// Convert CatalogError to AppError for standardized error responses
impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::Validation(errors) => AppError::ValidationError(errors),
            CatalogError::ProductNotFound(id) => {
                AppError::NotFound(format!("Product {} not found", id))
            }
            CatalogError::CategoryNotFound(id) => {
                AppError::NotFound(format!("Category {} not found", id))
            }
            CatalogError::DuplicateCategory(title) => {
                AppError::Conflict(format!("Category with title '{}' already exists", title))
            }
            CatalogError::Integrity(msg) => AppError::IntegrityViolation(msg),
            CatalogError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_status_codes() {
        let cases = [
            (CatalogError::ProductNotFound(1), StatusCode::NOT_FOUND),
            (CatalogError::CategoryNotFound(1), StatusCode::NOT_FOUND),
            (
                CatalogError::DuplicateCategory("Apparel".into()),
                StatusCode::CONFLICT,
            ),
            (
                CatalogError::Integrity("violates foreign key constraint".into()),
                StatusCode::BAD_REQUEST,
            ),
            (
                CatalogError::Validation(ValidationErrors::new()),
                StatusCode::BAD_REQUEST,
            ),
            (
                CatalogError::Internal("boom".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, expected) in cases {
            assert_eq!(error.into_response().status(), expected);
        }
    }
}
