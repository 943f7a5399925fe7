use async_trait::async_trait;
use database::BaseRepository;
use sea_orm::{DatabaseConnection, DbErr, EntityTrait, QueryOrder, SqlErr};

use crate::{
    entity::{category, product},
    error::{CatalogError, CatalogResult},
    filter::CategoryPredicate,
    models::{Category, CreateCategory, CreateProduct, Product, ProductFilter, UpdateProduct},
    repository::{CategoryRepository, ProductRepository},
    validation,
};

fn internal(err: DbErr) -> CatalogError {
    CatalogError::Internal(format!("Database error: {}", err))
}

/// Named CHECK constraints on `products` and what they mean to a caller.
const CHECK_CONSTRAINTS: [(&str, &str); 3] = [
    ("chk_products_price_positive", validation::PRICE_POSITIVE),
    ("chk_products_stock_non_negative", validation::STOCK_NON_NEGATIVE),
    ("chk_products_rating_range", validation::RATING_RANGE),
];

const REFERENCE_VIOLATION: &str = "Referenced category does not exist";
const UNIQUE_VIOLATION: &str = "A record with the same value already exists";
const CONSTRAINT_VIOLATION: &str = "Record violates a storage constraint";

/// Constraint violations become `Integrity` with a fixed message; the
/// database text is only logged. Everything else is internal.
fn write_error(err: DbErr) -> CatalogError {
    let text = err.to_string();
    let message = match err.sql_err() {
        Some(SqlErr::ForeignKeyConstraintViolation(_)) => REFERENCE_VIOLATION,
        Some(SqlErr::UniqueConstraintViolation(_)) => UNIQUE_VIOLATION,
        _ => match CHECK_CONSTRAINTS.iter().find(|(name, _)| text.contains(name)) {
            Some(&(_, message)) => message,
            None if text.contains("violates check constraint") => CONSTRAINT_VIOLATION,
            None => return internal(err),
        },
    };
    tracing::warn!(error = %text, "Write rejected by database constraint");
    CatalogError::Integrity(message.to_string())
}

pub struct PgCategoryRepository {
    base: BaseRepository<category::Entity>,
}

impl PgCategoryRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }
}

#[async_trait]
impl CategoryRepository for PgCategoryRepository {
    async fn create(&self, input: CreateCategory) -> CatalogResult<Category> {
        let title = input.title.clone();
        let model = self.base.insert(input.into()).await.map_err(|e| {
            if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) {
                CatalogError::DuplicateCategory(title)
            } else {
                write_error(e)
            }
        })?;

        tracing::info!(category_id = %model.id, "Created category");
        Ok(model.into())
    }

    async fn get_by_id(&self, id: i32) -> CatalogResult<Option<Category>> {
        let model = self.base.find_by_id(id).await.map_err(internal)?;
        Ok(model.map(Into::into))
    }

    async fn list(&self) -> CatalogResult<Vec<Category>> {
        let models = category::Entity::find()
            .order_by_asc(category::Column::Title)
            .order_by_asc(category::Column::Id)
            .all(self.base.db())
            .await
            .map_err(internal)?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn exists(&self, id: i32) -> CatalogResult<bool> {
        self.base.exists(id).await.map_err(internal)
    }

    async fn delete(&self, id: i32) -> CatalogResult<bool> {
        // products go with it through ON DELETE CASCADE
        let deleted = self.base.delete_by_id(id).await.map_err(internal)?;
        if deleted {
            tracing::info!(category_id = %id, "Deleted category");
        }
        Ok(deleted)
    }
}

pub struct PgProductRepository {
    base: BaseRepository<product::Entity>,
}

impl PgProductRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn create(&self, input: CreateProduct) -> CatalogResult<Product> {
        let active_model: product::ActiveModel = input.into();
        let model = self.base.insert(active_model).await.map_err(write_error)?;

        tracing::info!(product_id = %model.id, "Created product");
        Ok(model.into())
    }

    async fn get_by_id(&self, id: i32) -> CatalogResult<Option<Product>> {
        let model = self.base.find_by_id(id).await.map_err(internal)?;
        Ok(model.map(Into::into))
    }

    async fn list(&self, filter: ProductFilter) -> CatalogResult<Vec<Product>> {
        let models = CategoryPredicate::new(&filter)
            .apply(product::Entity::find())
            .order_by_desc(product::Column::CreatedAt)
            .order_by_desc(product::Column::Id)
            .all(self.base.db())
            .await
            .map_err(internal)?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn update(&self, id: i32, changes: UpdateProduct) -> CatalogResult<Product> {
        let model = self
            .base
            .find_by_id(id)
            .await
            .map_err(internal)?
            .ok_or(CatalogError::ProductNotFound(id))?;

        let mut active_model: product::ActiveModel = model.into();
        active_model.apply(changes);

        let model = self.base.update(active_model).await.map_err(|e| match e {
            DbErr::RecordNotUpdated => CatalogError::ProductNotFound(id),
            other => write_error(other),
        })?;

        tracing::info!(product_id = %id, "Updated product");
        Ok(model.into())
    }

    async fn delete(&self, id: i32) -> CatalogResult<bool> {
        let deleted = self.base.delete_by_id(id).await.map_err(internal)?;
        if deleted {
            tracing::info!(product_id = %id, "Deleted product");
        }
        Ok(deleted)
    }
}
