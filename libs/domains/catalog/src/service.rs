use std::sync::Arc;
use validator::{Validate, ValidationErrors};

use crate::context::RequestContext;
use crate::error::{CatalogError, CatalogResult};
use crate::models::{Category, CreateCategory, CreateProduct, Product, ProductFilter, UpdateProduct};
use crate::repository::{CategoryRepository, ProductRepository};
use crate::validation;

/// Service layer for Product business logic
pub struct ProductService<P: ProductRepository, C: CategoryRepository> {
    products: Arc<P>,
    categories: Arc<C>,
}

impl<P: ProductRepository, C: CategoryRepository> Clone for ProductService<P, C> {
    fn clone(&self) -> Self {
        Self {
            products: Arc::clone(&self.products),
            categories: Arc::clone(&self.categories),
        }
    }
}

impl<P: ProductRepository, C: CategoryRepository> ProductService<P, C> {
    pub fn new(products: P, categories: C) -> Self {
        Self {
            products: Arc::new(products),
            categories: Arc::new(categories),
        }
    }

    /// Products matching `filter`, newest first
    pub async fn list_products(
        &self,
        ctx: &RequestContext,
        filter: ProductFilter,
    ) -> CatalogResult<Vec<Product>> {
        tracing::debug!(action = %ctx.action, category = ?filter.category, "Listing products");
        self.products.list(filter).await
    }

    pub async fn get_product(&self, ctx: &RequestContext, id: i32) -> CatalogResult<Product> {
        tracing::debug!(action = %ctx.action, product_id = %id, "Fetching product");
        self.products
            .get_by_id(id)
            .await?
            .ok_or(CatalogError::ProductNotFound(id))
    }

    /// Validate every field, then persist.
    pub async fn create_product(
        &self,
        ctx: &RequestContext,
        input: CreateProduct,
    ) -> CatalogResult<Product> {
        self.check_write(ctx, input.validate(), Some(input.category))
            .await?;
        self.products.create(input).await
    }

    /// Replace every field of an existing product.
    pub async fn update_product(
        &self,
        ctx: &RequestContext,
        id: i32,
        input: CreateProduct,
    ) -> CatalogResult<Product> {
        self.get_product(ctx, id).await?;
        self.check_write(ctx, input.validate(), Some(input.category))
            .await?;
        self.products.update(id, input.into()).await
    }

    /// Apply only the fields present in `input`.
    pub async fn patch_product(
        &self,
        ctx: &RequestContext,
        id: i32,
        input: UpdateProduct,
    ) -> CatalogResult<Product> {
        self.get_product(ctx, id).await?;
        self.check_write(ctx, input.validate(), input.category.flatten())
            .await?;
        self.products.update(id, input).await
    }

    pub async fn delete_product(&self, ctx: &RequestContext, id: i32) -> CatalogResult<()> {
        tracing::debug!(action = %ctx.action, product_id = %id, "Deleting product");
        if self.products.delete(id).await? {
            Ok(())
        } else {
            Err(CatalogError::ProductNotFound(id))
        }
    }

    /// Merge field errors with the category reference check so one response
    /// lists every invalid field.
    async fn check_write(
        &self,
        ctx: &RequestContext,
        fields: Result<(), ValidationErrors>,
        category: Option<i32>,
    ) -> CatalogResult<()> {
        if !ctx.action.is_write() {
            return Err(CatalogError::Internal(format!(
                "action '{}' cannot modify products",
                ctx.action
            )));
        }

        let mut errors = fields.err().unwrap_or_else(ValidationErrors::new);

        if let Some(category_id) = category {
            if !self.categories.exists(category_id).await? {
                errors.add("category", validation::invalid_category(category_id));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            tracing::debug!(action = %ctx.action, "Rejected product input: {}", errors);
            Err(CatalogError::Validation(errors))
        }
    }
}

/// Service layer for Category management
pub struct CategoryService<C: CategoryRepository> {
    repository: Arc<C>,
}

impl<C: CategoryRepository> Clone for CategoryService<C> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<C: CategoryRepository> CategoryService<C> {
    pub fn new(repository: C) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    pub async fn list_categories(&self) -> CatalogResult<Vec<Category>> {
        self.repository.list().await
    }

    pub async fn get_category(&self, id: i32) -> CatalogResult<Category> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(CatalogError::CategoryNotFound(id))
    }

    pub async fn create_category(&self, input: CreateCategory) -> CatalogResult<Category> {
        input.validate()?;
        self.repository.create(input).await
    }

    /// Deletes the category and all of its products.
    pub async fn delete_category(&self, id: i32) -> CatalogResult<()> {
        if self.repository.delete(id).await? {
            Ok(())
        } else {
            Err(CatalogError::CategoryNotFound(id))
        }
    }
}
