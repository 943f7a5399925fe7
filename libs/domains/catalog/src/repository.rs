use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{CatalogError, CatalogResult};
use crate::filter::CategoryPredicate;
use crate::models::{Category, CreateCategory, CreateProduct, Product, ProductFilter, UpdateProduct};

/// Repository trait for Category persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Create a category. Fails with `DuplicateCategory` if the title is taken.
    async fn create(&self, input: CreateCategory) -> CatalogResult<Category>;

    async fn get_by_id(&self, id: i32) -> CatalogResult<Option<Category>>;

    /// All categories ordered by title
    async fn list(&self) -> CatalogResult<Vec<Category>>;

    async fn exists(&self, id: i32) -> CatalogResult<bool>;

    /// Delete a category and every product referencing it
    async fn delete(&self, id: i32) -> CatalogResult<bool>;
}

/// Repository trait for Product persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Insert a product. Fails with `Integrity` if the category does not exist.
    async fn create(&self, input: CreateProduct) -> CatalogResult<Product>;

    async fn get_by_id(&self, id: i32) -> CatalogResult<Option<Product>>;

    /// Products matching the filter, newest first
    async fn list(&self, filter: ProductFilter) -> CatalogResult<Vec<Product>>;

    /// Apply the present fields and refresh `updated_at`
    async fn update(&self, id: i32, changes: UpdateProduct) -> CatalogResult<Product>;

    async fn delete(&self, id: i32) -> CatalogResult<bool>;
}

#[derive(Debug, Default)]
struct CatalogState {
    categories: BTreeMap<i32, Category>,
    products: BTreeMap<i32, Product>,
    next_category_id: i32,
    next_product_id: i32,
}

impl CatalogState {
    fn category_title(&self, id: i32) -> Option<&str> {
        self.categories.get(&id).map(|c| c.title.as_str())
    }

    fn ensure_category(&self, id: i32) -> CatalogResult<()> {
        if self.categories.contains_key(&id) {
            Ok(())
        } else {
            Err(CatalogError::Integrity(format!(
                "Category {} does not exist",
                id
            )))
        }
    }
}

/// In-memory implementation of both repositories (for development/testing).
///
/// Clones share state, so one instance can back a `ProductService` and a
/// `CategoryService` at the same time.
#[derive(Debug, Default, Clone)]
pub struct InMemoryCatalogRepository {
    state: Arc<RwLock<CatalogState>>,
}

impl InMemoryCatalogRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CategoryRepository for InMemoryCatalogRepository {
    async fn create(&self, input: CreateCategory) -> CatalogResult<Category> {
        let mut state = self.state.write().await;

        if state.categories.values().any(|c| c.title == input.title) {
            return Err(CatalogError::DuplicateCategory(input.title));
        }

        state.next_category_id += 1;
        let category = Category {
            id: state.next_category_id,
            title: input.title,
        };
        state.categories.insert(category.id, category.clone());

        tracing::info!(category_id = %category.id, "Created category");
        Ok(category)
    }

    async fn get_by_id(&self, id: i32) -> CatalogResult<Option<Category>> {
        let state = self.state.read().await;
        Ok(state.categories.get(&id).cloned())
    }

    async fn list(&self) -> CatalogResult<Vec<Category>> {
        let state = self.state.read().await;
        let mut categories: Vec<Category> = state.categories.values().cloned().collect();
        categories.sort_by(|a, b| a.title.cmp(&b.title).then(a.id.cmp(&b.id)));
        Ok(categories)
    }

    async fn exists(&self, id: i32) -> CatalogResult<bool> {
        let state = self.state.read().await;
        Ok(state.categories.contains_key(&id))
    }

    async fn delete(&self, id: i32) -> CatalogResult<bool> {
        let mut state = self.state.write().await;

        if state.categories.remove(&id).is_none() {
            return Ok(false);
        }

        let before = state.products.len();
        state.products.retain(|_, p| p.category_id != id);
        let removed = before - state.products.len();

        tracing::info!(category_id = %id, products_removed = removed, "Deleted category");
        Ok(true)
    }
}

#[async_trait]
impl ProductRepository for InMemoryCatalogRepository {
    async fn create(&self, input: CreateProduct) -> CatalogResult<Product> {
        let mut state = self.state.write().await;
        state.ensure_category(input.category)?;

        state.next_product_id += 1;
        let now = Utc::now();
        let product = Product {
            id: state.next_product_id,
            title: input.title,
            description: input.description,
            price: input.price,
            stock: input.stock,
            rating: input.rating,
            image: input.image,
            category_id: input.category,
            created_at: now,
            updated_at: now,
        };
        state.products.insert(product.id, product.clone());

        tracing::info!(product_id = %product.id, "Created product");
        Ok(product)
    }

    async fn get_by_id(&self, id: i32) -> CatalogResult<Option<Product>> {
        let state = self.state.read().await;
        Ok(state.products.get(&id).cloned())
    }

    async fn list(&self, filter: ProductFilter) -> CatalogResult<Vec<Product>> {
        let state = self.state.read().await;
        let predicate = CategoryPredicate::new(&filter);

        let mut products: Vec<Product> = state
            .products
            .values()
            .filter(|p| {
                state
                    .category_title(p.category_id)
                    .is_some_and(|title| predicate.matches(title))
            })
            .cloned()
            .collect();

        products.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });

        Ok(products)
    }

    async fn update(&self, id: i32, changes: UpdateProduct) -> CatalogResult<Product> {
        let mut state = self.state.write().await;

        if let Some(Some(category)) = changes.category {
            state.ensure_category(category)?;
        }

        let product = state
            .products
            .get_mut(&id)
            .ok_or(CatalogError::ProductNotFound(id))?;

        if let Some(Some(title)) = changes.title {
            product.title = title;
        }
        if let Some(description) = changes.description {
            product.description = description;
        }
        if let Some(Some(price)) = changes.price {
            product.price = price;
        }
        if let Some(Some(stock)) = changes.stock {
            product.stock = stock;
        }
        if let Some(Some(rating)) = changes.rating {
            product.rating = rating;
        }
        if let Some(Some(category)) = changes.category {
            product.category_id = category;
        }
        if let Some(image) = changes.image {
            product.image = image;
        }
        product.updated_at = Utc::now();

        tracing::info!(product_id = %id, "Updated product");
        Ok(product.clone())
    }

    async fn delete(&self, id: i32) -> CatalogResult<bool> {
        let mut state = self.state.write().await;
        let removed = state.products.remove(&id).is_some();

        if removed {
            tracing::info!(product_id = %id, "Deleted product");
        }

        Ok(removed)
    }
}
