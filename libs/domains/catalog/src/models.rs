use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationErrors};

use crate::validation;

/// Product category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Category {
    /// Serial identifier
    #[schema(example = 1)]
    pub id: i32,
    /// Unique display title
    #[schema(example = "Apparel")]
    pub title: String,
}

/// DTO for creating a new category
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateCategory {
    #[serde(deserialize_with = "trimmed")]
    #[validate(custom(function = "validation::validate_title"))]
    #[schema(example = "Apparel")]
    pub title: String,
}

/// Full product record as stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    #[schema(value_type = String, example = "19.99")]
    pub price: Decimal,
    pub stock: i32,
    pub rating: f64,
    /// Opaque reference to an image asset
    pub image: Option<String>,
    pub category_id: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Read-shaped product representation returned by every product endpoint.
///
/// `price` is serialized as a decimal string and `category` is the category id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProductView {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Shirt")]
    pub title: String,
    pub description: Option<String>,
    #[schema(example = 4.5)]
    pub rating: f64,
    #[schema(value_type = String, example = "19.99")]
    pub price: Decimal,
    #[schema(example = 10)]
    pub stock: i32,
    #[schema(example = 1)]
    pub category: i32,
}

impl From<Product> for ProductView {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            title: product.title,
            description: product.description,
            rating: product.rating,
            price: product.price,
            stock: product.stock,
            category: product.category_id,
        }
    }
}

/// DTO for creating a product or replacing all of its fields.
///
/// `price` accepts a JSON number or a decimal string.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateProduct {
    #[serde(deserialize_with = "trimmed")]
    #[validate(custom(function = "validation::validate_title"))]
    #[schema(example = "Shirt")]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[validate(custom(function = "validation::validate_price"))]
    #[schema(value_type = f64, example = 19.99)]
    pub price: Decimal,
    #[validate(range(min = 0, code = "stock_non_negative", message = "Stock cannot be negative"))]
    #[schema(example = 10)]
    pub stock: i32,
    #[validate(range(
        min = 0.0,
        max = 5.0,
        code = "rating_range",
        message = "Rating must be between 0 and 5"
    ))]
    #[schema(example = 4.5)]
    pub rating: f64,
    /// Category id
    #[schema(example = 1)]
    pub category: i32,
    #[serde(default)]
    #[validate(length(max = 255, message = "Image reference must be at most 255 characters"))]
    pub image: Option<String>,
}

/// DTO for a partial product update.
///
/// Every field is `None` when absent and `Some(None)` when sent as `null`.
/// Only `description` and `image` may be cleared; a `null` anywhere else
/// fails validation.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateProduct {
    #[serde(default, deserialize_with = "present_trimmed")]
    #[schema(value_type = Option<String>)]
    pub title: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>)]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<f64>)]
    pub price: Option<Option<Decimal>>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<i32>)]
    pub stock: Option<Option<i32>>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<f64>)]
    pub rating: Option<Option<f64>>,
    /// Category id
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<i32>)]
    pub category: Option<Option<i32>>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>)]
    pub image: Option<Option<String>>,
}

/// Distinguish an explicit `null` from an absent field.
fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

fn trimmed<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    String::deserialize(deserializer).map(|s| s.trim().to_string())
}

fn present_trimmed<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(|s| Some(s.map(|s| s.trim().to_string())))
}

/// Record `null` on a field that cannot be cleared; pass a value through.
fn required<'a, T>(
    errors: &mut ValidationErrors,
    field: &'static str,
    value: &'a Option<Option<T>>,
) -> Option<&'a T> {
    match value {
        Some(Some(value)) => Some(value),
        Some(None) => {
            errors.add(field, validation::not_null());
            None
        }
        None => None,
    }
}

impl UpdateProduct {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.price.is_none()
            && self.stock.is_none()
            && self.rating.is_none()
            && self.category.is_none()
            && self.image.is_none()
    }
}

impl Validate for UpdateProduct {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if let Some(title) = required(&mut errors, "title", &self.title) {
            if let Err(e) = validation::validate_title(title) {
                errors.add("title", e);
            }
        }
        if let Some(price) = required(&mut errors, "price", &self.price) {
            if let Err(e) = validation::validate_price(price) {
                errors.add("price", e);
            }
        }
        if let Some(&stock) = required(&mut errors, "stock", &self.stock) {
            if let Err(e) = validation::validate_stock(stock) {
                errors.add("stock", e);
            }
        }
        if let Some(&rating) = required(&mut errors, "rating", &self.rating) {
            if let Err(e) = validation::validate_rating(rating) {
                errors.add("rating", e);
            }
        }
        required(&mut errors, "category", &self.category);
        if let Some(Some(image)) = &self.image {
            if let Err(e) = validation::validate_image(image) {
                errors.add("image", e);
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// A full replacement is a partial update that sets every field.
impl From<CreateProduct> for UpdateProduct {
    fn from(input: CreateProduct) -> Self {
        Self {
            title: Some(Some(input.title)),
            description: Some(input.description),
            price: Some(Some(input.price)),
            stock: Some(Some(input.stock)),
            rating: Some(Some(input.rating)),
            category: Some(Some(input.category)),
            image: Some(input.image),
        }
    }
}

/// Query filters for listing products
#[derive(Debug, Clone, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ProductFilter {
    /// Filter products by category title (case insensitive exact match).
    #[param(example = "Apparel")]
    pub category: Option<String>,
}

impl ProductFilter {
    pub fn by_category(title: impl Into<String>) -> Self {
        Self {
            category: Some(title.into()),
        }
    }
}
