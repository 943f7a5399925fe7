use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;

use crate::models::{CreateProduct, Product, UpdateProduct};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    #[sea_orm(column_type = "Decimal(Some((6, 2)))")]
    pub price: Decimal,
    pub stock: i32,
    pub rating: f64,
    pub image: Option<String>,
    pub category_id: i32,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::category::Entity",
        from = "Column::CategoryId",
        to = "super::category::Column::Id",
        on_delete = "Cascade"
    )]
    Category,
}

impl Related<super::category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub const TAG: &'static str = "products";
}

impl From<Model> for Product {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            description: model.description,
            price: model.price,
            stock: model.stock,
            rating: model.rating,
            image: model.image,
            category_id: model.category_id,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

// Timestamps are left to the column defaults.
impl From<CreateProduct> for ActiveModel {
    fn from(input: CreateProduct) -> Self {
        ActiveModel {
            title: Set(input.title),
            description: Set(input.description),
            price: Set(input.price),
            stock: Set(input.stock),
            rating: Set(input.rating),
            image: Set(input.image),
            category_id: Set(input.category),
            ..Default::default()
        }
    }
}

impl ActiveModel {
    /// Set the present fields of `changes` and refresh `updated_at`.
    pub fn apply(&mut self, changes: UpdateProduct) {
        if let Some(Some(title)) = changes.title {
            self.title = Set(title);
        }
        if let Some(description) = changes.description {
            self.description = Set(description);
        }
        if let Some(Some(price)) = changes.price {
            self.price = Set(price);
        }
        if let Some(Some(stock)) = changes.stock {
            self.stock = Set(stock);
        }
        if let Some(Some(rating)) = changes.rating {
            self.rating = Set(rating);
        }
        if let Some(Some(category)) = changes.category {
            self.category_id = Set(category);
        }
        if let Some(image) = changes.image {
            self.image = Set(image);
        }
        self.updated_at = Set(chrono::Utc::now().into());
    }
}
