//! Category-title predicate for product listings.
//!
//! The same predicate runs in SQL (`UPPER(title) = UPPER($1)` over a join) and
//! in memory (`to_uppercase` on both sides), so both repositories agree on
//! which products match.

use sea_orm::sea_query::Expr;
use sea_orm::{QueryFilter, Select};

use crate::entity::{category, product};
use crate::models::ProductFilter;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryPredicate {
    title: Option<String>,
}

impl CategoryPredicate {
    /// A blank `category` parameter is treated as absent.
    pub fn new(filter: &ProductFilter) -> Self {
        let title = filter
            .category
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string);
        Self { title }
    }

    pub fn is_all(&self) -> bool {
        self.title.is_none()
    }

    pub fn matches(&self, category_title: &str) -> bool {
        match &self.title {
            Some(title) => title.to_uppercase() == category_title.to_uppercase(),
            None => true,
        }
    }

    pub fn apply(&self, query: Select<product::Entity>) -> Select<product::Entity> {
        match &self.title {
            Some(title) => query.inner_join(category::Entity).filter(Expr::cust_with_values(
                r#"UPPER("categories"."title") = UPPER($1)"#,
                [title.clone()],
            )),
            None => query,
        }
    }
}
