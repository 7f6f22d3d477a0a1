//! Product entity

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::Entity;

/// A catalog product.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Entity)]
#[serde(rename_all = "camelCase")]
#[entity(name = "products")]
pub struct Product {
    #[entity(id)]
    pub id: i32,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub picture_url: String,
    #[serde(rename = "type")]
    pub product_type: String,
    pub brand: String,
    pub quantity_in_stock: i32,
}
