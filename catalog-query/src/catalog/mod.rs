//! Product catalog: entity, listing parameters and specifications

mod params;
mod product;
mod specifications;

pub use params::{ProductSpecParams, SortMode};
pub use product::Product;
pub use specifications::{brand_list, product_specification, type_list};
