//! Derive macros for catalog-query
//!
//! This crate provides the following derive macro:
//! - `Entity` - Implements the identity accessor for a record type
//!
//! The macro is re-exported from the `catalog-query` crate, so users
//! typically don't need to depend on this crate directly.

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

mod entity;

/// Derive macro for records with a unique identity.
///
/// This macro generates an implementation of the `Entity` trait. The
/// identity is read from the field marked `#[entity(id)]`, or from a field
/// named `id` when no field is marked. The identity type must be `Clone`.
///
/// # Attributes
///
/// - `#[entity(id)]` on a field - Use this field as the identity
/// - `#[entity(name = "products")]` on the struct - Collection name used in
///   logs and errors (defaults to the struct name)
///
/// # Example
///
/// ```ignore
/// use catalog_query::Entity;
///
/// #[derive(Clone, Entity)]
/// #[entity(name = "products")]
/// pub struct Product {
///     #[entity(id)]
///     pub sku: String,
///     pub name: String,
/// }
/// ```
#[proc_macro_derive(Entity, attributes(entity))]
pub fn derive_entity(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    entity::derive_entity_impl(input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}
