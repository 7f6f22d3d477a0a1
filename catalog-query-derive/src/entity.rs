//! Entity derive macro implementation

use proc_macro2::TokenStream;
use quote::quote;
use syn::{spanned::Spanned, Attribute, Data, DeriveInput, Error, Field, Fields, Ident, Result};

/// Identity field selected for the entity
struct IdField {
    /// The field identifier
    ident: Ident,
    /// The field type
    ty: syn::Type,
}

/// Whether a field carries `#[entity(id)]`
fn is_marked_id(field: &Field) -> Result<bool> {
    let mut marked = false;

    for attr in &field.attrs {
        if attr.path().is_ident("entity") {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("id") {
                    marked = true;
                    Ok(())
                } else {
                    Err(meta.error(format!(
                        "unknown entity field attribute `{}`",
                        meta.path
                            .get_ident()
                            .map(|i| i.to_string())
                            .unwrap_or_default()
                    )))
                }
            })?;
        }
    }

    Ok(marked)
}

/// Read `#[entity(name = "...")]` from the struct attributes
fn parse_entity_name(attrs: &[Attribute]) -> Result<Option<String>> {
    let mut name = None;

    for attr in attrs {
        if attr.path().is_ident("entity") {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("name") {
                    let value = meta.value()?;
                    let lit: syn::LitStr = value.parse()?;
                    name = Some(lit.value());
                    Ok(())
                } else {
                    Err(meta.error(format!(
                        "unknown entity attribute `{}`",
                        meta.path
                            .get_ident()
                            .map(|i| i.to_string())
                            .unwrap_or_default()
                    )))
                }
            })?;
        }
    }

    Ok(name)
}

fn find_id_field(input: &DeriveInput) -> Result<IdField> {
    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => return Err(Error::new(input.span(), "only named fields are supported")),
        },
        _ => return Err(Error::new(input.span(), "only structs are supported")),
    };

    let mut marked = Vec::new();
    for field in fields {
        if is_marked_id(field)? {
            marked.push(field);
        }
    }

    let field = match marked.as_slice() {
        [field] => *field,
        [] => fields
            .iter()
            .find(|f| f.ident.as_ref().is_some_and(|i| i == "id"))
            .ok_or_else(|| {
                Error::new(
                    input.span(),
                    "no identity field: mark one with #[entity(id)] or name it `id`",
                )
            })?,
        [_, second, ..] => {
            return Err(Error::new(
                second.span(),
                "only one field may be marked #[entity(id)]",
            ))
        }
    };

    let ident = field
        .ident
        .clone()
        .ok_or_else(|| Error::new(field.span(), "tuple structs are not supported"))?;

    Ok(IdField {
        ident,
        ty: field.ty.clone(),
    })
}

pub fn derive_entity_impl(input: DeriveInput) -> Result<TokenStream> {
    let name = &input.ident;
    let generics = &input.generics;
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let id = find_id_field(&input)?;
    let entity_name = parse_entity_name(&input.attrs)?.unwrap_or_else(|| name.to_string());

    let id_ident = &id.ident;
    let id_ty = &id.ty;

    let expanded = quote! {
        impl #impl_generics catalog_query::Entity for #name #ty_generics #where_clause {
            type Id = #id_ty;

            const NAME: &'static str = #entity_name;

            fn id(&self) -> Self::Id {
                ::std::clone::Clone::clone(&self.#id_ident)
            }
        }
    };

    Ok(expanded)
}
