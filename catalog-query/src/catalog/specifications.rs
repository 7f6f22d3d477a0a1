//! Product listing and facet specifications

use crate::error::Result;
use crate::pagination::PageLimits;
use crate::specification::Specification;

use super::params::{ProductSpecParams, SortMode};
use super::product::Product;

/// Build the filtered, sorted, paged product listing.
///
/// Search, brand and type clauses are each optional and combined with AND.
/// Paging is always enabled: the page size is resolved against `limits`, so
/// a missing or zero size falls back to the default and oversized requests
/// are capped.
pub fn product_specification(
    params: &ProductSpecParams,
    limits: &PageLimits,
) -> Result<Specification<Product>> {
    let sort = params.sort_mode()?;
    let mut spec = Specification::new();

    if let Some(term) = params.search_term() {
        spec = spec.filter(move |p: &Product| p.name.to_lowercase().contains(&term));
    }

    match params.brands.as_slice() {
        [] => {}
        [brand] => {
            let brand = brand.clone();
            spec = spec.filter(move |p: &Product| p.brand == brand);
        }
        brands => {
            let brands = brands.to_vec();
            spec = spec.filter(move |p: &Product| brands.contains(&p.brand));
        }
    }

    match params.types.as_slice() {
        [] => {}
        [product_type] => {
            let product_type = product_type.clone();
            spec = spec.filter(move |p: &Product| p.product_type == product_type);
        }
        types => {
            let types = types.to_vec();
            spec = spec.filter(move |p: &Product| types.contains(&p.product_type));
        }
    }

    spec = match sort {
        SortMode::NameAsc => spec.order_by("name", |p: &Product| p.name.clone()),
        SortMode::PriceAsc => spec.order_by("price", |p: &Product| p.price),
        SortMode::PriceDesc => spec.order_by_descending("price", |p: &Product| p.price),
    };

    let page_size = params.page_size(limits);
    let spec = spec.paging(params.page_index.saturating_mul(page_size), page_size)?;
    spec.validate()?;
    Ok(spec)
}

/// Every distinct brand in the catalog.
pub fn brand_list() -> Specification<Product, String> {
    Specification::select(|p: &Product| p.brand.clone()).distinct()
}

/// Every distinct product type in the catalog.
pub fn type_list() -> Specification<Product, String> {
    Specification::select(|p: &Product| p.product_type.clone()).distinct()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clause::Direction;
    use crate::error::Error;
    use crate::evaluator::{plan, Stage};

    #[test]
    fn test_default_listing() {
        let spec = product_specification(&ProductSpecParams::default(), &PageLimits::default())
            .unwrap();
        assert!(spec.criteria().is_none());
        assert_eq!(spec.order().unwrap().key(), "name");
        assert_eq!(spec.order().unwrap().direction(), Direction::Ascending);
        assert!(spec.is_paging_enabled());
        assert_eq!((spec.skip(), spec.take()), (0, 6));
    }

    #[test]
    fn test_listing_plan() {
        let params = ProductSpecParams::default()
            .brands("Angular")
            .sort("price-desc")
            .page(2, 10);
        let spec = product_specification(&params, &PageLimits::default()).unwrap();
        assert_eq!(
            plan(&spec).stages(),
            &[
                Stage::Criteria,
                Stage::Order {
                    key: "price",
                    direction: Direction::Descending
                },
                Stage::Paging { skip: 20, take: 10 },
            ]
        );
    }

    #[test]
    fn test_page_size_is_capped_and_defaulted() {
        let limits = PageLimits::default();
        let big = product_specification(&ProductSpecParams::default().page(1, 1000), &limits)
            .unwrap();
        assert_eq!((big.skip(), big.take()), (50, 50));

        let zero = product_specification(&ProductSpecParams::default().page(0, 0), &limits)
            .unwrap();
        assert_eq!(zero.take(), 6);
    }

    #[test]
    fn test_unknown_sort_is_rejected() {
        let params = ProductSpecParams::default().sort("rating");
        let err = product_specification(&params, &PageLimits::default()).unwrap_err();
        assert!(matches!(err, Error::InvalidSpecification(_)));
    }

    #[test]
    fn test_facets_are_projection_only() {
        for spec in [brand_list(), type_list()] {
            assert!(spec.is_projected());
            assert!(spec.is_distinct());
            assert!(spec.criteria().is_none());
            assert!(spec.order().is_none());
            assert!(!spec.is_paging_enabled());
        }
    }
}
