//! Integration tests for catalog-query against the in-memory store
//!
//! These tests verify the full stack: specification builders, the evaluator,
//! the generic repository with its unit of work, and the pagination envelope.
//!
//! Every test builds its own store from the shared product fixture, so tests
//! are independent and can run in parallel.

use std::collections::HashSet;
use std::hash::Hash;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use catalog_query::catalog::{
    brand_list, product_specification, type_list, Product, ProductSpecParams,
};
use catalog_query::{
    paginate, Change, CommitResult, Criteria, Entity, Error, GenericRepository, MemoryStore,
    Order, PageLimits, Queryable, Repository, Rows, Selector, Specification, Store,
};
use rust_decimal::Decimal;

const PRODUCTS_JSON: &str = include_str!("../../fixtures/products.json");

type ProductStore = Arc<MemoryStore<Product>>;

fn store() -> ProductStore {
    Arc::new(MemoryStore::from_json(PRODUCTS_JSON).unwrap())
}

fn repository(store: &ProductStore) -> GenericRepository<Product, ProductStore> {
    GenericRepository::new(Arc::clone(store))
}

fn product(id: i32, name: &str, brand: &str, product_type: &str, price: &str) -> Product {
    Product {
        id,
        name: name.to_string(),
        description: String::new(),
        price: price.parse().unwrap(),
        picture_url: String::new(),
        product_type: product_type.to_string(),
        brand: brand.to_string(),
        quantity_in_stock: 1,
    }
}

fn ids(products: &[Product]) -> Vec<i32> {
    products.iter().map(|p| p.id).collect()
}

// ============ Fixture ============

#[tokio::test]
async fn test_fixture_loads() {
    let store = store();
    assert_eq!(store.len().await, 18);

    let repo = repository(&store);
    let first = repo.get_by_id(&1).await.unwrap().unwrap();
    assert_eq!(first.name, "Angular Speedster Board 2000");
    assert_eq!(first.price, Decimal::new(20000, 2));
    assert_eq!(first.product_type, "Boards");
    assert_eq!(Product::NAME, "products");
}

// ============ Count / List Consistency ============

#[tokio::test]
async fn test_count_matches_list_without_paging() {
    let store = store();
    let repo = repository(&store);

    let specs = vec![
        Specification::new(),
        Specification::new().filter(|p: &Product| p.brand == "React"),
        Specification::new()
            .filter(|p: &Product| p.price > Decimal::new(10000, 2))
            .order_by_descending("price", |p: &Product| p.price),
        Specification::new()
            .filter(|p: &Product| p.name.contains("Green"))
            .distinct(),
        Specification::new().filter(|p: &Product| p.brand == "Nobody"),
    ];

    for spec in &specs {
        let listed = repo.list(spec).await.unwrap();
        let counted = repo.count(spec).await.unwrap();
        assert_eq!(listed.len() as u64, counted, "spec: {:?}", spec);
    }

    for spec in [brand_list(), type_list()] {
        let listed = repo.list(&spec).await.unwrap();
        assert_eq!(listed.len() as u64, repo.count(&spec).await.unwrap());
    }
}

// ============ Page Coverage ============

#[tokio::test]
async fn test_pages_cover_every_match_exactly_once() {
    let store = store();
    let repo = repository(&store);
    let limits = PageLimits::default();

    let base = ProductSpecParams::default()
        .brands("Angular,NetCore,React")
        .sort("price-asc");

    let everything = Specification::new()
        .filter(|p: &Product| ["Angular", "NetCore", "React"].contains(&p.brand.as_str()));
    let expected: HashSet<i32> = ids(&repo.list(&everything).await.unwrap())
        .into_iter()
        .collect();
    assert_eq!(expected.len(), 14);

    let page_size = 4;
    let first = {
        let spec = product_specification(&base.clone().page(0, page_size), &limits).unwrap();
        paginate(&repo, &spec, 0, page_size).await.unwrap()
    };
    assert_eq!(first.count, 14);
    assert_eq!(first.total_pages(), 4);

    let mut seen = Vec::new();
    for page_index in 0..first.total_pages() as usize {
        let params = base.clone().page(page_index, page_size);
        let spec = product_specification(&params, &limits).unwrap();
        let page = paginate(&repo, &spec, page_index, page_size).await.unwrap();
        assert!(page.data.len() <= page_size);
        assert_eq!(page.count, 14);
        seen.extend(ids(&page.data));
    }

    assert_eq!(seen.len(), expected.len(), "duplicates across pages: {:?}", seen);
    assert_eq!(seen.into_iter().collect::<HashSet<_>>(), expected);
}

// ============ Distinct On Projection ============

#[tokio::test]
async fn test_facet_collapses_projected_duplicates() {
    let store = Arc::new(
        MemoryStore::with_rows(vec![
            product(1, "a1", "A", "Boards", "1.00"),
            product(2, "a2", "A", "Boards", "2.00"),
            product(3, "b1", "B", "Hats", "3.00"),
            product(4, "c1", "C", "Hats", "4.00"),
            product(5, "b2", "B", "Hats", "5.00"),
        ])
        .unwrap(),
    );
    let repo = repository(&store);

    let brands: HashSet<String> = repo.list(&brand_list()).await.unwrap().into_iter().collect();
    let expected: HashSet<String> = ["A", "B", "C"].iter().map(|s| s.to_string()).collect();
    assert_eq!(brands, expected);
    assert_eq!(repo.count(&brand_list()).await.unwrap(), 3);
}

#[tokio::test]
async fn test_fixture_facets() {
    let store = store();
    let repo = repository(&store);

    assert_eq!(
        repo.list(&brand_list()).await.unwrap(),
        vec!["Angular", "NetCore", "React", "TypeScript", "VS Code", "Redis"]
    );
    assert_eq!(
        repo.list(&type_list()).await.unwrap(),
        vec!["Boards", "Hats", "Gloves", "Boots"]
    );
}

#[tokio::test]
async fn test_distinct_facet_can_be_ordered() {
    let store = store();
    let repo = repository(&store);

    let spec = brand_list().order_by("brand", |p: &Product| p.brand.clone());
    assert_eq!(
        repo.list(&spec).await.unwrap(),
        vec!["Angular", "NetCore", "React", "Redis", "TypeScript", "VS Code"]
    );
}

// ============ Ordering ============

#[tokio::test]
async fn test_price_ascending_is_non_decreasing() {
    let store = store();
    let repo = repository(&store);
    let limits = PageLimits::default();

    let params = ProductSpecParams::default().sort("price-asc").page(0, 50);
    let spec = product_specification(&params, &limits).unwrap();
    let page = paginate(&repo, &spec, 0, 50).await.unwrap();

    assert_eq!(page.data.len(), 18);
    for pair in page.data.windows(2) {
        assert!(pair[0].price <= pair[1].price, "{:?}", (&pair[0].name, &pair[1].name));
    }
}

#[tokio::test]
async fn test_price_descending_and_default_name_order() {
    let store = store();
    let repo = repository(&store);
    let limits = PageLimits::default();

    let desc = product_specification(
        &ProductSpecParams::default().sort("priceDesc").types("Boards"),
        &limits,
    )
    .unwrap();
    let boards = repo.list(&desc).await.unwrap();
    assert_eq!(ids(&boards), vec![4, 5, 1, 3, 2, 6]);

    let by_name = product_specification(&ProductSpecParams::default().types("Hats"), &limits)
        .unwrap();
    let hats = repo.list(&by_name).await.unwrap();
    let names: Vec<&str> = hats.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["Core Blue Hat", "Green React Woolen Hat", "Purple React Woolen Hat"]
    );
}

// ============ Paging Boundary ============

#[tokio::test]
async fn test_paging_boundary() {
    let store = store();
    let repo = repository(&store);
    let limits = PageLimits::default();

    // NetCore (5) + TypeScript (1) + Redis (1)
    let base = ProductSpecParams::default().brands("NetCore,TypeScript,Redis");

    let mut sizes = Vec::new();
    for page_index in 0..4 {
        let spec = product_specification(&base.clone().page(page_index, 3), &limits).unwrap();
        let page = paginate(&repo, &spec, page_index, 3).await.unwrap();
        assert_eq!(page.count, 7);
        assert_eq!(page.page_index, page_index);
        sizes.push(page.data.len());
    }
    assert_eq!(sizes, vec![3, 3, 1, 0]);
}

// ============ Criteria ============

#[tokio::test]
async fn test_brand_criteria_selects_exact_matches() {
    let store = Arc::new(
        MemoryStore::with_rows(vec![
            product(1, "one", "X", "Boards", "1.00"),
            product(2, "two", "Y", "Boards", "1.00"),
            product(3, "three", "X", "Boards", "1.00"),
            product(4, "four", "Z", "Boards", "1.00"),
            product(5, "five", "x", "Boards", "1.00"),
        ])
        .unwrap(),
    );
    let repo = repository(&store);
    let spec = product_specification(
        &ProductSpecParams::default().brands("X"),
        &PageLimits::default(),
    )
    .unwrap();

    let page = paginate(&repo, &spec, 0, 6).await.unwrap();
    assert_eq!(ids(&page.data), vec![1, 3]);
    assert_eq!(page.count, 2);
}

#[tokio::test]
async fn test_search_is_case_insensitive_and_combined_with_type() {
    let store = store();
    let repo = repository(&store);
    let limits = PageLimits::default();

    let green = product_specification(&ProductSpecParams::default().search("GREEN"), &limits)
        .unwrap();
    assert_eq!(repo.count(&green).await.unwrap(), 4);

    let green_gloves = product_specification(
        &ProductSpecParams::default().search("green").types("Gloves"),
        &limits,
    )
    .unwrap();
    let found = repo.list(&green_gloves).await.unwrap();
    assert_eq!(ids(&found), vec![11, 13]);
}

// ============ Unit Of Work ============

#[tokio::test]
async fn test_add_and_update_commit_together() -> anyhow::Result<()> {
    let store = store();
    let mut repo = repository(&store);

    let mut updated = repo.get_by_id(&7).await?.expect("fixture product 7");
    updated.price = Decimal::new(1299, 2);

    repo.add(product(19, "Redis Blue Boots", "Redis", "Boots", "220.00"));
    repo.update(updated);
    assert!(repo.save_all().await?);

    let reader = repository(&store);
    assert!(reader.exists(&19).await?);
    assert_eq!(
        reader.get_by_id(&7).await?.map(|p| p.price),
        Some(Decimal::new(1299, 2))
    );
    assert_eq!(store.len().await, 19);
    Ok(())
}

#[tokio::test]
async fn test_constraint_violation_commits_nothing() {
    let store = store();
    let mut repo = repository(&store);

    repo.add(product(19, "Redis Blue Boots", "Redis", "Boots", "220.00"));
    repo.update(product(99, "Ghost", "Nobody", "Boots", "1.00"));
    let err = repo.save_all().await.unwrap_err();

    assert!(matches!(err, Error::Constraint(_)));
    assert!(!repo.exists(&19).await.unwrap());
    assert_eq!(store.len().await, 18);
}

#[tokio::test]
async fn test_unavailable_store_commits_nothing() {
    let store = store();
    let mut repo = repository(&store);

    repo.add(product(19, "Redis Blue Boots", "Redis", "Boots", "220.00"));
    repo.update(product(7, "Core Blue Hat", "NetCore", "Hats", "1.00"));

    store.set_available(false);
    let err = repo.save_all().await.unwrap_err();
    assert!(matches!(err, Error::StoreUnavailable(_)));

    store.set_available(true);
    assert!(!repo.exists(&19).await.unwrap());
    let hat = repo.get_by_id(&7).await.unwrap().unwrap();
    assert_eq!(hat.price, Decimal::new(1000, 2));
}

#[tokio::test]
async fn test_save_without_changes_reports_false() {
    let store = store();
    let mut repo = repository(&store);
    assert!(!repo.save_all().await.unwrap());
}

// ============ Custom Store Adapter ============

/// Store adapter that serves reads from an inner store and can be told to
/// fail the next commit.
struct FlakyStore<T: Entity> {
    inner: MemoryStore<T>,
    fail_commit: AtomicBool,
}

#[async_trait]
impl<T: Entity> Store<T> for FlakyStore<T> {
    type Source = Rows<T>;

    async fn source(&self) -> catalog_query::Result<Self::Source> {
        self.inner.source().await
    }

    async fn find(&self, id: &T::Id) -> catalog_query::Result<Option<T>> {
        self.inner.find(id).await
    }

    async fn contains(&self, id: &T::Id) -> catalog_query::Result<bool> {
        self.inner.contains(id).await
    }

    async fn commit(&self, changes: Vec<Change<T>>) -> catalog_query::Result<CommitResult> {
        if self.fail_commit.swap(false, Ordering::SeqCst) {
            return Err(Error::StoreUnavailable("connection reset".into()));
        }
        self.inner.commit(changes).await
    }
}

#[tokio::test]
async fn test_fault_from_custom_adapter_propagates() {
    let store = Arc::new(FlakyStore {
        inner: MemoryStore::from_json(PRODUCTS_JSON).unwrap(),
        fail_commit: AtomicBool::new(true),
    });
    let mut repo = GenericRepository::new(Arc::clone(&store));

    repo.add(product(19, "Redis Blue Boots", "Redis", "Boots", "220.00"));
    repo.remove(product(1, "", "", "", "0"));
    let err = repo.save_all().await.unwrap_err();
    assert!(err.is_store_fault());
    assert!(!repo.exists(&19).await.unwrap());
    assert!(repo.exists(&1).await.unwrap());

    // Retry with a fresh unit of work once the store recovers
    repo.add(product(19, "Redis Blue Boots", "Redis", "Boots", "220.00"));
    repo.remove(product(1, "", "", "", "0"));
    assert!(repo.save_all().await.unwrap());
    assert!(repo.exists(&19).await.unwrap());
    assert!(!repo.exists(&1).await.unwrap());
}

// ============ Deferred Adapter ============

/// Collection handle that records the plan and only touches the backing rows
/// in its terminal call, where the connection may already be gone.
struct Cursor<T> {
    rows: Rows<T>,
    connected: bool,
}

impl<T> Cursor<T> {
    fn ensure_connected(&self) -> catalog_query::Result<()> {
        if self.connected {
            Ok(())
        } else {
            Err(Error::StoreUnavailable("cursor lost its connection".into()))
        }
    }
}

impl<T> Queryable<T> for Cursor<T> {
    fn filter(self, criteria: &Criteria<T>) -> Self {
        Self {
            rows: self.rows.filter(criteria),
            ..self
        }
    }

    fn distinct_by<K, F>(self, key: F) -> Self
    where
        K: Eq + Hash,
        F: Fn(&T) -> K,
    {
        Self {
            rows: self.rows.distinct_by(key),
            ..self
        }
    }

    fn order_by(self, order: &Order<T>) -> Self {
        Self {
            rows: self.rows.order_by(order),
            ..self
        }
    }

    fn window(self, skip: usize, take: usize) -> Self {
        Self {
            rows: self.rows.window(skip, take),
            ..self
        }
    }

    fn project<R>(self, selector: &Selector<T, R>) -> catalog_query::Result<Vec<R>> {
        self.ensure_connected()?;
        self.rows.project(selector)
    }

    fn count(self) -> catalog_query::Result<u64> {
        self.ensure_connected()?;
        self.rows.count()
    }
}

/// Store whose source always opens, but whose cursors fail at read time
/// while `connected` is false.
struct CursorStore<T: Entity> {
    inner: MemoryStore<T>,
    connected: AtomicBool,
}

#[async_trait]
impl<T: Entity> Store<T> for CursorStore<T> {
    type Source = Cursor<T>;

    async fn source(&self) -> catalog_query::Result<Self::Source> {
        Ok(Cursor {
            rows: self.inner.source().await?,
            connected: self.connected.load(Ordering::SeqCst),
        })
    }

    async fn find(&self, id: &T::Id) -> catalog_query::Result<Option<T>> {
        self.inner.find(id).await
    }

    async fn contains(&self, id: &T::Id) -> catalog_query::Result<bool> {
        self.inner.contains(id).await
    }

    async fn commit(&self, changes: Vec<Change<T>>) -> catalog_query::Result<CommitResult> {
        self.inner.commit(changes).await
    }
}

#[tokio::test]
async fn test_fault_during_evaluation_is_not_an_empty_page() {
    let store = Arc::new(CursorStore {
        inner: MemoryStore::from_json(PRODUCTS_JSON).unwrap(),
        connected: AtomicBool::new(true),
    });
    let repo = GenericRepository::new(Arc::clone(&store));
    let spec = product_specification(
        &ProductSpecParams::default().brands("React"),
        &PageLimits::default(),
    )
    .unwrap();

    let page = paginate(&repo, &spec, 0, 6).await.unwrap();
    assert_eq!(page.count, 5);

    store.connected.store(false, Ordering::SeqCst);
    let err = paginate(&repo, &spec, 0, 6).await.unwrap_err();
    assert!(matches!(err, Error::StoreUnavailable(_)));
    assert!(repo.count(&brand_list()).await.unwrap_err().is_store_fault());
}

// ============ Projections Without Hash ============

/// Listing row that is neither `Eq` nor `Hash`.
#[derive(Debug, Clone, PartialEq)]
struct PriceTag {
    name: String,
    price: f64,
}

#[tokio::test]
async fn test_non_hashable_projection_pages() {
    let store = store();
    let repo = repository(&store);

    let spec = Specification::select(|p: &Product| PriceTag {
        name: p.name.clone(),
        price: p.price.to_string().parse().unwrap_or(f64::NAN),
    })
    .filter(|p: &Product| p.product_type == "Hats")
    .order_by_descending("price", |p: &Product| p.price)
    .paging(0, 2)
    .unwrap();

    let page = paginate(&repo, &spec, 0, 2).await.unwrap();
    assert_eq!(page.count, 3);
    assert_eq!(
        page.data,
        vec![
            PriceTag {
                name: "Purple React Woolen Hat".to_string(),
                price: 15.0
            },
            PriceTag {
                name: "Core Blue Hat".to_string(),
                price: 10.0
            },
        ]
    );
}

#[tokio::test]
async fn test_last_possible_page_index_is_empty() {
    let store = store();
    let repo = repository(&store);
    let params = ProductSpecParams::default().page(usize::MAX, 6);
    let spec = product_specification(&params, &PageLimits::default()).unwrap();

    let page = paginate(&repo, &spec, params.page_index, 6).await.unwrap();
    assert!(page.data.is_empty());
    assert_eq!(page.count, 18);
    assert!(!page.has_next());
    assert!(page.has_previous());
}

// ============ Faults And Concurrency ============

#[tokio::test]
async fn test_read_fault_is_not_an_empty_page() {
    let store = store();
    let repo = repository(&store);
    let spec = product_specification(&ProductSpecParams::default(), &PageLimits::default())
        .unwrap();

    store.set_available(false);
    let err = paginate(&repo, &spec, 0, 6).await.unwrap_err();
    assert!(matches!(err, Error::StoreUnavailable(_)));
}

#[tokio::test]
async fn test_concurrent_listings_share_one_store() {
    let store = store();
    let mut handles = Vec::new();

    for page_index in 0..3 {
        let repo = repository(&store);
        handles.push(tokio::spawn(async move {
            let limits = PageLimits::default();
            let params = ProductSpecParams::default().sort("price-asc").page(page_index, 6);
            let spec = product_specification(&params, &limits)?;
            paginate(&repo, &spec, page_index, 6).await
        }));
    }

    let mut total = 0;
    for handle in handles {
        let page = handle.await.unwrap().unwrap();
        assert_eq!(page.count, 18);
        total += page.data.len();
    }
    assert_eq!(total, 18);
}

// ============ Envelope ============

#[tokio::test]
async fn test_envelope_json_shape() {
    let store = store();
    let repo = repository(&store);
    let limits = PageLimits::default();
    let params = ProductSpecParams::default().types("Hats").page(0, 2);
    let spec = product_specification(&params, &limits).unwrap();

    let page = paginate(&repo, &spec, 0, 2).await.unwrap();
    let json = serde_json::to_value(&page).unwrap();

    assert_eq!(json["pageIndex"], 0);
    assert_eq!(json["pageSize"], 2);
    assert_eq!(json["count"], 3);
    assert_eq!(json["data"].as_array().map(Vec::len), Some(2));
    assert_eq!(json["data"][0]["type"], "Hats");
    assert_eq!(json["data"][0]["name"], "Core Blue Hat");
}
