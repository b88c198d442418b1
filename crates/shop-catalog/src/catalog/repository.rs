//! In-memory product store.

use crate::catalog::product::{current_timestamp, Product, ValidatedProduct};
use crate::error::CatalogError;
use crate::ids::{ProductId, SubscriptionId};
use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Listener invoked once per successful insert.
pub type ProductListener = Arc<dyn Fn(&Product) + Send + Sync>;

#[derive(Default)]
struct CatalogState {
    /// Insertion order is the catalog's natural order; queries tie-break on it.
    products: Vec<Product>,
    /// Upper-cased SKU to position in `products`. Stable because there is no
    /// delete path.
    sku_index: HashMap<String, usize>,
}

/// Authoritative in-memory collection of products.
///
/// The repository owns two contracts: SKU uniqueness (checked and inserted
/// under one write lock, so concurrent `add` calls cannot both claim a SKU)
/// and at-most-once listener notification per successful insert, delivered
/// in registration order.
///
/// One instance lives for the whole process, constructed at startup and
/// dropped at teardown; tests construct a fresh instance each instead of
/// sharing one.
#[derive(Default)]
pub struct ProductRepository {
    state: RwLock<CatalogState>,
    listeners: Mutex<Vec<(SubscriptionId, ProductListener)>>,
    next_subscription: AtomicU64,
}

impl ProductRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a validated product, assigning its ID.
    ///
    /// Fails with [`CatalogError::DuplicateSku`] when another product holds
    /// the same SKU (compared case-insensitively), leaving the repository
    /// unchanged. On success the stored record is returned and every
    /// subscriber is notified once.
    pub fn add(&self, input: ValidatedProduct) -> Result<Product, CatalogError> {
        let product = {
            let mut state = self.state.write();

            let normalized = input.sku.trim().to_uppercase();
            if state.sku_index.contains_key(&normalized) {
                tracing::warn!(sku = %normalized, "rejected insert: SKU already exists");
                return Err(CatalogError::DuplicateSku(normalized));
            }

            let product = Product {
                id: ProductId::generate(),
                sku: normalized.clone(),
                name: input.name,
                price: input.price,
                quantity: input.quantity,
                category: input.category,
                brand: input.brand,
                color: input.color,
                status: input.status,
                rating: input.rating,
                image: input.image,
                in_stock: input.in_stock,
                created_at: current_timestamp(),
            };

            let position = state.products.len();
            state.products.push(product.clone());
            state.sku_index.insert(normalized, position);
            product
        };

        tracing::debug!(id = %product.id, sku = %product.sku, "product added");
        self.notify(&product);
        Ok(product)
    }

    /// Look up a product by SKU, case-insensitively. Pure read.
    pub fn get_by_sku(&self, sku: &str) -> Option<Product> {
        let normalized = sku.trim().to_uppercase();
        let state = self.state.read();
        state
            .sku_index
            .get(&normalized)
            .map(|&position| state.products[position].clone())
    }

    /// Full snapshot in insertion order.
    pub fn list(&self) -> Vec<Product> {
        self.state.read().products.clone()
    }

    pub fn len(&self) -> usize {
        self.state.read().products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.read().products.is_empty()
    }

    /// Distinct category labels in the current snapshot, sorted.
    pub fn categories(&self) -> Vec<String> {
        let state = self.state.read();
        crate::search::distinct_categories(&state.products)
    }

    /// Distinct brand labels in the current snapshot, sorted.
    pub fn brands(&self) -> Vec<String> {
        let state = self.state.read();
        crate::search::distinct_brands(&state.products)
    }

    /// Register a listener for future inserts.
    ///
    /// Listeners fire in registration order, at most once per mutation,
    /// after the insert has been committed.
    pub fn subscribe(&self, listener: impl Fn(&Product) + Send + Sync + 'static) -> SubscriptionId {
        let id = SubscriptionId::new(self.next_subscription.fetch_add(1, Ordering::Relaxed));
        self.listeners.lock().push((id, Arc::new(listener)));
        id
    }

    /// Remove a listener. Returns whether the handle was still registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut listeners = self.listeners.lock();
        let before = listeners.len();
        listeners.retain(|(registered, _)| *registered != id);
        listeners.len() != before
    }

    fn notify(&self, product: &Product) {
        // Snapshot the registry first so a listener can subscribe or
        // unsubscribe without deadlocking the fan-out.
        let snapshot: Vec<ProductListener> = self
            .listeners
            .lock()
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();
        for listener in snapshot {
            listener(product);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::product::{ProductStatus, DEFAULT_RATING};
    use std::sync::atomic::AtomicUsize;

    fn validated(sku: &str, name: &str) -> ValidatedProduct {
        ValidatedProduct {
            name: name.to_string(),
            price: 10.0,
            quantity: 5,
            sku: sku.to_string(),
            category: "Electronics".to_string(),
            brand: "Acme".to_string(),
            color: "Black".to_string(),
            status: ProductStatus::Available,
            rating: DEFAULT_RATING,
            image: None,
            in_stock: true,
        }
    }

    #[test]
    fn test_add_assigns_id_and_stores() {
        let repo = ProductRepository::new();
        let stored = repo.add(validated("ABC-1", "Widget")).unwrap();

        assert!(stored.id.as_str().starts_with("prod_"));
        assert_eq!(repo.len(), 1);
        assert_eq!(repo.list()[0], stored);
    }

    #[test]
    fn test_duplicate_sku_is_rejected_case_insensitively() {
        let repo = ProductRepository::new();
        repo.add(validated("A1", "First")).unwrap();
        repo.add(validated("A2", "Second")).unwrap();
        repo.add(validated("A3", "Third")).unwrap();

        let err = repo.add(validated("a1", "Imposter")).unwrap_err();
        assert_eq!(err, CatalogError::DuplicateSku("A1".to_string()));

        // Rejection left the repository unchanged.
        assert_eq!(repo.len(), 3);
        let skus: Vec<String> = repo.list().into_iter().map(|p| p.sku).collect();
        assert_eq!(skus, vec!["A1", "A2", "A3"]);
    }

    #[test]
    fn test_get_by_sku_is_case_insensitive() {
        let repo = ProductRepository::new();
        repo.add(validated("MOU-001", "Mouse")).unwrap();

        assert_eq!(repo.get_by_sku("mou-001").unwrap().name, "Mouse");
        assert_eq!(repo.get_by_sku(" MOU-001 ").unwrap().name, "Mouse");
        assert!(repo.get_by_sku("MOU-002").is_none());
    }

    #[test]
    fn test_list_preserves_insertion_order() {
        let repo = ProductRepository::new();
        for i in 0..10 {
            repo.add(validated(&format!("SKU-{i}"), &format!("Item {i}")))
                .unwrap();
        }

        let names: Vec<String> = repo.list().into_iter().map(|p| p.name).collect();
        let expected: Vec<String> = (0..10).map(|i| format!("Item {i}")).collect();
        assert_eq!(names, expected);
    }

    #[test]
    fn test_listeners_fire_once_per_insert_in_registration_order() {
        let repo = ProductRepository::new();
        let order = Arc::new(Mutex::new(Vec::new()));

        let first = Arc::clone(&order);
        repo.subscribe(move |p| first.lock().push(format!("first:{}", p.sku)));
        let second = Arc::clone(&order);
        repo.subscribe(move |p| second.lock().push(format!("second:{}", p.sku)));

        repo.add(validated("X1", "One")).unwrap();
        assert_eq!(
            *order.lock(),
            vec!["first:X1".to_string(), "second:X1".to_string()]
        );
    }

    #[test]
    fn test_failed_add_does_not_notify() {
        let repo = ProductRepository::new();
        let calls = Arc::new(AtomicUsize::new(0));

        let counter = Arc::clone(&calls);
        repo.subscribe(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        repo.add(validated("DUP", "Original")).unwrap();
        assert!(repo.add(validated("dup", "Copy")).is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_unsubscribe_stops_delivery() {
        let repo = ProductRepository::new();
        let calls = Arc::new(AtomicUsize::new(0));

        let counter = Arc::clone(&calls);
        let handle = repo.subscribe(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        repo.add(validated("S1", "Kept")).unwrap();
        assert!(repo.unsubscribe(handle));
        assert!(!repo.unsubscribe(handle));
        repo.add(validated("S2", "Dropped")).unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_facet_reads_are_distinct_and_sorted() {
        let repo = ProductRepository::new();
        let mut a = validated("F1", "A");
        a.category = "Toys".to_string();
        a.brand = "Zed".to_string();
        let mut b = validated("F2", "B");
        b.category = "Books".to_string();
        b.brand = "Acme".to_string();
        let mut c = validated("F3", "C");
        c.category = "Toys".to_string();
        c.brand = "Acme".to_string();

        repo.add(a).unwrap();
        repo.add(b).unwrap();
        repo.add(c).unwrap();

        assert_eq!(repo.categories(), vec!["Books", "Toys"]);
        assert_eq!(repo.brands(), vec!["Acme", "Zed"]);
    }

    #[test]
    fn test_concurrent_adds_cannot_share_a_sku() {
        let repo = Arc::new(ProductRepository::new());
        let mut handles = Vec::new();

        for i in 0..8 {
            let repo = Arc::clone(&repo);
            handles.push(std::thread::spawn(move || {
                repo.add(validated("RACE-1", &format!("Racer {i}"))).is_ok()
            }));
        }

        let successes = handles
            .into_iter()
            .filter_map(|h| h.join().ok())
            .filter(|inserted| *inserted)
            .count();

        assert_eq!(successes, 1);
        assert_eq!(repo.len(), 1);
    }
}
