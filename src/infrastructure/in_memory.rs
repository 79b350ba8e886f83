use crate::domain::order::{CustomerOrder, OrderResponseGroup};
use crate::domain::ports::{OrderStore, StoreService};
use crate::domain::store::Store;
use crate::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A thread-safe in-memory order store.
///
/// Uses `Arc<RwLock<HashMap<String, CustomerOrder>>>` so clones share the same
/// orders. Stands in for the host's order service in tests and the CLI.
#[derive(Default, Clone)]
pub struct InMemoryOrderStore {
    orders: Arc<RwLock<HashMap<String, CustomerOrder>>>,
}

impl InMemoryOrderStore {
    /// Creates a new, empty in-memory order store.
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, order: CustomerOrder) {
        let mut orders = self.orders.write().await;
        orders.insert(order.id.clone(), order);
    }

    /// Snapshot of all orders, sorted by id.
    pub async fn all_orders(&self) -> Vec<CustomerOrder> {
        let orders = self.orders.read().await;
        let mut all: Vec<_> = orders.values().cloned().collect();
        all.sort_by(|a, b| a.id.cmp(&b.id));
        all
    }
}

#[async_trait]
impl OrderStore for InMemoryOrderStore {
    async fn get_by_id(
        &self,
        order_id: &str,
        response_group: OrderResponseGroup,
    ) -> Result<Option<CustomerOrder>> {
        let orders = self.orders.read().await;
        Ok(orders.get(order_id).cloned().map(|mut order| {
            if response_group == OrderResponseGroup::Default {
                order.in_payments.clear();
            }
            order
        }))
    }

    async fn update(&self, updated: Vec<CustomerOrder>) -> Result<()> {
        let mut orders = self.orders.write().await;
        for order in updated {
            orders.insert(order.id.clone(), order);
        }
        Ok(())
    }
}

/// A thread-safe in-memory store catalogue.
#[derive(Default, Clone)]
pub struct InMemoryStoreService {
    stores: Arc<RwLock<HashMap<String, Store>>>,
}

impl InMemoryStoreService {
    /// Creates a new, empty in-memory store catalogue.
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, store: Store) {
        let mut stores = self.stores.write().await;
        stores.insert(store.id.clone(), store);
    }
}

#[async_trait]
impl StoreService for InMemoryStoreService {
    async fn get_by_id(&self, store_id: &str) -> Result<Option<Store>> {
        let stores = self.stores.read().await;
        Ok(stores.get(store_id).cloned())
    }
}
