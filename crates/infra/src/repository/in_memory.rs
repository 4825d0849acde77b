use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use warehouse_core::{index_by_id, Entity, ProductId};
use warehouse_inventory::{Movement, Product};

use super::r#trait::Repository;

#[derive(Debug, Default)]
struct State {
    products: BTreeMap<ProductId, Product>,
    movements: Vec<Movement>,
}

/// In-memory repository.
///
/// Intended for tests/dev and as the backing store of the JSON-seeded
/// repository. Nothing survives the process.
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    state: RwLock<State>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Repository pre-populated with products and movements.
    ///
    /// Products sharing an id collapse to the last one given.
    pub fn seeded(
        products: impl IntoIterator<Item = Product>,
        movements: impl IntoIterator<Item = Movement>,
    ) -> Self {
        Self {
            state: RwLock::new(State {
                products: index_by_id(products),
                movements: movements.into_iter().collect(),
            }),
        }
    }

    pub fn product_count(&self) -> usize {
        self.read().products.len()
    }

    pub fn movement_count(&self) -> usize {
        self.read().movements.len()
    }

    // Every write is a single insert/remove/push; a poisoned lock still guards consistent state.
    fn read(&self) -> RwLockReadGuard<'_, State> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, State> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Repository for InMemoryRepository {
    fn save_product(&self, product: Product) {
        self.write().products.insert(product.id().clone(), product);
    }

    fn load_product(&self, id: &ProductId) -> Option<Product> {
        self.read().products.get(id).cloned()
    }

    fn load_all_products(&self) -> BTreeMap<ProductId, Product> {
        self.read().products.clone()
    }

    fn delete_product(&self, id: &ProductId) {
        self.write().products.remove(id);
    }

    fn save_movement(&self, movement: Movement) {
        self.write().movements.push(movement);
    }

    fn load_movements(&self) -> Vec<Movement> {
        self.read().movements.clone()
    }
}
