use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;

use warehouse_core::ProductId;
use warehouse_inventory::{Movement, Product};

/// Storage backend failure.
///
/// Only construction of a backend can fail (e.g. reading a seed file); the
/// [`Repository`] operations themselves are infallible.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse seed document: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid seed record {record}: {reason}")]
    InvalidRecord { record: String, reason: String },
}

/// Storage for products and movements.
///
/// ## Semantics
///
/// - Products are keyed by id; `save_product` inserts or replaces.
/// - `load_all_products` returns a snapshot ordered by product id.
/// - `delete_product` is a no-op for unknown ids.
/// - Movements are append-only; `load_movements` returns them in the order
///   they were saved.
///
/// The repository does not enforce referential integrity between movements and
/// products: movements outlive the product they reference.
pub trait Repository: Send + Sync {
    fn save_product(&self, product: Product);

    fn load_product(&self, id: &ProductId) -> Option<Product>;

    fn load_all_products(&self) -> BTreeMap<ProductId, Product>;

    fn delete_product(&self, id: &ProductId);

    fn save_movement(&self, movement: Movement);

    fn load_movements(&self) -> Vec<Movement>;
}

impl<S> Repository for Arc<S>
where
    S: Repository + ?Sized,
{
    fn save_product(&self, product: Product) {
        (**self).save_product(product)
    }

    fn load_product(&self, id: &ProductId) -> Option<Product> {
        (**self).load_product(id)
    }

    fn load_all_products(&self) -> BTreeMap<ProductId, Product> {
        (**self).load_all_products()
    }

    fn delete_product(&self, id: &ProductId) {
        (**self).delete_product(id)
    }

    fn save_movement(&self, movement: Movement) {
        (**self).save_movement(movement)
    }

    fn load_movements(&self) -> Vec<Movement> {
        (**self).load_movements()
    }
}

impl<S> Repository for Box<S>
where
    S: Repository + ?Sized,
{
    fn save_product(&self, product: Product) {
        (**self).save_product(product)
    }

    fn load_product(&self, id: &ProductId) -> Option<Product> {
        (**self).load_product(id)
    }

    fn load_all_products(&self) -> BTreeMap<ProductId, Product> {
        (**self).load_all_products()
    }

    fn delete_product(&self, id: &ProductId) {
        (**self).delete_product(id)
    }

    fn save_movement(&self, movement: Movement) {
        (**self).save_movement(movement)
    }

    fn load_movements(&self) -> Vec<Movement> {
        (**self).load_movements()
    }
}
