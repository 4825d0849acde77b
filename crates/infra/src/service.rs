//! Warehouse use cases (application-level orchestration).
//!
//! `WarehouseService` is the single entry point for product and movement
//! business rules. It is generic over any [`Repository`] and holds no state of
//! its own:
//!
//! ```text
//! caller
//!   ↓
//! 1. Load current state from the repository
//!   ↓
//! 2. Validate + build/mutate entities (pure domain code)
//!   ↓
//! 3. Save the product
//!   ↓
//! 4. Append the derived movement, if the stock level changed
//! ```
//!
//! Every operation runs to completion synchronously; callers that share a
//! service across threads serialize access themselves.

use std::collections::BTreeMap;

use chrono::Utc;

use warehouse_core::{DomainError, DomainResult, Entity, MovementId, ProductId};
use warehouse_inventory::{
    CreateProduct, InventoryReport, Movement, MovementReport, MovementType, Product,
    RecordMovement, UpdateProduct,
};

use crate::repository::Repository;

/// Category filter value that disables category filtering.
pub const ALL_CATEGORIES: &str = "All";

pub const INITIAL_STOCK_REASON: &str = "initial stock";
pub const CORRECTION_REASON: &str = "stock correction";

pub struct WarehouseService<R> {
    repository: R,
}

impl<R> WarehouseService<R>
where
    R: Repository,
{
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// Create a product; a positive initial quantity is booked as an `IN` movement.
    pub fn create_product(&self, cmd: CreateProduct) -> DomainResult<Product> {
        if self.repository.load_product(&cmd.id).is_some() {
            tracing::warn!(product_id = %cmd.id, "rejected create: id already exists");
            return Err(DomainError::duplicate_id(cmd.id.as_str()));
        }

        let now = Utc::now();
        let product = Product::create(cmd, now)?;
        self.repository.save_product(product.clone());

        if product.quantity() > 0 {
            self.record(
                RecordMovement::new(
                    product.id().clone(),
                    product.name(),
                    product.quantity(),
                    MovementType::In,
                    now,
                )
                .with_reason(INITIAL_STOCK_REASON),
            )?;
        }

        tracing::info!(
            product_id = %product.id(),
            quantity = product.quantity(),
            "product created"
        );
        Ok(product)
    }

    pub fn read_product(&self, id: &ProductId) -> Option<Product> {
        self.repository.load_product(id)
    }

    /// Products matching `search` (case-insensitive, against `"{id} {name}"`)
    /// and `category` (exact; empty or [`ALL_CATEGORIES`] matches everything).
    pub fn list_products(&self, search: &str, category: &str) -> BTreeMap<ProductId, Product> {
        let products = self.repository.load_all_products();
        let search = search.trim().to_lowercase();
        let category = category.trim();
        let by_category = !category.is_empty() && category != ALL_CATEGORIES;

        if search.is_empty() && !by_category {
            return products;
        }

        let filtered: BTreeMap<ProductId, Product> = products
            .into_iter()
            .filter(|(_, p)| !by_category || p.category() == category)
            .filter(|(id, p)| {
                search.is_empty() || format!("{} {}", id, p.name()).to_lowercase().contains(&search)
            })
            .collect();

        tracing::debug!(
            search = %search,
            category = %category,
            matches = filtered.len(),
            "filtered products"
        );
        filtered
    }

    /// Apply a partial update. A changed quantity is booked as a `CORRECTION`
    /// movement carrying the delta.
    pub fn update_product(&self, id: &ProductId, update: UpdateProduct) -> DomainResult<Product> {
        let Some(mut product) = self.repository.load_product(id) else {
            tracing::warn!(product_id = %id, "rejected update: unknown product");
            return Err(DomainError::not_found(id.as_str()));
        };
        if update.is_empty() {
            tracing::debug!(product_id = %id, "update carries no fields; only updated_at changes");
        }

        let now = Utc::now();
        let delta = product.apply_update(&update, now).inspect_err(|err| {
            tracing::warn!(product_id = %id, error = %err, "rejected update");
        })?;
        self.repository.save_product(product.clone());

        if delta != 0 {
            self.record(
                RecordMovement::new(product.id().clone(), product.name(), delta, MovementType::Correction, now)
                    .with_reason(CORRECTION_REASON),
            )?;
        }

        tracing::info!(product_id = %id, delta, "product updated");
        Ok(product)
    }

    /// Remove a product. Returns `false` for unknown ids; recorded movements stay.
    pub fn delete_product(&self, id: &ProductId) -> bool {
        if self.repository.load_product(id).is_none() {
            tracing::debug!(product_id = %id, "delete of unknown product ignored");
            return false;
        }
        self.repository.delete_product(id);
        tracing::info!(product_id = %id, "product deleted");
        true
    }

    /// All movements in storage order.
    pub fn list_movements(&self) -> Vec<Movement> {
        self.repository.load_movements()
    }

    /// Valuation of current stock, computed from a single product snapshot.
    ///
    /// `InvalidValue` when the summed stock value leaves the `Decimal` range.
    pub fn generate_inventory_report(&self) -> DomainResult<InventoryReport> {
        let snapshot = self.repository.load_all_products();
        InventoryReport::from_products(snapshot.values(), Utc::now()).inspect_err(|err| {
            tracing::warn!(products = snapshot.len(), error = %err, "inventory report failed");
        })
    }

    pub fn generate_inventory_report_text(&self) -> DomainResult<String> {
        Ok(self.generate_inventory_report()?.to_string())
    }

    pub fn generate_movement_report(&self) -> MovementReport {
        MovementReport::from_movements(self.repository.load_movements(), Utc::now())
    }

    pub fn generate_movement_report_text(&self) -> String {
        self.generate_movement_report().to_string()
    }

    fn record(&self, cmd: RecordMovement) -> DomainResult<Movement> {
        let movement = Movement::record(MovementId::generate(), cmd)?;
        self.repository.save_movement(movement.clone());
        tracing::debug!(
            movement_id = %movement.id(),
            product_id = %movement.product_id(),
            change = movement.quantity_change(),
            kind = %movement.movement_type(),
            "movement recorded"
        );
        Ok(movement)
    }
}
