use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use warehouse_core::{DomainError, DomainResult, Entity, ProductId};

/// Command: CreateProduct.
///
/// `category`, `quantity`, `sku` and `notes` are optional on creation; use
/// [`CreateProduct::new`] plus the `with_*` helpers to fill only what you have.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateProduct {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub category: String,
    pub quantity: i64,
    pub sku: String,
    pub notes: Option<String>,
}

impl CreateProduct {
    pub fn new(
        id: ProductId,
        name: impl Into<String>,
        description: impl Into<String>,
        price: Decimal,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            description: description.into(),
            price,
            category: String::new(),
            quantity: 0,
            sku: String::new(),
            notes: None,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_quantity(mut self, quantity: i64) -> Self {
        self.quantity = quantity;
        self
    }

    pub fn with_sku(mut self, sku: impl Into<String>) -> Self {
        self.sku = sku.into();
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

/// Command: UpdateProduct (partial update).
///
/// `None` leaves a field unchanged. For `notes`, `Some(None)` clears the notes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateProduct {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub category: Option<String>,
    pub quantity: Option<i64>,
    pub sku: Option<String>,
    pub notes: Option<Option<String>>,
}

impl UpdateProduct {
    /// True when the update carries no field at all.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.price.is_none()
            && self.category.is_none()
            && self.quantity.is_none()
            && self.sku.is_none()
            && self.notes.is_none()
    }
}

/// Entity: Product (catalog article with its current stock level).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Product {
    id: ProductId,
    name: String,
    description: String,
    category: String,
    sku: String,
    price: Decimal,
    quantity: i64,
    notes: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Product {
    /// Build a new product, enforcing the price/quantity invariants.
    pub fn create(cmd: CreateProduct, now: DateTime<Utc>) -> DomainResult<Self> {
        ensure_valuation(cmd.price, cmd.quantity)?;

        Ok(Self {
            id: cmd.id,
            name: cmd.name,
            description: cmd.description,
            category: cmd.category,
            sku: cmd.sku,
            price: cmd.price,
            quantity: cmd.quantity,
            notes: cmd.notes,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn sku(&self) -> &str {
        &self.sku
    }

    pub fn price(&self) -> Decimal {
        self.price
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Stock value: `price * quantity`.
    pub fn total_value(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }

    /// Apply a partial update and return the stock delta (`new - old`).
    ///
    /// Every supplied field is validated before anything is written, so a
    /// rejected update leaves the product untouched.
    pub fn apply_update(&mut self, update: &UpdateProduct, now: DateTime<Utc>) -> DomainResult<i64> {
        let price = update.price.unwrap_or(self.price);
        let quantity = update.quantity.unwrap_or(self.quantity);
        ensure_valuation(price, quantity)?;

        if let Some(name) = &update.name {
            self.name = name.clone();
        }
        if let Some(description) = &update.description {
            self.description = description.clone();
        }
        if let Some(category) = &update.category {
            self.category = category.clone();
        }
        if let Some(sku) = &update.sku {
            self.sku = sku.clone();
        }
        if let Some(notes) = &update.notes {
            self.notes = notes.clone();
        }

        let delta = quantity - self.quantity;
        self.price = price;
        self.quantity = quantity;
        self.updated_at = now;

        Ok(delta)
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

fn ensure_valuation(price: Decimal, quantity: i64) -> DomainResult<()> {
    if price < Decimal::ZERO {
        return Err(DomainError::invalid_value("price cannot be negative"));
    }
    if quantity < 0 {
        return Err(DomainError::invalid_value("quantity cannot be negative"));
    }
    // Keeps `total_value()` from overflowing for any stored product.
    if price.checked_mul(Decimal::from(quantity)).is_none() {
        return Err(DomainError::invalid_value("stock value out of range"));
    }
    Ok(())
}
