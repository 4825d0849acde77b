//! JSON-seeded repository.
//!
//! The seed document is read once at construction:
//!
//! ```json
//! {
//!   "products":  [{ "product_id": "P1", "name": "Oil", "price": 10.0, "quantity": 3 }],
//!   "movements": [{ "id": "m1", "product_id": "P1", "quantity_change": 3,
//!                   "movement_type": "IN", "timestamp": "2026-02-01T09:00:00" }]
//! }
//! ```
//!
//! Afterwards the repository behaves exactly like [`InMemoryRepository`]; it
//! never writes back to the file.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;

use warehouse_core::{DomainError, MovementId, ProductId};
use warehouse_inventory::{
    CreateProduct, Movement, MovementType, Product, RecordMovement, SYSTEM_ACTOR,
};

use super::in_memory::InMemoryRepository;
use super::r#trait::{Repository, RepositoryError};

#[derive(Debug, Default, Deserialize)]
struct SeedDocument {
    #[serde(default)]
    products: Vec<ProductRecord>,
    #[serde(default)]
    movements: Vec<MovementRecord>,
}

#[derive(Debug, Deserialize)]
struct ProductRecord {
    product_id: String,
    name: String,
    #[serde(default)]
    description: String,
    price: Decimal,
    #[serde(default)]
    quantity: i64,
    #[serde(default)]
    sku: String,
    #[serde(default)]
    category: String,
    #[serde(default)]
    notes: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MovementRecord {
    id: String,
    product_id: String,
    #[serde(default)]
    product_name: String,
    quantity_change: i64,
    movement_type: MovementType,
    #[serde(default)]
    reason: Option<String>,
    #[serde(default)]
    timestamp: Option<String>,
    #[serde(default = "default_performer")]
    performed_by: String,
}

fn default_performer() -> String {
    SYSTEM_ACTOR.to_string()
}

/// Repository seeded from a JSON document.
#[derive(Debug)]
pub struct JsonRepository {
    source: Option<PathBuf>,
    inner: InMemoryRepository,
}

impl JsonRepository {
    /// Load the seed file at `path`.
    ///
    /// A missing file yields an empty repository. Unreadable or malformed
    /// files, and records that break entity invariants, are errors.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, RepositoryError> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::warn!(path = %path.display(), "seed file not found; starting with an empty repository");
            return Ok(Self {
                source: Some(path.to_path_buf()),
                inner: InMemoryRepository::new(),
            });
        }

        let raw = std::fs::read_to_string(path).map_err(|source| RepositoryError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut repo = Self::from_json_str(&raw)?;
        repo.source = Some(path.to_path_buf());
        Ok(repo)
    }

    /// Build a repository from an in-memory seed document.
    pub fn from_json_str(raw: &str) -> Result<Self, RepositoryError> {
        let document: SeedDocument = serde_json::from_str(raw)?;
        let loaded_at = Utc::now();

        let products = document
            .products
            .into_iter()
            .map(|record| product_from_record(record, loaded_at))
            .collect::<Result<Vec<_>, _>>()?;
        let movements = document
            .movements
            .into_iter()
            .map(|record| movement_from_record(record, loaded_at))
            .collect::<Result<Vec<_>, _>>()?;

        tracing::info!(
            products = products.len(),
            movements = movements.len(),
            "loaded seed document"
        );

        Ok(Self {
            source: None,
            inner: InMemoryRepository::seeded(products, movements),
        })
    }

    /// Seed file this repository was loaded from, if any.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }
}

impl Repository for JsonRepository {
    fn save_product(&self, product: Product) {
        self.inner.save_product(product)
    }

    fn load_product(&self, id: &ProductId) -> Option<Product> {
        self.inner.load_product(id)
    }

    fn load_all_products(&self) -> BTreeMap<ProductId, Product> {
        self.inner.load_all_products()
    }

    fn delete_product(&self, id: &ProductId) {
        self.inner.delete_product(id)
    }

    fn save_movement(&self, movement: Movement) {
        self.inner.save_movement(movement)
    }

    fn load_movements(&self) -> Vec<Movement> {
        self.inner.load_movements()
    }
}

fn invalid(record: &str, err: DomainError) -> RepositoryError {
    RepositoryError::InvalidRecord {
        record: record.to_string(),
        reason: err.to_string(),
    }
}

fn product_from_record(record: ProductRecord, loaded_at: DateTime<Utc>) -> Result<Product, RepositoryError> {
    let label = format!("product {:?}", record.product_id);
    let id = ProductId::new(record.product_id).map_err(|e| invalid(&label, e))?;

    let mut cmd = CreateProduct::new(id, record.name, record.description, record.price)
        .with_quantity(record.quantity)
        .with_sku(record.sku)
        .with_category(record.category);
    cmd.notes = record.notes;

    Product::create(cmd, loaded_at).map_err(|e| invalid(&label, e))
}

fn movement_from_record(record: MovementRecord, loaded_at: DateTime<Utc>) -> Result<Movement, RepositoryError> {
    let label = format!("movement {:?}", record.id);
    let id = MovementId::new(record.id).map_err(|e| invalid(&label, e))?;
    let product_id = ProductId::new(record.product_id).map_err(|e| invalid(&label, e))?;

    let timestamp = match record.timestamp.as_deref() {
        Some(raw) => parse_timestamp(raw).ok_or_else(|| RepositoryError::InvalidRecord {
            record: label.clone(),
            reason: format!("unrecognized timestamp {raw:?}"),
        })?,
        None => loaded_at,
    };

    let mut cmd = RecordMovement::new(
        product_id,
        record.product_name,
        record.quantity_change,
        record.movement_type,
        timestamp,
    )
    .performed_by(record.performed_by);
    cmd.reason = record.reason;

    Movement::record(id, cmd).map_err(|e| invalid(&label, e))
}

/// ISO-8601 timestamps: RFC 3339 with an offset, or a naive date/date-time
/// taken as UTC.
fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    const NAIVE_FORMATS: [&str; 4] = [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M",
    ];

    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    if let Some(naive) = NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
    {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
