//! Inventory domain module.
//!
//! This crate contains the business rules for products and stock movements,
//! plus the report aggregates built from them. Everything here is
//! deterministic domain logic (no IO, no storage); callers pass in the clock.

pub mod movement;
pub mod product;
pub mod render;
pub mod report;

pub use movement::{Movement, MovementType, RecordMovement, SYSTEM_ACTOR};
pub use product::{CreateProduct, Product, UpdateProduct};
pub use report::{InventoryLine, InventoryReport, MovementReport, INVENTORY_REPORT_TITLE};
