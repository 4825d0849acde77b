//! Plain-text rendering of the report aggregates.

use core::fmt;

use crate::report::{InventoryReport, MovementReport};

pub const EMPTY_INVENTORY_MESSAGE: &str = "Inventory report: no products in stock.";
pub const EMPTY_MOVEMENTS_MESSAGE: &str = "Movement report: no movements recorded.";

const INVENTORY_WIDTH: usize = 60;
const MOVEMENTS_WIDTH: usize = 80;
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";
const MISSING_REASON: &str = "-";

impl fmt::Display for InventoryReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return writeln!(f, "{EMPTY_INVENTORY_MESSAGE}");
        }

        let rule = "=".repeat(INVENTORY_WIDTH);
        writeln!(f, "{rule}")?;
        writeln!(f, "{}", self.title.to_uppercase())?;
        writeln!(f, "{rule}")?;
        writeln!(f, "ID | Name | Category | Quantity | Price | Total")?;
        writeln!(f, "{}", "-".repeat(INVENTORY_WIDTH))?;

        for line in &self.items {
            writeln!(
                f,
                "{} | {} | {} | {} | {:.2} | {:.2}",
                line.id, line.name, line.category, line.quantity, line.price, line.total_value
            )?;
        }

        writeln!(f, "{}", "-".repeat(INVENTORY_WIDTH))?;
        writeln!(f, "Total inventory value: {:.2}", self.total_value_sum)?;
        writeln!(f, "{rule}")
    }
}

impl fmt::Display for MovementReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return writeln!(f, "{EMPTY_MOVEMENTS_MESSAGE}");
        }

        let rule = "=".repeat(MOVEMENTS_WIDTH);
        writeln!(f, "{rule}")?;
        writeln!(f, "MOVEMENT REPORT")?;
        writeln!(f, "{rule}")?;
        writeln!(f, "Time             | Product | Type | Change | User | Reason")?;
        writeln!(f, "{}", "-".repeat(MOVEMENTS_WIDTH))?;

        for m in &self.entries {
            writeln!(
                f,
                "{} | {} | {} | {:+} | {} | {}",
                m.timestamp().format(TIMESTAMP_FORMAT),
                m.product_id(),
                m.movement_type(),
                m.quantity_change(),
                m.performed_by(),
                single_line_reason(m.reason()),
            )?;
        }

        writeln!(f, "{}", "-".repeat(MOVEMENTS_WIDTH))?;
        writeln!(
            f,
            "IN total: {} | OUT total: {} | net: {}",
            self.in_total, self.out_total, self.net
        )?;
        writeln!(f, "movements: {}", self.len())?;
        writeln!(f, "{rule}")
    }
}

fn single_line_reason(reason: Option<&str>) -> String {
    let flat = reason.unwrap_or_default().replace(['\r', '\n'], " ");
    let flat = flat.trim();
    if flat.is_empty() {
        MISSING_REASON.to_string()
    } else {
        flat.to_string()
    }
}
