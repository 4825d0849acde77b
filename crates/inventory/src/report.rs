//! Report aggregates.
//!
//! Reports are plain values computed from a snapshot of products or
//! movements. Text output lives in [`crate::render`] as `Display` impls, so the
//! numbers here can be checked without parsing any formatted text.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use warehouse_core::{DomainError, DomainResult, Entity, ProductId};

use crate::movement::Movement;
use crate::product::Product;

pub const INVENTORY_REPORT_TITLE: &str = "Inventory report";

/// One product line of the inventory report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InventoryLine {
    pub id: ProductId,
    pub name: String,
    pub category: String,
    pub quantity: i64,
    pub price: Decimal,
    /// `price * quantity`.
    pub total_value: Decimal,
}

/// Valuation snapshot of current stock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InventoryReport {
    pub title: String,
    pub generated_at: DateTime<Utc>,
    pub items: Vec<InventoryLine>,
    /// Sum of all line totals.
    pub total_value_sum: Decimal,
}

impl InventoryReport {
    /// Build the report from one snapshot of products, in iteration order.
    ///
    /// Fails when the summed stock value leaves the `Decimal` range.
    pub fn from_products<'a, I>(products: I, generated_at: DateTime<Utc>) -> DomainResult<Self>
    where
        I: IntoIterator<Item = &'a Product>,
    {
        let items: Vec<InventoryLine> = products
            .into_iter()
            .map(|p| InventoryLine {
                id: p.id().clone(),
                name: p.name().to_string(),
                category: p.category().to_string(),
                quantity: p.quantity(),
                price: p.price(),
                total_value: p.total_value(),
            })
            .collect();
        let total_value_sum = items
            .iter()
            .try_fold(Decimal::ZERO, |sum, line| sum.checked_add(line.total_value))
            .ok_or_else(|| DomainError::invalid_value("inventory value out of range"))?;

        Ok(Self {
            title: INVENTORY_REPORT_TITLE.to_string(),
            generated_at,
            items,
            total_value_sum,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Chronological ledger of stock changes with IN/OUT/net totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MovementReport {
    pub generated_at: DateTime<Utc>,
    /// Movements ordered by timestamp; equal timestamps keep input order.
    pub entries: Vec<Movement>,
    /// Sum of positive changes.
    pub in_total: i128,
    /// Sum of the absolute values of negative changes.
    pub out_total: i128,
    /// `in_total - out_total`.
    pub net: i128,
}

impl MovementReport {
    pub fn from_movements<I>(movements: I, generated_at: DateTime<Utc>) -> Self
    where
        I: IntoIterator<Item = Movement>,
    {
        let mut entries: Vec<Movement> = movements.into_iter().collect();
        // `sort_by_key` is stable.
        entries.sort_by_key(|m| m.timestamp());

        // i128 sums of i64 changes (i64::MIN included) cannot overflow.
        let (in_total, out_total) = entries.iter().fold((0i128, 0i128), |(inbound, outbound), m| {
            let change = i128::from(m.quantity_change());
            if m.is_inbound() {
                (inbound + change, outbound)
            } else {
                (inbound, outbound - change)
            }
        });

        Self {
            generated_at,
            entries,
            in_total,
            out_total,
            net: in_total - out_total,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::movement::{MovementType, RecordMovement};
    use crate::product::CreateProduct;
    use chrono::TimeZone;
    use proptest::prelude::*;
    use warehouse_core::MovementId;

    fn product(id: &str, price: Decimal, quantity: i64) -> Product {
        let cmd = CreateProduct::new(ProductId::new(id).unwrap(), id, "", price).with_quantity(quantity);
        Product::create(cmd, Utc::now()).unwrap()
    }

    fn movement(id: &str, change: i64, at: DateTime<Utc>) -> Movement {
        let kind = if change > 0 { MovementType::In } else { MovementType::Out };
        let cmd = RecordMovement::new(ProductId::new("P1").unwrap(), "A", change, kind, at);
        Movement::record(MovementId::new(id).unwrap(), cmd).unwrap()
    }

    fn at(day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 2, day, hour, 0, 0).unwrap()
    }

    #[test]
    fn inventory_report_sums_line_totals() {
        let products = vec![
            product("P001", Decimal::new(10, 0), 5),
            product("P002", Decimal::new(3, 0), 4),
        ];

        let report = InventoryReport::from_products(&products, Utc::now()).unwrap();

        assert_eq!(report.title, INVENTORY_REPORT_TITLE);
        assert_eq!(report.items.len(), 2);
        assert_eq!(report.items[0].total_value, Decimal::new(50, 0));
        assert_eq!(report.total_value_sum, Decimal::new(62, 0));
    }

    #[test]
    fn inventory_report_of_nothing_is_empty() {
        let report = InventoryReport::from_products(&Vec::<Product>::new(), Utc::now()).unwrap();
        assert!(report.is_empty());
        assert_eq!(report.total_value_sum, Decimal::ZERO);
    }

    #[test]
    fn inventory_value_beyond_decimal_range_is_an_error() {
        // Each product is valid on its own; only the sum overflows.
        let products = vec![
            product("P1", Decimal::MAX, 1),
            product("P2", Decimal::MAX, 1),
        ];

        let err = InventoryReport::from_products(&products, Utc::now()).unwrap_err();
        match err {
            DomainError::InvalidValue(msg) if msg.contains("inventory value") => {}
            other => panic!("Expected InvalidValue for overflowing total, got {other:?}"),
        }
    }

    #[test]
    fn movement_report_orders_by_timestamp() {
        let later = movement("1", 5, at(2, 10));
        let earlier = movement("2", -2, at(1, 9));

        let report = MovementReport::from_movements(vec![later, earlier], Utc::now());

        let ids: Vec<&str> = report.entries.iter().map(|m| m.id().as_str()).collect();
        assert_eq!(ids, vec!["2", "1"]);
    }

    #[test]
    fn movement_report_sort_is_stable_for_ties() {
        let ts = at(3, 12);
        let movements = vec![
            movement("b", 1, ts),
            movement("a", 2, ts),
            movement("c", -1, at(1, 0)),
            movement("d", 3, ts),
        ];

        let report = MovementReport::from_movements(movements, Utc::now());

        let ids: Vec<&str> = report.entries.iter().map(|m| m.id().as_str()).collect();
        assert_eq!(ids, vec!["c", "b", "a", "d"]);
    }

    #[test]
    fn movement_report_totals() {
        let report = MovementReport::from_movements(
            vec![movement("1", 5, at(2, 10)), movement("2", -2, at(1, 9))],
            Utc::now(),
        );

        assert_eq!(report.in_total, 5);
        assert_eq!(report.out_total, 2);
        assert_eq!(report.net, 3);
        assert_eq!(report.len(), 2);
    }

    #[test]
    fn movement_totals_hold_at_i64_bounds() {
        let report = MovementReport::from_movements(
            vec![
                movement("1", i64::MAX, at(1, 0)),
                movement("2", i64::MAX, at(2, 0)),
                movement("3", i64::MIN, at(3, 0)),
            ],
            Utc::now(),
        );

        let max = i128::from(i64::MAX);
        assert_eq!(report.in_total, 2 * max);
        assert_eq!(report.out_total, max + 1);
        assert_eq!(report.net, max - 1);
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: the report total equals the sum of price * quantity over all products.
        #[test]
        fn total_value_sum_matches_products(
            lines in prop::collection::vec((0i64..1_000_000i64, 0u32..4u32, 0i64..10_000i64), 0..20)
        ) {
            let products: Vec<Product> = lines
                .iter()
                .enumerate()
                .map(|(idx, (mantissa, scale, qty))| {
                    product(&format!("P{idx}"), Decimal::new(*mantissa, *scale), *qty)
                })
                .collect();

            let expected: Decimal = products
                .iter()
                .map(|p| p.price() * Decimal::from(p.quantity()))
                .sum();

            let report = InventoryReport::from_products(&products, Utc::now()).unwrap();
            prop_assert_eq!(report.total_value_sum, expected);
            prop_assert_eq!(report.items.len(), products.len());
        }

        /// Property: net equals the plain sum of all changes.
        #[test]
        fn net_equals_sum_of_changes(
            changes in prop::collection::vec(prop_oneof![-1_000i64..0i64, 1i64..1_000i64], 0..30)
        ) {
            let movements: Vec<Movement> = changes
                .iter()
                .enumerate()
                .map(|(idx, change)| movement(&format!("m{idx}"), *change, at(1 + (idx as u32 % 20), 0)))
                .collect();

            let report = MovementReport::from_movements(movements, Utc::now());

            prop_assert_eq!(report.net, changes.iter().map(|c| i128::from(*c)).sum::<i128>());
            prop_assert!(report.in_total >= 0);
            prop_assert!(report.out_total >= 0);
            prop_assert!(report.entries.windows(2).all(|w| w[0].timestamp() <= w[1].timestamp()));
        }
    }
}
