use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use warehouse_core::{DomainError, DomainResult, Entity, MovementId, ProductId};

/// Performer recorded when no interactive actor is known.
pub const SYSTEM_ACTOR: &str = "system";

/// Movement type tag.
///
/// The tag is descriptive only; it is not checked against the sign of the
/// quantity change. Unknown tags are kept verbatim as `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MovementType {
    In,
    Out,
    Correction,
    Other(String),
}

impl MovementType {
    pub fn as_str(&self) -> &str {
        match self {
            MovementType::In => "IN",
            MovementType::Out => "OUT",
            MovementType::Correction => "CORRECTION",
            MovementType::Other(tag) => tag,
        }
    }
}

impl From<&str> for MovementType {
    fn from(value: &str) -> Self {
        let tag = value.trim();
        if tag.eq_ignore_ascii_case("IN") {
            MovementType::In
        } else if tag.eq_ignore_ascii_case("OUT") {
            MovementType::Out
        } else if tag.eq_ignore_ascii_case("CORRECTION") {
            MovementType::Correction
        } else {
            MovementType::Other(tag.to_string())
        }
    }
}

impl From<String> for MovementType {
    fn from(value: String) -> Self {
        MovementType::from(value.as_str())
    }
}

impl From<MovementType> for String {
    fn from(value: MovementType) -> Self {
        match value {
            MovementType::Other(tag) => tag,
            known => known.as_str().to_string(),
        }
    }
}

impl core::fmt::Display for MovementType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Command: RecordMovement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordMovement {
    pub product_id: ProductId,
    pub product_name: String,
    pub quantity_change: i64,
    pub movement_type: MovementType,
    pub reason: Option<String>,
    pub performed_by: String,
    pub timestamp: DateTime<Utc>,
}

impl RecordMovement {
    /// Movement performed by [`SYSTEM_ACTOR`] without a reason.
    pub fn new(
        product_id: ProductId,
        product_name: impl Into<String>,
        quantity_change: i64,
        movement_type: MovementType,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            product_id,
            product_name: product_name.into(),
            quantity_change,
            movement_type,
            reason: None,
            performed_by: SYSTEM_ACTOR.to_string(),
            timestamp,
        }
    }

    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    pub fn performed_by(mut self, actor: impl Into<String>) -> Self {
        self.performed_by = actor.into();
        self
    }
}

/// Entity: Movement (append-only record of a stock change).
///
/// There are no mutators; once recorded, a movement never changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Movement {
    id: MovementId,
    product_id: ProductId,
    product_name: String,
    quantity_change: i64,
    movement_type: MovementType,
    reason: Option<String>,
    performed_by: String,
    timestamp: DateTime<Utc>,
}

impl Movement {
    /// Record a movement under the given id. A zero change is rejected.
    pub fn record(id: MovementId, cmd: RecordMovement) -> DomainResult<Self> {
        if cmd.quantity_change == 0 {
            return Err(DomainError::invalid_value("quantity change cannot be zero"));
        }

        let performed_by = if cmd.performed_by.trim().is_empty() {
            SYSTEM_ACTOR.to_string()
        } else {
            cmd.performed_by
        };

        Ok(Self {
            id,
            product_id: cmd.product_id,
            product_name: cmd.product_name,
            quantity_change: cmd.quantity_change,
            movement_type: cmd.movement_type,
            reason: cmd.reason,
            performed_by,
            timestamp: cmd.timestamp,
        })
    }

    pub fn product_id(&self) -> &ProductId {
        &self.product_id
    }

    pub fn product_name(&self) -> &str {
        &self.product_name
    }

    pub fn quantity_change(&self) -> i64 {
        self.quantity_change
    }

    pub fn movement_type(&self) -> &MovementType {
        &self.movement_type
    }

    pub fn reason(&self) -> Option<&str> {
        self.reason.as_deref()
    }

    pub fn performed_by(&self) -> &str {
        &self.performed_by
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn is_inbound(&self) -> bool {
        self.quantity_change > 0
    }
}

impl Entity for Movement {
    type Id = MovementId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_product_id() -> ProductId {
        ProductId::new("P1").unwrap()
    }

    #[test]
    fn record_keeps_command_fields() {
        let at = Utc::now();
        let cmd = RecordMovement::new(test_product_id(), "Widget", 5, MovementType::In, at)
            .with_reason("purchase")
            .performed_by("max");

        let movement = Movement::record(MovementId::new("1").unwrap(), cmd).unwrap();

        assert_eq!(movement.id().as_str(), "1");
        assert_eq!(movement.product_id().as_str(), "P1");
        assert_eq!(movement.product_name(), "Widget");
        assert_eq!(movement.quantity_change(), 5);
        assert_eq!(movement.movement_type(), &MovementType::In);
        assert_eq!(movement.reason(), Some("purchase"));
        assert_eq!(movement.performed_by(), "max");
        assert_eq!(movement.timestamp(), at);
        assert!(movement.is_inbound());
    }

    #[test]
    fn zero_change_is_rejected() {
        let cmd = RecordMovement::new(test_product_id(), "Widget", 0, MovementType::Correction, Utc::now());
        let err = Movement::record(MovementId::generate(), cmd).unwrap_err();
        match err {
            DomainError::InvalidValue(msg) if msg.contains("zero") => {}
            _ => panic!("Expected InvalidValue for zero change"),
        }
    }

    #[test]
    fn blank_performer_falls_back_to_system() {
        let cmd = RecordMovement::new(test_product_id(), "Widget", -2, MovementType::Out, Utc::now())
            .performed_by("  ");
        let movement = Movement::record(MovementId::generate(), cmd).unwrap();
        assert_eq!(movement.performed_by(), SYSTEM_ACTOR);
        assert!(!movement.is_inbound());
    }

    #[test]
    fn type_is_not_checked_against_sign() {
        let cmd = RecordMovement::new(test_product_id(), "Widget", -4, MovementType::In, Utc::now());
        assert!(Movement::record(MovementId::generate(), cmd).is_ok());
    }

    #[test]
    fn movement_type_parses_known_and_extension_tags() {
        assert_eq!(MovementType::from("IN"), MovementType::In);
        assert_eq!(MovementType::from("out"), MovementType::Out);
        assert_eq!(MovementType::from("CORRECTION"), MovementType::Correction);
        assert_eq!(
            MovementType::from("RETURN"),
            MovementType::Other("RETURN".to_string())
        );
        assert_eq!(MovementType::Other("RETURN".to_string()).to_string(), "RETURN");
        assert_eq!(String::from(MovementType::Correction), "CORRECTION");
    }
}
