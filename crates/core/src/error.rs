//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic business failures (duplicate keys,
/// unknown ids, invariant-breaking values). Storage and configuration failures
/// have their own error types in the infrastructure crate.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// An entity with the same identifier already exists.
    #[error("duplicate id: {0}")]
    DuplicateId(String),

    /// The referenced entity does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// A supplied value breaks an entity invariant (e.g. negative price).
    #[error("invalid value: {0}")]
    InvalidValue(String),

    /// An identifier was malformed (e.g. blank).
    #[error("invalid identifier: {0}")]
    InvalidId(String),
}

impl DomainError {
    pub fn duplicate_id(id: impl Into<String>) -> Self {
        Self::DuplicateId(id.into())
    }

    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound(id.into())
    }

    pub fn invalid_value(msg: impl Into<String>) -> Self {
        Self::InvalidValue(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_include_context() {
        assert_eq!(
            DomainError::duplicate_id("P-1").to_string(),
            "duplicate id: P-1"
        );
        assert_eq!(DomainError::not_found("P-2").to_string(), "not found: P-2");
        assert_eq!(
            DomainError::invalid_value("price cannot be negative").to_string(),
            "invalid value: price cannot be negative"
        );
    }
}
