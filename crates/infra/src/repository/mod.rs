//! Product/movement storage boundary.
//!
//! The use-case layer only talks to the [`Repository`] trait; the concrete
//! backends here are an ephemeral in-memory store and a JSON-seeded store that
//! behaves identically once loaded.

pub mod in_memory;
pub mod json;
pub mod r#trait;

pub use in_memory::InMemoryRepository;
pub use json::JsonRepository;
pub use r#trait::{Repository, RepositoryError};
