//! Identity of stored records.

use std::collections::BTreeMap;

/// A record with a stable, ordered identifier.
///
/// Ids are `Ord` because collections of entities are kept and reported in id
/// order.
pub trait Entity {
    type Id: Clone + Ord + core::hash::Hash + core::fmt::Display + core::fmt::Debug;

    fn id(&self) -> &Self::Id;
}

/// Key entities by id. Later entries replace earlier ones with the same id.
pub fn index_by_id<E, I>(entities: I) -> BTreeMap<E::Id, E>
where
    E: Entity,
    I: IntoIterator<Item = E>,
{
    entities
        .into_iter()
        .map(|entity| (entity.id().clone(), entity))
        .collect()
}
