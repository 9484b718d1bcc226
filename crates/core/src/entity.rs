//! Entity and aggregate-root abstractions.
//!
//! Equality of entities is identity equality: two values of the same entity
//! type are equal iff their ids are equal. Concrete entities implement
//! `PartialEq` through [`impl_entity_eq!`].

use crate::notification::Notification;

pub trait Entity: Send + Sync {
    type Id: Copy + Eq + core::hash::Hash + core::fmt::Debug + core::fmt::Display + Send + Sync;

    /// Entity name used in user-facing messages (`"Category"`, ...).
    const NAME: &'static str;

    fn entity_id(&self) -> &Self::Id;

    fn notification(&self) -> &Notification;

    /// Re-run every business rule, recording violations on the
    /// notification. Never fails.
    fn validate(&mut self);
}

/// Marker for entities that are the consistency boundary of their cluster.
pub trait AggregateRoot: Entity {}

/// Identity-based `PartialEq`/`Eq` for an [`Entity`].
#[macro_export]
macro_rules! impl_entity_eq {
    ($t:ty) => {
        impl PartialEq for $t {
            fn eq(&self, other: &Self) -> bool {
                $crate::entity::Entity::entity_id(self) == $crate::entity::Entity::entity_id(other)
            }
        }

        impl Eq for $t {}
    };
}
