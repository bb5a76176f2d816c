//! Repository Layer - Core Traits
//!
//! Defines the abstract interfaces for data access.
//! Implementations can use SQLite, in-memory, etc.

use async_trait::async_trait;
use crate::domain::{DomainResult, Entity, Orderable};

/// Plain lookups and non-structural updates
///
/// Generic over any Entity type.
/// All operations are async to support various backends.
#[async_trait]
pub trait Repository<T: Entity>: Send + Sync {
    /// Find entity by ID
    async fn find_by_id(&self, id: T::Id) -> DomainResult<Option<T>>;

    /// Update an existing entity's content fields.
    ///
    /// The ownership check and the write happen under one lock.
    async fn update(&self, principal: &str, entity: &T) -> DomainResult<T>;
}

/// Children kept in a dense `0..n` order under their parent.
///
/// Every mutation checks that `principal` owns the profile the
/// collection belongs to, and runs as a single transaction.
#[async_trait]
pub trait OrderedRepository<T: Orderable>: Repository<T> {
    /// Insert `entity` under `entity.parent_id()` after the current last child
    async fn append(&self, principal: &str, entity: &T) -> DomainResult<T>;

    /// Delete a child and close the gap it leaves; returns the removed child
    async fn remove(&self, principal: &str, id: T::Id) -> DomainResult<T>;

    /// Give every child the index of its offset in `new_order`.
    ///
    /// `new_order` must list each child of one parent exactly once.
    async fn reorder(&self, principal: &str, new_order: &[T::Id]) -> DomainResult<()>;

    /// Move one child to `to_index`, shifting the siblings in between
    async fn move_to(&self, principal: &str, id: T::Id, to_index: u32) -> DomainResult<()>;

    /// Children of a parent in index order
    async fn children(&self, parent_id: T::Id) -> DomainResult<Vec<T>>;

    /// Load a child after checking that `principal` owns it
    async fn find_owned(&self, principal: &str, id: T::Id) -> DomainResult<T>;
}
