//! Typed identifiers for arena-allocated objects.

use std::hash::Hash;
use std::marker::PhantomData;

use serde::{Deserialize, Serialize};

/// An identifier unique within one allocating container.
///
/// The type parameter ties an ID to the kind of object it names,
/// so cell and instance IDs cannot be mixed up.
#[derive(Serialize, Deserialize)]
pub struct Id<T>(u64, PhantomData<fn() -> T>);

impl<T> Id<T> {
    /// The initial counter state; no IDs have been handed out yet.
    pub(crate) fn new() -> Self {
        Self(0, PhantomData)
    }

    /// Allocates the next ID in sequence.
    pub(crate) fn alloc(&mut self) -> Self {
        self.0 += 1;
        Self(self.0, PhantomData)
    }
}

impl<T> std::fmt::Debug for Id<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Id({})", self.0)
    }
}

impl<T> Clone for Id<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Id<T> {}

impl<T> PartialEq for Id<T> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<T> Eq for Id<T> {}

impl<T> Hash for Id<T> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}
