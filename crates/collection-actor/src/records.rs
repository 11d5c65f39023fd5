//! # Record Sets
//!
//! The in-flight view of a collection while the actor handles one request.

use crate::entity::ActorEntity;

/// The records of one collection, loaded fresh for a single request.
///
/// Mutations mark the set dirty; the actor writes the collection back to its
/// store only when something changed.
#[derive(Debug)]
pub struct Records<T: ActorEntity> {
    items: Vec<T>,
    dirty: bool,
}

impl<T: ActorEntity> Records<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self {
            items,
            dirty: false,
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Looks a record up by id.
    pub fn find(&self, id: &T::Id) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn push(&mut self, item: T) {
        self.items.push(item);
        self.dirty = true;
    }

    pub fn extend(&mut self, items: impl IntoIterator<Item = T>) {
        let before = self.items.len();
        self.items.extend(items);
        self.dirty |= self.items.len() != before;
    }

    /// Keeps only the records matching `keep`; returns how many were removed.
    pub fn retain(&mut self, keep: impl FnMut(&T) -> bool) -> usize {
        let before = self.items.len();
        self.items.retain(keep);
        let removed = before - self.items.len();
        self.dirty |= removed > 0;
        removed
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn into_vec(self) -> Vec<T> {
        self.items
    }
}
