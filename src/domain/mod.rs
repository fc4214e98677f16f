//! Domain aggregates synchronized by the list controllers.

use std::fmt::{Debug, Display};

pub mod document;
pub mod notice;
pub mod patient;
pub mod types;

/// A list resource served by the remote API.
///
/// Implementors name the REST collection they live under and expose a stable
/// identifier used by optimistic mutations to locate rows.
pub trait Resource: Clone + Debug + Send + Sync + 'static {
    type Id: Copy + Eq + Debug + Display + Send + Sync + 'static;

    /// Collection path segment, e.g. `notices` for `/api/v1/notices`.
    const COLLECTION: &'static str;

    fn id(&self) -> Self::Id;
}

/// Removes the row with `id`, returning whether anything was removed.
pub fn remove_by_id<R: Resource>(items: &mut Vec<R>, id: R::Id) -> bool {
    let before = items.len();
    items.retain(|item| item.id() != id);
    items.len() != before
}

/// Applies `update` to the row with `id` if it is present.
pub fn update_by_id<R: Resource>(items: &mut [R], id: R::Id, update: impl FnOnce(&mut R)) -> bool {
    match items.iter_mut().find(|item| item.id() == id) {
        Some(item) => {
            update(item);
            true
        }
        None => false,
    }
}
