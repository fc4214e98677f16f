//! Bookkeeping for optimistic edits whose remote call is still in flight.

/// Local effect of an optimistic mutation.
///
/// Effects are re-run on top of every reconciled page, so they should be
/// idempotent (remove by id, set a flag) rather than relative (flip a flag).
pub type LocalEffect<T> = Box<dyn Fn(&mut Vec<T>) + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MutationId(u64);

/// Pending optimistic mutations in the order they were started.
pub struct PendingMutations<T> {
    next_id: u64,
    entries: Vec<(MutationId, LocalEffect<T>)>,
}

impl<T> Default for PendingMutations<T> {
    fn default() -> Self {
        Self {
            next_id: 0,
            entries: Vec::new(),
        }
    }
}

impl<T> std::fmt::Debug for PendingMutations<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PendingMutations")
            .field("len", &self.entries.len())
            .finish()
    }
}

impl<T> PendingMutations<T> {
    pub fn push(&mut self, effect: LocalEffect<T>) -> MutationId {
        self.next_id += 1;
        let id = MutationId(self.next_id);
        self.entries.push((id, effect));
        id
    }

    /// Removes a settled mutation and hands back its effect.
    pub fn remove(&mut self, id: MutationId) -> Option<LocalEffect<T>> {
        let index = self.entries.iter().position(|(entry, _)| *entry == id)?;
        Some(self.entries.remove(index).1)
    }

    /// Re-applies every pending effect, oldest first.
    pub fn apply_all(&self, items: &mut Vec<T>) {
        for (_, effect) in &self.entries {
            effect(items);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
