use super::symbol::{Proc, SymbolSource, resolve};
use super::tag::{ProcEntry, ProcTag};

/// How a fill pass treats slots that already hold a procedure.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum FillPolicy {
    /// Only empty slots are resolved; populated slots are left untouched.
    IfEmpty,
    /// Every listed slot is re-resolved; a total miss clears the slot.
    Override,
}

/// Fixed array of procedures indexed by [`ProcTag`].
///
/// Slots start empty, are populated by [`fill`](Self::fill) passes during
/// initialization, and are read-only afterwards.
pub struct ProcTable {
    slots: [Option<Proc>; ProcTag::COUNT],
}

impl ProcTable {
    pub fn new() -> Self {
        Self { slots: [None; ProcTag::COUNT] }
    }

    #[inline]
    pub fn get(&self, tag: ProcTag) -> Option<Proc> {
        self.slots[tag.index()]
    }

    #[inline]
    pub fn is_loaded(&self, tag: ProcTag) -> bool {
        self.slots[tag.index()].is_some()
    }

    pub fn loaded_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    /// Runs one resolution pass over `entries`.
    ///
    /// Returns how many entries resolved during this pass.
    pub fn fill<'a, I>(&mut self, entries: I, policy: FillPolicy, source: &dyn SymbolSource) -> usize
    where
        I: IntoIterator<Item = &'a ProcEntry>,
    {
        let mut resolved = 0;
        for entry in entries {
            let slot = &mut self.slots[entry.tag.index()];
            if policy == FillPolicy::IfEmpty && slot.is_some() {
                continue;
            }
            *slot = resolve(source, entry.names);
            match slot {
                Some(_) => resolved += 1,
                None => log::trace!("{} unresolved", entry.names[0]),
            }
        }
        resolved
    }
}

impl Default for ProcTable {
    fn default() -> Self {
        Self::new()
    }
}
