//! `TargetRegistry`: dense, ordered storage of live target transforms.
//!
//! # Layout
//!
//! Entries live in a `Vec` kept in spawn order, so enumeration (and therefore
//! every "nearest target" tie-break) is deterministic.  An `FxHashMap` from
//! `TargetId` to slot index gives O(1) resolution of the weak references
//! agents hold.  Removal shifts later entries down and re-indexes them; the
//! registry is small (a handful of players) so the O(n) removal never matters.

use rustc_hash::FxHashMap;

use nw_core::{NwError, NwResult, TargetId, Vec3};

/// One live target as seen by the decision core.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TargetEntry {
    pub id:       TargetId,
    pub position: Vec3,
}

/// Enumerable collection of target positions, owned by the simulation root.
///
/// The decision core only ever reads from it; spawning, despawning and moving
/// targets is the world's business.
#[derive(Default)]
pub struct TargetRegistry {
    entries: Vec<TargetEntry>,
    index:   FxHashMap<TargetId, usize>,
    next_id: u32,
}

impl TargetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new target at `position` and return its freshly allocated id.
    ///
    /// Fails once every id below `TargetId::INVALID` has been handed out.
    pub fn spawn(&mut self, position: Vec3) -> NwResult<TargetId> {
        let id = TargetId(self.next_id);
        if id == TargetId::INVALID {
            return Err(NwError::TargetIdsExhausted);
        }
        self.insert(id, position)?;
        Ok(id)
    }

    /// Register `id` at `position`.
    ///
    /// Returns `false` (and just moves the target) if `id` was already
    /// registered; re-registration is harmless.  The `INVALID` sentinel is
    /// rejected.
    pub fn insert(&mut self, id: TargetId, position: Vec3) -> NwResult<bool> {
        if id == TargetId::INVALID {
            return Err(NwError::ReservedTargetId(id));
        }
        if let Some(&slot) = self.index.get(&id) {
            self.entries[slot].position = position;
            return Ok(false);
        }
        self.index.insert(id, self.entries.len());
        self.entries.push(TargetEntry { id, position });
        // id < INVALID, so this cannot overflow.
        self.next_id = self.next_id.max(id.0 + 1);
        Ok(true)
    }

    /// Despawn `id`, returning its last known position.
    pub fn remove(&mut self, id: TargetId) -> Option<Vec3> {
        let slot = self.index.remove(&id)?;
        let removed = self.entries.remove(slot);
        for (i, entry) in self.entries.iter().enumerate().skip(slot) {
            self.index.insert(entry.id, i);
        }
        Some(removed.position)
    }

    /// Move a live target.  Returns `false` if `id` is not registered.
    pub fn set_position(&mut self, id: TargetId, position: Vec3) -> bool {
        match self.index.get(&id) {
            Some(&slot) => {
                self.entries[slot].position = position;
                true
            }
            None => false,
        }
    }

    /// Resolve a weak target reference.  `None` once the target has despawned.
    #[inline]
    pub fn position(&self, id: TargetId) -> Option<Vec3> {
        self.index.get(&id).map(|&slot| self.entries[slot].position)
    }

    #[inline]
    pub fn contains(&self, id: TargetId) -> bool {
        self.index.contains_key(&id)
    }

    /// All live targets in spawn order.
    pub fn iter(&self) -> impl Iterator<Item = &TargetEntry> + '_ {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The target closest to `point`, or `None` if the registry is empty.
    ///
    /// Ties go to the earlier-spawned target.
    pub fn nearest_to(&self, point: Vec3) -> Option<TargetEntry> {
        let mut best: Option<(f32, TargetEntry)> = None;
        for entry in &self.entries {
            let d2 = entry.position.distance_squared(point);
            match best {
                Some((best_d2, _)) if d2 >= best_d2 => {}
                _ => best = Some((d2, *entry)),
            }
        }
        best.map(|(_, entry)| entry)
    }
}
