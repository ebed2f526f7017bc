//! Memoization tables of the normalizer.
//!
//! Every table is split by encoding: handles of different encodings never
//! meet, so each slot only ever holds one kind.

use rustc_hash::FxHashMap;

use super::NormalizeFlags;
use crate::name::{Encoding, FileName};

/// Normalized result plus whether it differs from the input.
pub(crate) type Normalized = (FileName, bool);

#[derive(Default)]
struct Slot {
    normalized: FxHashMap<NormalizeFlags, FxHashMap<FileName, Normalized>>,
    symlinks: FxHashMap<FileName, Option<FileName>>,
    case: FxHashMap<FileName, Option<String>>,
    long_names: FxHashMap<FileName, Option<FileName>>,
    short_names: FxHashMap<FileName, Option<FileName>>,
}

impl Slot {
    fn entries(&self) -> usize {
        self.normalized.values().map(FxHashMap::len).sum::<usize>()
            + self.symlinks.len()
            + self.case.len()
            + self.long_names.len()
            + self.short_names.len()
    }
}

/// All caches, for both encodings.
#[derive(Default)]
pub(crate) struct Caches {
    slots: [Slot; 2],
}

impl Caches {
    fn slot(&self, encoding: Encoding) -> &Slot {
        &self.slots[encoding.slot()]
    }

    fn slot_mut(&mut self, encoding: Encoding) -> &mut Slot {
        &mut self.slots[encoding.slot()]
    }

    pub(crate) fn normalized(&self, flags: NormalizeFlags, name: &FileName) -> Option<Normalized> {
        self.slot(name.encoding())
            .normalized
            .get(&flags)
            .and_then(|table| table.get(name))
            .cloned()
    }

    pub(crate) fn insert_normalized(&mut self, flags: NormalizeFlags, name: FileName, value: Normalized) {
        self.slot_mut(name.encoding())
            .normalized
            .entry(flags)
            .or_default()
            .insert(name, value);
    }

    pub(crate) fn symlink(&self, name: &FileName) -> Option<Option<FileName>> {
        self.slot(name.encoding()).symlinks.get(name).cloned()
    }

    pub(crate) fn insert_symlink(&mut self, name: FileName, target: Option<FileName>) {
        self.slot_mut(name.encoding()).symlinks.insert(name, target);
    }

    pub(crate) fn case(&self, name: &FileName) -> Option<Option<String>> {
        self.slot(name.encoding()).case.get(name).cloned()
    }

    pub(crate) fn insert_case(&mut self, name: FileName, on_disk: Option<String>) {
        self.slot_mut(name.encoding()).case.insert(name, on_disk);
    }

    pub(crate) fn long_or_short(&self, name: &FileName, short: bool) -> Option<Option<FileName>> {
        let slot = self.slot(name.encoding());
        let table = if short { &slot.short_names } else { &slot.long_names };
        table.get(name).cloned()
    }

    pub(crate) fn insert_long_or_short(
        &mut self,
        name: FileName,
        short: bool,
        replacement: Option<FileName>,
    ) {
        let slot = self.slot_mut(name.encoding());
        let table = if short {
            &mut slot.short_names
        } else {
            &mut slot.long_names
        };
        table.insert(name, replacement);
    }

    /// Drops normalized results and on-disk case answers.
    pub(crate) fn clear_normalized(&mut self) {
        for slot in &mut self.slots {
            slot.normalized.clear();
            slot.case.clear();
        }
    }

    /// Drops symlink targets and long/short name answers.
    pub(crate) fn clear_symlinks(&mut self) {
        for slot in &mut self.slots {
            slot.symlinks.clear();
            slot.long_names.clear();
            slot.short_names.clear();
        }
    }

    /// Total number of memoized answers.
    pub(crate) fn len(&self) -> usize {
        self.slots.iter().map(Slot::entries).sum()
    }
}
