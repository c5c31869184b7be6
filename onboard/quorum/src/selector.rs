use alloy::primitives::U256;
use ssv_types::{OperatorDescriptor, OperatorPublicKey, Slot};
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// An operator occupying a slot
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectedOperator {
    pub slot: Slot,
    pub operator: OperatorDescriptor,
    /// Set when the operator was picked by [`QuorumSelector::auto_fill`] rather than the user
    pub auto_selected: bool,
}

/// Selection counters, for display only.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SelectionStats {
    pub total: usize,
    pub selected: usize,
    pub selected_percent: f64,
}

/// Everything about a selection that influences a registration payload: the operators in slot
/// order together with the fee each one charged when it was selected.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct QuorumSnapshot(Vec<(Slot, OperatorPublicKey, U256)>);

impl QuorumSnapshot {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// The set of operators chosen to host shares.
///
/// Slots are numbered `1..=slot_count`. The selection is usable once at least `min_operators`
/// slots are filled.
#[derive(Clone, Debug)]
pub struct QuorumSelector {
    slots: BTreeMap<Slot, SelectedOperator>,
    slot_count: usize,
    min_operators: usize,
    directory_size: usize,
}

impl QuorumSelector {
    pub fn new(min_operators: usize, slot_count: usize) -> Self {
        Self {
            slots: BTreeMap::new(),
            slot_count,
            min_operators,
            directory_size: 0,
        }
    }

    pub fn min_operators(&self) -> usize {
        self.min_operators
    }

    pub fn slot_count(&self) -> usize {
        self.slot_count
    }

    /// Records the size of the directory the selection is made from, used for [`Self::selection_stats`]
    pub fn set_directory_size(&mut self, directory_size: usize) {
        self.directory_size = directory_size;
    }

    /// Places `operator` into `slot`. Returns false, leaving the selection untouched, if the
    /// operator already occupies a different slot or the slot does not exist.
    pub fn select(&mut self, operator: OperatorDescriptor, slot: Slot) -> bool {
        self.insert(operator, slot, false)
    }

    /// Vacates a slot, returning its previous occupant
    pub fn unselect(&mut self, slot: Slot) -> Option<SelectedOperator> {
        self.slots.remove(&slot)
    }

    /// Vacates every slot holding the given operator. Returns the number of vacated slots.
    pub fn unselect_by_public_key(&mut self, public_key: &OperatorPublicKey) -> usize {
        let before = self.slots.len();
        self.slots
            .retain(|_, selected| &selected.operator.public_key != public_key);
        before - self.slots.len()
    }

    pub fn unselect_all(&mut self) {
        self.slots.clear();
    }

    pub fn is_selected(&self, public_key: &OperatorPublicKey) -> bool {
        self.slot_of(public_key).is_some()
    }

    pub fn slot_of(&self, public_key: &OperatorPublicKey) -> Option<Slot> {
        self.slots
            .values()
            .find(|selected| &selected.operator.public_key == public_key)
            .map(|selected| selected.slot)
    }

    /// Updates the fee of the operator in `slot` in place. Returns false for an empty slot.
    pub fn update_fee(&mut self, slot: Slot, fee: U256) -> bool {
        match self.slots.get_mut(&slot) {
            Some(selected) => {
                selected.operator.fee = fee;
                true
            }
            None => false,
        }
    }

    pub fn get(&self, slot: Slot) -> Option<&SelectedOperator> {
        self.slots.get(&slot)
    }

    /// Clears the selection, then walks `directory` in order selecting operators into the next
    /// free slot until the minimum is reached. A directory too small to reach the minimum leaves
    /// the quorum unmet. Returns the number of selected operators.
    pub fn auto_fill(&mut self, directory: &[OperatorDescriptor]) -> usize {
        self.unselect_all();
        self.directory_size = directory.len();

        let mut free_slots = Slot::range(self.slot_count);
        let mut candidates = directory.iter();
        while self.selected_count() < self.min_operators {
            let Some(slot) = free_slots.next() else {
                break;
            };
            // Skip over directory entries that repeat an operator already placed
            let placed = loop {
                match candidates.next() {
                    Some(operator) => {
                        if self.insert(operator.clone(), slot, true) {
                            break true;
                        }
                    }
                    None => break false,
                }
            };
            if !placed {
                break;
            }
        }

        let selected = self.selected_count();
        if selected < self.min_operators {
            warn!(
                selected,
                required = self.min_operators,
                directory = directory.len(),
                "Not enough operators to auto select a quorum"
            );
        } else {
            debug!(selected, "Auto selected operators");
        }
        selected
    }

    pub fn selected_count(&self) -> usize {
        self.slots.len()
    }

    pub fn is_quorum_met(&self) -> bool {
        self.selected_count() >= self.min_operators
    }

    pub fn selection_stats(&self) -> SelectionStats {
        let selected = self.selected_count();
        let selected_percent = if self.directory_size == 0 {
            0.0
        } else {
            selected as f64 / self.directory_size as f64 * 100.0
        };
        SelectionStats {
            total: self.directory_size,
            selected,
            selected_percent,
        }
    }

    /// Selected operators in slot order
    pub fn selected(&self) -> impl Iterator<Item = &SelectedOperator> {
        self.slots.values()
    }

    /// Public keys of the selected operators in slot order. This ordering is the one shares are
    /// bound by.
    pub fn operator_public_keys(&self) -> Vec<OperatorPublicKey> {
        self.selected()
            .map(|selected| selected.operator.public_key.clone())
            .collect()
    }

    pub fn snapshot(&self) -> QuorumSnapshot {
        QuorumSnapshot(
            self.selected()
                .map(|selected| {
                    (
                        selected.slot,
                        selected.operator.public_key.clone(),
                        selected.operator.fee,
                    )
                })
                .collect(),
        )
    }

    fn insert(&mut self, operator: OperatorDescriptor, slot: Slot, auto_selected: bool) -> bool {
        if *slot > self.slot_count {
            debug!(%slot, slots = self.slot_count, "Rejected selection into unknown slot");
            return false;
        }
        if let Some(existing) = self.slot_of(&operator.public_key) {
            if existing != slot {
                debug!(
                    operator = %operator.public_key,
                    %existing,
                    requested = %slot,
                    "Rejected duplicate operator selection"
                );
                return false;
            }
        }
        self.slots.insert(
            slot,
            SelectedOperator {
                slot,
                operator,
                auto_selected,
            },
        );
        true
    }
}
