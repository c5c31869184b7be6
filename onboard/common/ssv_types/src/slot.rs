use derive_more::{Deref, Display};
use serde::{Deserialize, Serialize};

/// A position in the quorum selection. Slots are indexed starting at 1.
#[derive(
    Clone, Copy, Debug, Eq, PartialEq, Hash, PartialOrd, Ord, Deref, Display, Serialize, Deserialize,
)]
pub struct Slot(usize);

impl Slot {
    /// Returns `None` for the invalid slot 0
    pub fn new(index: usize) -> Option<Self> {
        (index != 0).then_some(Slot(index))
    }

    /// The first `count` slots in order
    pub fn range(count: usize) -> impl Iterator<Item = Slot> {
        (1..=count).map(Slot)
    }
}
