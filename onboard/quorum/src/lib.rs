//! Selection of the operators that will host the shares of a validator key.
//!
//! The [`QuorumSelector`] owns the mapping from slot to operator and guarantees that no operator
//! occupies two slots. The [`OperatorDirectory`] caches the operator list it selects from.

pub use directory::{DirectoryError, OperatorDirectory, OperatorSource};
pub use selector::{QuorumSelector, QuorumSnapshot, SelectedOperator, SelectionStats};

mod directory;
mod selector;
