use super::{BatchLabel, SectionLabel};
use serde::{Deserialize, Serialize};

/// A section: a label plus its ordered lab batches. Batch order is
/// significant — batch `i` is always paired with the `i`-th available
/// faculty/room in a parallel lab block, so reordering batches changes which
/// faculty/room a student's batch lands in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Section {
    pub label: SectionLabel,
    #[serde(default)]
    pub batches: Vec<BatchLabel>,
}

impl Section {
    pub fn new(label: SectionLabel, batches: Vec<BatchLabel>) -> Self {
        Self { label, batches }
    }

    pub fn has_batches(&self) -> bool {
        !self.batches.is_empty()
    }
}
