use crate::op::UndoRecord;

/// LIFO of reversible-action records.
#[derive(Debug, Default)]
pub struct UndoLog {
    records: Vec<UndoRecord>,
}

impl UndoLog {
    /// Empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one action.
    pub fn push(&mut self, record: UndoRecord) {
        self.records.push(record);
    }

    /// Removes the most recent record.
    pub fn pop(&mut self) -> Option<UndoRecord> {
        self.records.pop()
    }

    /// Most recent record, left in place.
    pub fn last(&self) -> Option<&UndoRecord> {
        self.records.last()
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when there is nothing to undo.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
