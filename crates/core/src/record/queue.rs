use crate::{PhonographError, Record, Result};

/// Stack of records waiting on the turntable. The last element is the record
/// currently on the platter; new records slide in at the bottom.
#[derive(Debug, Default, Clone)]
pub struct RecordQueue {
    records: Vec<Record>,
}

impl RecordQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn current(&self) -> Option<&Record> {
        self.records.last()
    }

    pub fn current_mut(&mut self) -> Option<&mut Record> {
        self.records.last_mut()
    }

    pub fn get(&self, index: usize) -> Option<&Record> {
        self.records.get(index)
    }

    pub fn is_current_index(&self, index: usize) -> bool {
        !self.records.is_empty() && index == self.records.len() - 1
    }

    /// Slides `record` underneath everything already queued.
    pub fn enqueue(&mut self, record: Record) {
        self.records.insert(0, record);
    }

    pub fn remove(&mut self, index: usize) -> Result<Record> {
        if index >= self.records.len() {
            return Err(PhonographError::Configuration(format!(
                "no record at queue index {index} (queue holds {})",
                self.records.len()
            )));
        }
        Ok(self.records.remove(index))
    }

    /// Takes the current record off the platter.
    pub fn pop_current(&mut self) -> Option<Record> {
        self.records.pop()
    }
}
