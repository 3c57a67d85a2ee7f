//! In-memory mirror of the record grid. Rows are addressed by position only;
//! duplicate employee ids are allowed, so there is no lookup by identity.

use crate::models::Record;

/// Ordered rows plus the currently selected row, if any.
#[derive(Debug, Default, Clone)]
pub struct RecordTable {
    rows: Vec<Record>,
    selected: Option<usize>,
}

impl RecordTable {
    pub fn new(rows: Vec<Record>) -> Self {
        let mut table = Self::default();
        table.replace_all(rows);
        table
    }

    /// Swap in a freshly loaded row set. Any selection is dropped because the
    /// old index may point at a different record now.
    pub fn replace_all(&mut self, rows: Vec<Record>) {
        self.clear_selection();
        self.rows.clear();
        self.rows.reserve(rows.len());
        for record in rows {
            self.insert_row(record);
        }
    }

    /// Add a row after the last one. The selection is left alone.
    pub fn insert_row(&mut self, record: Record) {
        self.rows.push(record);
    }

    /// Overwrite the row at `index`. Returns `false` when out of range.
    pub fn set_row(&mut self, index: usize, record: Record) -> bool {
        match self.rows.get_mut(index) {
            Some(slot) => {
                *slot = record;
                true
            }
            None => false,
        }
    }

    /// Remove and return the row at `index`, clearing the selection.
    pub fn remove_row(&mut self, index: usize) -> Option<Record> {
        if index >= self.rows.len() {
            return None;
        }
        self.clear_selection();
        Some(self.rows.remove(index))
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn get_row(&self, index: usize) -> Option<&Record> {
        self.rows.get(index)
    }

    pub fn rows(&self) -> &[Record] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Select the row at `index`. Out-of-range indices leave the selection
    /// untouched and return `false`.
    pub fn select(&mut self, index: usize) -> bool {
        if index < self.rows.len() {
            self.selected = Some(index);
            true
        } else {
            false
        }
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Keyboard navigation. With nothing selected the first row is picked;
    /// otherwise the selection moves by `offset` and clamps at both ends.
    pub fn move_selection(&mut self, offset: isize) {
        if self.rows.is_empty() {
            return;
        }
        let last = self.rows.len() as isize - 1;
        let next = match self.selected {
            None => 0,
            Some(current) => (current as isize + offset).clamp(0, last),
        };
        self.selected = Some(next as usize);
    }

    pub fn select_first(&mut self) {
        if !self.rows.is_empty() {
            self.selected = Some(0);
        }
    }

    pub fn select_last(&mut self) {
        if !self.rows.is_empty() {
            self.selected = Some(self.rows.len() - 1);
        }
    }
}
