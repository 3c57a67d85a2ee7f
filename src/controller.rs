//! Form actions wired to the record table and the data file. `AppContext`
//! owns both, so every command handler works on explicit state and the table
//! and file agree again after each successful mutating action.

use anyhow::Result;

use crate::error::ActionError;
use crate::models::{Category, CompletedCount, Quality, Record};
use crate::stats::{build_report, StatisticsReport};
use crate::store::RecordStore;
use crate::table::RecordTable;

const INVALID_INPUT: &str = "Please fill all fields correctly.";

/// Current values of the five input controls.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormValues {
    pub employee_id: String,
    pub product_name: String,
    pub category: Category,
    pub completed: String,
    pub quality: Quality,
}

impl FormValues {
    /// Empty the text fields and reset both selectors to their first option.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Copy a table row into the form verbatim. Selector labels that are not
    /// one of the options leave that selector where it was.
    pub fn fill_from(&mut self, record: &Record) {
        self.employee_id = record.employee_id.clone();
        self.product_name = record.product_name.clone();
        self.completed = record.completed.clone();
        if let Ok(category) = record.category.parse() {
            self.category = category;
        }
        if let Ok(quality) = record.quality.parse() {
            self.quality = quality;
        }
    }

    /// Check the inputs and produce the record to persist. Id, name and count
    /// are trimmed; the count must be one or more decimal digits.
    pub fn validate(&self) -> Result<Record, ActionError> {
        let employee_id = self.employee_id.trim();
        let product_name = self.product_name.trim();
        let completed = self.completed.trim();

        let completed_ok = completed.parse::<CompletedCount>().is_ok();
        if employee_id.is_empty() || product_name.is_empty() || !completed_ok {
            return Err(ActionError::Validation(INVALID_INPUT.to_string()));
        }

        Ok(Record::new(
            employee_id,
            product_name,
            self.category.as_str(),
            completed,
            self.quality.as_str(),
        ))
    }
}

/// What a successful action reports back to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Saved,
    Updated,
    Deleted,
}

impl Confirmation {
    pub fn message(self) -> &'static str {
        match self {
            Confirmation::Saved => "Data saved successfully!",
            Confirmation::Updated => "Data updated successfully!",
            Confirmation::Deleted => "Record deleted successfully!",
        }
    }
}

/// Owns the data file handle and the visible row list.
#[derive(Debug)]
pub struct AppContext {
    store: RecordStore,
    table: RecordTable,
}

impl AppContext {
    /// Load the data file into a fresh table.
    pub fn open(store: RecordStore) -> Result<Self> {
        let rows = store.load()?;
        tracing::info!(path = %store.path().display(), rows = rows.len(), "opened data file");
        Ok(Self {
            store,
            table: RecordTable::new(rows),
        })
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn table(&self) -> &RecordTable {
        &self.table
    }

    pub fn table_mut(&mut self) -> &mut RecordTable {
        &mut self.table
    }

    /// Append the form as a new row, reload the table from disk and clear
    /// the form.
    pub fn save(&mut self, form: &mut FormValues) -> Result<Confirmation, ActionError> {
        let record = form.validate().inspect_err(|err| {
            tracing::warn!(%err, "save rejected");
        })?;

        self.store.append(&record).map_err(storage_failure)?;
        self.reload().map_err(storage_failure)?;
        form.clear();

        tracing::info!(
            employee_id = %record.employee_id,
            rows = self.table.row_count(),
            "saved record"
        );
        Ok(Confirmation::Saved)
    }

    /// Overwrite the selected row with the form and rewrite the whole file
    /// from the table.
    pub fn update(&mut self, form: &mut FormValues) -> Result<Confirmation, ActionError> {
        let index = self.require_selection("update")?;
        let record = form.validate().inspect_err(|err| {
            tracing::warn!(%err, "update rejected");
        })?;

        self.table.set_row(index, record);
        self.persist_table()?;
        form.clear();

        tracing::info!(row = index, "updated record");
        Ok(Confirmation::Updated)
    }

    /// Remove the selected row and rewrite the file from what remains.
    pub fn delete(&mut self) -> Result<Confirmation, ActionError> {
        let index = self.require_selection("delete")?;
        self.table.remove_row(index);
        self.persist_table()?;

        tracing::info!(row = index, rows = self.table.row_count(), "deleted record");
        Ok(Confirmation::Deleted)
    }

    /// Row click: select `index` and copy its values into the form. Returns
    /// `false` if there is no such row.
    pub fn select_row(&mut self, index: usize, form: &mut FormValues) -> bool {
        if !self.table.select(index) {
            return false;
        }
        if let Some(record) = self.table.get_row(index) {
            form.fill_from(record);
        }
        true
    }

    /// Rank what is currently on disk, not the in-memory table.
    pub fn statistics(&self) -> Result<StatisticsReport, ActionError> {
        let records = self.store.load().map_err(storage_failure)?;
        Ok(build_report(&records))
    }

    /// Replace the table contents with a fresh read of the data file.
    pub fn reload(&mut self) -> Result<()> {
        let rows = self.store.load()?;
        self.table.replace_all(rows);
        Ok(())
    }

    fn require_selection(&self, action: &'static str) -> Result<usize, ActionError> {
        self.table.selected().ok_or_else(|| {
            tracing::warn!(action, "no row selected");
            ActionError::NoSelection { action }
        })
    }

    fn persist_table(&self) -> Result<(), ActionError> {
        self.store
            .rewrite(self.table.rows())
            .map_err(storage_failure)
    }
}

fn storage_failure(err: anyhow::Error) -> ActionError {
    tracing::error!(error = %format!("{err:#}"), "data file operation failed");
    ActionError::Storage(err)
}
