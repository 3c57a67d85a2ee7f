use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use csv::{QuoteStyle, ReaderBuilder, Terminator, WriterBuilder};
use tempfile::NamedTempFile;

use crate::models::{Record, COLUMN_COUNT};

/// Handle on the CSV file that backs the record table. The store has no
/// random-access update: anything other than an append replaces the whole
/// file with the rows handed to `rewrite`.
#[derive(Debug, Clone)]
pub struct RecordStore {
    path: PathBuf,
}

impl RecordStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every row in file order. A missing file means "no data yet".
    /// Field contents are not validated; rows with the wrong number of
    /// columns are padded or truncated to five.
    pub fn load(&self) -> Result<Vec<Record>> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "no data file yet");
                return Ok(Vec::new());
            }
            Err(err) => {
                return Err(err).with_context(|| {
                    format!("failed to open {}", self.path.display())
                })
            }
        };

        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(file);

        let mut records = Vec::new();
        for (index, row) in reader.records().enumerate() {
            let row = row.with_context(|| format!("failed to read row {}", index + 1))?;
            if row.len() != COLUMN_COUNT {
                tracing::warn!(
                    row = index + 1,
                    fields = row.len(),
                    "row does not have {COLUMN_COUNT} fields"
                );
            }
            records.push(Record::from_columns(row.iter()));
        }

        tracing::debug!(path = %self.path.display(), rows = records.len(), "loaded records");
        Ok(records)
    }

    /// Append one row, creating the file (and its directory) when absent.
    pub fn append(&self, record: &Record) -> Result<()> {
        self.ensure_parent_dir()?;
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("failed to open {} for append", self.path.display()))?;

        let mut writer = csv_writer(file);
        writer
            .write_record(record.columns())
            .context("failed to write record")?;
        writer.flush().context("failed to flush data file")?;

        tracing::debug!(
            path = %self.path.display(),
            employee_id = %record.employee_id,
            "appended record"
        );
        Ok(())
    }

    /// Replace the file with `records`, in order. The rows are written to a
    /// temporary file in the same directory which is then renamed over the
    /// original, so a failure leaves the previous contents intact.
    pub fn rewrite(&self, records: &[Record]) -> Result<()> {
        let dir = self.ensure_parent_dir()?;
        self.rewrite_via(&dir, records)
    }

    /// Stage the rows in a temporary file under `staging_dir`, then rename it
    /// over the data file. Nothing touches the data file before the rename.
    fn rewrite_via(&self, staging_dir: &Path, records: &[Record]) -> Result<()> {
        let mut tmp = NamedTempFile::new_in(staging_dir).with_context(|| {
            format!("failed to create temporary file in {}", staging_dir.display())
        })?;

        {
            let mut writer = csv_writer(&mut tmp);
            for record in records {
                writer
                    .write_record(record.columns())
                    .context("failed to write record")?;
            }
            writer.flush().context("failed to flush temporary file")?;
        }
        tmp.as_file()
            .sync_all()
            .context("failed to sync temporary file")?;

        tmp.persist(&self.path)
            .with_context(|| format!("failed to replace {}", self.path.display()))?;

        tracing::debug!(path = %self.path.display(), rows = records.len(), "rewrote data file");
        Ok(())
    }

    /// Create the directory containing the data file and return it.
    fn ensure_parent_dir(&self) -> Result<PathBuf> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir)
            .with_context(|| format!("failed to create data directory {}", dir.display()))?;
        Ok(dir)
    }
}

fn csv_writer<W: Write>(inner: W) -> csv::Writer<W> {
    WriterBuilder::new()
        .has_headers(false)
        .quote_style(QuoteStyle::Necessary)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(inner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn record(id: &str, completed: &str) -> Record {
        Record::new(id, "Chair", "Furniture", completed, "High")
    }

    #[test]
    fn missing_file_loads_as_empty() {
        let dir = tempdir().unwrap();
        let store = RecordStore::new(dir.path().join("absent.csv"));
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn append_creates_file_and_parent_directory() {
        let dir = tempdir().unwrap();
        let store = RecordStore::new(dir.path().join("nested").join("data.csv"));
        store.append(&record("E1", "3")).unwrap();
        assert!(store.path().exists());
        assert_eq!(store.load().unwrap(), vec![record("E1", "3")]);
    }

    #[test]
    fn fields_with_delimiters_are_quoted() {
        let dir = tempdir().unwrap();
        let store = RecordStore::new(dir.path().join("data.csv"));
        let tricky = Record::new("E,7", "Desk \"XL\"", "Furniture", "2", "Low");
        store.append(&tricky).unwrap();

        let raw = fs::read_to_string(store.path()).unwrap();
        assert_eq!(raw, "\"E,7\",\"Desk \"\"XL\"\"\",Furniture,2,Low\n");
        assert_eq!(store.load().unwrap(), vec![tricky]);
    }

    #[test]
    fn plain_rows_are_written_without_quotes() {
        let dir = tempdir().unwrap();
        let store = RecordStore::new(dir.path().join("data.csv"));
        store
            .rewrite(&[record("E1", "5"), record("E2", "3")])
            .unwrap();
        let raw = fs::read_to_string(store.path()).unwrap();
        assert_eq!(raw, "E1,Chair,Furniture,5,High\nE2,Chair,Furniture,3,High\n");
    }

    #[test]
    fn rewrite_replaces_previous_contents() {
        let dir = tempdir().unwrap();
        let store = RecordStore::new(dir.path().join("data.csv"));
        for id in ["E1", "E2", "E3"] {
            store.append(&record(id, "1")).unwrap();
        }
        store.rewrite(&[record("E9", "9")]).unwrap();
        assert_eq!(store.load().unwrap(), vec![record("E9", "9")]);

        store.rewrite(&[]).unwrap();
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn load_tolerates_ragged_rows_and_unvalidated_content() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data.csv");
        fs::write(&path, "E1,Desk\nE2,Lamp,Toys,lots,Great,extra\n\nE3,Sofa,Furniture,2,Low\n")
            .unwrap();

        let rows = RecordStore::new(&path).load().unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].columns(), ["E1", "Desk", "", "", ""]);
        assert_eq!(rows[1].columns(), ["E2", "Lamp", "Toys", "lots", "Great"]);
        assert_eq!(rows[2].employee_id, "E3");
    }

    #[test]
    fn rewrite_creates_missing_directory() {
        let dir = tempdir().unwrap();
        let store = RecordStore::new(dir.path().join("later").join("data.csv"));
        store.rewrite(&[record("E1", "1")]).unwrap();
        assert_eq!(store.load().unwrap().len(), 1);
    }

    #[test]
    fn rewrite_onto_a_directory_reports_an_error() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("occupied");
        fs::create_dir(&target).unwrap();
        let store = RecordStore::new(&target);
        assert!(store.rewrite(&[record("E1", "1")]).is_err());
    }

    #[test]
    fn failed_rewrite_leaves_previous_contents_intact() {
        let dir = tempdir().unwrap();
        let store = RecordStore::new(dir.path().join("data.csv"));
        let original = vec![record("E1", "1"), record("E2", "2")];
        store.rewrite(&original).unwrap();
        let before = fs::read_to_string(store.path()).unwrap();

        // A regular file cannot hold the staging file, so the rewrite stops
        // before the data file is replaced.
        let not_a_dir = dir.path().join("blocker");
        fs::write(&not_a_dir, "").unwrap();
        let err = store
            .rewrite_via(&not_a_dir, &[record("E9", "9")])
            .unwrap_err();
        assert!(err.to_string().contains("temporary file"), "{err:#}");

        assert_eq!(fs::read_to_string(store.path()).unwrap(), before);
        assert_eq!(store.load().unwrap(), original);
    }
}
