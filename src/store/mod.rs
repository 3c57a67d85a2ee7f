//! Persistence for production records, split across logical submodules.

mod location;
mod records;

pub use location::{default_data_path, logs_dir_for};
pub use records::RecordStore;
