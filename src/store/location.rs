use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};
use directories::BaseDirs;

/// Folder name used beneath the user's home directory for application data.
const DATA_DIR_NAME: &str = ".workload-stats";
/// CSV file name stored inside the application data directory.
const DATA_FILE_NAME: &str = "employee_data.csv";
/// Log folder created next to the data file.
const LOGS_DIR_NAME: &str = "logs";

/// Resolve the absolute path to the records file inside the user's home.
pub fn default_data_path() -> Result<PathBuf> {
    let base_dirs = BaseDirs::new().ok_or_else(|| anyhow!("could not locate home directory"))?;
    Ok(base_dirs.home_dir().join(DATA_DIR_NAME).join(DATA_FILE_NAME))
}

/// Directory holding log files for a given data file.
pub fn logs_dir_for(data_file: &Path) -> PathBuf {
    data_file
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."))
        .join(LOGS_DIR_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn logs_live_beside_the_data_file() {
        assert_eq!(
            logs_dir_for(Path::new("/tmp/ws/employee_data.csv")),
            PathBuf::from("/tmp/ws/logs")
        );
        assert_eq!(
            logs_dir_for(Path::new("employee_data.csv")),
            PathBuf::from("./logs")
        );
    }
}
