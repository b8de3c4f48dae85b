use std::fs;
use std::path::Path;
use tracing::info;

use crate::directory::{CustomerDirectory, Directory};
use crate::error::LoadError;
use crate::models::Customer;

impl CustomerDirectory {
    /// Build the directory from `username password` records, one per line.
    ///
    /// Blank lines are skipped and anything after the second token is ignored.
    /// A line with a single token aborts the load.
    pub fn from_records(records: &str, buckets: usize) -> Result<Self, LoadError> {
        let mut directory = Directory::with_buckets(buckets);

        for (index, line) in records.lines().enumerate() {
            let mut tokens = line.split_whitespace();
            let Some(username) = tokens.next() else {
                continue;
            };
            let password = tokens.next().ok_or(LoadError::MalformedRecord { line: index + 1 })?;
            directory.put(username, Customer::new(username, password));
        }

        Ok(directory)
    }

    pub fn from_file(path: impl AsRef<Path>, buckets: usize) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let records = fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let directory = Self::from_records(&records, buckets)?;
        info!("Loaded {} customers from {}", directory.len(), path.display());
        Ok(directory)
    }
}
