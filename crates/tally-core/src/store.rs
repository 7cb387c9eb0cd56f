//! Flat-file transaction store
//!
//! One CSV file with a fixed header. Rows are only ever appended; nothing in
//! here rewrites or deletes an existing row.

use std::fs::{self, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, WriterBuilder};
use tracing::{debug, info};

use crate::analytics::Ledger;
use crate::error::{Error, Result};
use crate::models::{Transaction, TransactionRecord};

/// Column order of the store file
pub const COLUMNS: [&str; 5] = ["Date", "Category", "Sub-Category", "Memo", "Amount"];

/// File name used when no path is configured
pub const DEFAULT_FILE_NAME: &str = "transactions.csv";

#[derive(Debug, Clone)]
pub struct TransactionStore {
    path: PathBuf,
}

impl TransactionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Create the file with only the header row if it does not exist yet.
    ///
    /// Returns `true` when a new file was written.
    pub fn initialize(&self) -> Result<bool> {
        if self.path.exists() {
            debug!("Store already exists at {}", self.path.display());
            return Ok(false);
        }
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let mut writer = WriterBuilder::new().from_path(&self.path)?;
        writer.write_record(COLUMNS)?;
        writer.flush()?;

        info!("Initialized transaction store at {}", self.path.display());
        Ok(true)
    }

    /// Read every row in file order. A missing file reads as empty.
    pub fn read_all(&self) -> Result<Vec<TransactionRecord>> {
        if !self.path.exists() {
            debug!("Store {} not found, treating as empty", self.path.display());
            return Ok(Vec::new());
        }

        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_path(&self.path)?;

        let headers = rdr.headers()?.clone();
        if !headers.is_empty() && !headers.iter().eq(COLUMNS) {
            return Err(Error::InvalidData(format!(
                "Unexpected store header in {}: {}",
                self.path.display(),
                headers.iter().collect::<Vec<_>>().join(",")
            )));
        }

        let records = rdr
            .deserialize()
            .collect::<std::result::Result<Vec<TransactionRecord>, _>>()?;

        debug!("Read {} rows from {}", records.len(), self.path.display());
        Ok(records)
    }

    /// Append one transaction, writing the header first if the file is new.
    pub fn append(&self, transaction: &Transaction) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let mut file = OpenOptions::new()
            .read(true)
            .append(true)
            .create(true)
            .open(&self.path)?;

        let len = file.metadata()?.len();
        if len == 0 {
            let mut header = WriterBuilder::new().from_writer(Vec::new());
            header.write_record(COLUMNS)?;
            let bytes = header
                .into_inner()
                .map_err(|e| Error::Io(e.into_error()))?;
            file.write_all(&bytes)?;
        } else {
            // A hand-edited file may lack its final newline
            let mut last = [0u8; 1];
            file.seek(SeekFrom::End(-1))?;
            file.read_exact(&mut last)?;
            if last[0] != b'\n' {
                file.write_all(b"\n")?;
            }
        }

        let mut writer = WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        writer.serialize(TransactionRecord::from(transaction))?;
        writer.flush()?;

        info!(
            "Appended {} {} transaction to {}",
            transaction.date(),
            transaction.sub_category(),
            self.path.display()
        );
        Ok(())
    }

    /// Read and validate the whole store
    pub fn load_ledger(&self) -> Result<Ledger> {
        let records = self.read_all()?;
        Ledger::from_records(&records)
    }
}
