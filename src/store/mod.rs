use chrono::Utc;
use log::{debug, error, info, warn};
use sha2::{Digest, Sha256};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::bank::Bank;
use crate::config;

pub mod models;

#[cfg(test)]
mod tests;

use models::{AccountRecord, StoreDocument, STORE_FORMAT_VERSION};

/// Store errors
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Store file not found: {0}")]
    NotFound(PathBuf),

    #[error("Store I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Malformed store document: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Unsupported store format version {found} (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },

    #[error("Store checksum mismatch")]
    ChecksumMismatch,

    #[error("Invalid record for account {account_number}: {reason}")]
    InvalidRecord {
        account_number: String,
        reason: &'static str,
    },
}

/// Where the bank's accounts live between runs
#[cfg_attr(test, mockall::automock)]
pub trait AccountStore {
    fn load(&self) -> Result<Vec<AccountRecord>, StoreError>;
    fn save(&self, records: &[AccountRecord]) -> Result<(), StoreError>;
}

/// JSON document on the local filesystem
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    verify_checksum: bool,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            verify_checksum: true,
        }
    }

    /// Build a store from the global configuration
    pub fn from_config() -> Self {
        let config = config::get_config();
        Self::new(&config.store.path).verify_checksum(config.store.verify_checksum)
    }

    pub fn verify_checksum(mut self, verify: bool) -> Self {
        self.verify_checksum = verify;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }
}

impl AccountStore for JsonFileStore {
    fn load(&self) -> Result<Vec<AccountRecord>, StoreError> {
        if !self.path.exists() {
            return Err(StoreError::NotFound(self.path.clone()));
        }

        let contents = fs::read_to_string(&self.path)?;
        let document: StoreDocument = serde_json::from_str(&contents)?;

        if document.version != STORE_FORMAT_VERSION {
            return Err(StoreError::UnsupportedVersion {
                found: document.version,
                expected: STORE_FORMAT_VERSION,
            });
        }

        if self.verify_checksum && checksum(&document.accounts)? != document.checksum {
            return Err(StoreError::ChecksumMismatch);
        }

        debug!(
            "Read {} account records saved at {} from {:?}",
            document.accounts.len(),
            document.saved_at,
            self.path
        );
        Ok(document.accounts)
    }

    fn save(&self, records: &[AccountRecord]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let document = StoreDocument {
            version: STORE_FORMAT_VERSION,
            saved_at: Utc::now(),
            checksum: checksum(records)?,
            accounts: records.to_vec(),
        };

        let serialized = serde_json::to_string_pretty(&document)?;
        fs::write(&self.path, serialized)?;

        debug!("Wrote {} account records to {:?}", records.len(), self.path);
        Ok(())
    }
}

/// SHA-256 over the serialized account records
pub fn checksum(records: &[AccountRecord]) -> Result<String, StoreError> {
    let bytes = serde_json::to_vec(records)?;
    Ok(hex::encode(Sha256::digest(&bytes)))
}

/// Reject the whole set if any record breaks a balance invariant
pub fn validate_records(records: &[AccountRecord]) -> Result<(), StoreError> {
    for record in records {
        record.validate().map_err(|reason| StoreError::InvalidRecord {
            account_number: record.account_number.clone(),
            reason,
        })?;
    }
    Ok(())
}

/// Build the bank from the store, falling back to the default accounts when
/// the store is missing, unreadable, corrupt or empty.
pub fn load_bank(store: &dyn AccountStore) -> Bank {
    let loaded = store
        .load()
        .and_then(|records| validate_records(&records).map(|()| records));

    match loaded {
        Ok(records) if records.is_empty() => {
            warn!("Account store is empty, using default accounts");
            Bank::with_default_accounts()
        }
        Ok(records) => {
            info!("Loaded {} accounts from store", records.len());
            Bank::from_records(records)
        }
        Err(StoreError::NotFound(path)) => {
            info!("No account store at {:?}, using default accounts", path);
            Bank::with_default_accounts()
        }
        Err(err) => {
            error!("Error loading accounts from store: {}", err);
            Bank::with_default_accounts()
        }
    }
}

/// Write every account back to the store
pub fn save_bank(store: &dyn AccountStore, bank: &Bank) -> Result<(), StoreError> {
    store.save(&bank.to_records())?;
    info!("Saved {} accounts to store", bank.len());
    Ok(())
}
