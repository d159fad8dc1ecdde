mod internal;
pub use self::internal::{Error, ErrorKind};

use std::fmt;

#[derive(Debug)]
pub enum LedgerError {
    // Ledger keys must not be empty.
    EmptyKey,
    // The Key exceeds the maximum number of bytes accepted by the ledger.
    MaxKeyBytes { key: String, max_bytes: usize },
    MaxValueBytes { max_bytes: usize },
}

impl fmt::Display for LedgerError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            LedgerError::EmptyKey => write!(f, "key must not be an empty string"),
            LedgerError::MaxKeyBytes { max_bytes, .. } => {
                write!(f, "key exceeds maximum bytes({})", max_bytes)
            }
            LedgerError::MaxValueBytes { max_bytes, .. } => {
                write!(f, "value exceeds maximum bytes({})", max_bytes)
            }
        }
    }
}

impl std::error::Error for LedgerError {}
