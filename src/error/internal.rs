use std::error;
use std::fmt;
use std::io;

use backtrace::Backtrace;

use crate::error::LedgerError;

pub struct Error {
    kind: ErrorKind,
    backtrace: Option<Backtrace>,
}

#[derive(Debug)]
pub enum ErrorKind {
    Io(io::Error),
    Json(serde_json::Error),
    Yaml(serde_yaml::Error),
    Ledger(LedgerError),
    // Argument count does not match what the chaincode function expects.
    IncorrectArguments { expected: usize, got: usize },
    UnknownFunction(String),
    TicketNotFound { key: String },
    RangeIteration { description: String },
    // Chaincode answered with an error response.
    ChaincodeResponse { status: i32, message: String },
    EntryDecode { description: String },
    EntryCorrupted { key: String, offset: usize },
    Internal(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.kind() {
            ErrorKind::Io(err) => err.fmt(f),
            ErrorKind::Json(err) => write!(f, "json: {}", err),
            ErrorKind::Yaml(err) => write!(f, "yaml: {}", err),
            ErrorKind::Ledger(err) => err.fmt(f),
            ErrorKind::IncorrectArguments { expected, .. } => {
                write!(f, "Incorrect number of arguments. Expecting {}", expected)
            }
            ErrorKind::UnknownFunction(_) => {
                write!(f, "Invalid Smart Contract function name.")
            }
            ErrorKind::TicketNotFound { key } => write!(f, "ticket not found: {}", key),
            ErrorKind::RangeIteration { description } => {
                write!(f, "range iteration error. {}", description)
            }
            ErrorKind::ChaincodeResponse { status, message } => {
                write!(f, "chaincode error response({}). {}", status, message)
            }
            ErrorKind::EntryDecode { description } => {
                write!(f, "entry decode error. {}", description)
            }
            ErrorKind::EntryCorrupted { key, offset } => {
                write!(
                    f,
                    "entry checksum mismatch. key: {:30} offset: {}",
                    key, offset
                )
            }
            ErrorKind::Internal(description) => write!(f, "internal error. {}", description),
        }
    }
}

// Backtraces are noisy in test assertions and log lines, print the kind only.
impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Error").field("kind", &self.kind).finish()
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::from(ErrorKind::Io(err))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::from(ErrorKind::Json(err))
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(err: serde_yaml::Error) -> Self {
        Error::from(ErrorKind::Yaml(err))
    }
}

impl From<LedgerError> for Error {
    fn from(err: LedgerError) -> Self {
        Error::from(ErrorKind::Ledger(err))
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Error::with_backtrace(kind)
    }
}

impl Error {
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    pub fn backtrace(&self) -> Option<&Backtrace> {
        self.backtrace.as_ref()
    }

    pub fn is_eof(&self) -> bool {
        if let ErrorKind::Io(err) = self.kind() {
            err.kind().eq(&io::ErrorKind::UnexpectedEof)
        } else {
            false
        }
    }

    fn with_backtrace(kind: ErrorKind) -> Self {
        Self {
            kind,
            backtrace: Some(Backtrace::new()),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self.kind() {
            ErrorKind::Io(err) => Some(err),
            ErrorKind::Json(err) => Some(err),
            ErrorKind::Yaml(err) => Some(err),
            ErrorKind::Ledger(err) => Some(err),
            _ => None,
        }
    }
}
