use std::fmt;

use crate::common::Result;

/// Outcome of a chaincode call as reported back to the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: i32,
    pub message: String,
    pub payload: Option<Vec<u8>>,
}

impl Response {
    pub const OK: i32 = 200;
    pub const ERROR: i32 = 500;
    /// Statuses from here on are failures.
    pub const ERROR_THRESHOLD: i32 = 400;

    pub fn success(payload: Option<Vec<u8>>) -> Self {
        Self {
            status: Response::OK,
            message: String::new(),
            payload,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: Response::ERROR,
            message: message.into(),
            payload: None,
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status < Response::ERROR_THRESHOLD
    }

    /// Payload bytes, empty when the call produced none.
    pub fn payload(&self) -> &[u8] {
        self.payload.as_deref().unwrap_or_default()
    }
}

impl From<Result<Option<Vec<u8>>>> for Response {
    fn from(result: Result<Option<Vec<u8>>>) -> Self {
        match result {
            Ok(payload) => Response::success(payload),
            Err(err) => Response::error(err.to_string()),
        }
    }
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.is_ok() {
            write!(f, "status:{} payload:{}bytes", self.status, self.payload().len())
        } else {
            write!(f, "status:{} message:{}", self.status, self.message)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::ErrorKind;

    #[test]
    fn status_below_threshold_is_ok() {
        assert!(Response::success(None).is_ok());
        assert!(!Response::error("boom").is_ok());

        let mut response = Response::success(Some(b"x".to_vec()));
        response.status = 399;
        assert!(response.is_ok());
        response.status = 404;
        assert!(!response.is_ok());
        assert_eq!(response.to_string(), "status:404 message:");
    }

    #[test]
    fn from_result() {
        let result: Result<Option<Vec<u8>>> = Ok(Some(b"payload".to_vec()));
        let ok = Response::from(result);
        assert_eq!(ok.status, Response::OK);
        assert_eq!(ok.payload(), b"payload");

        let result: Result<Option<Vec<u8>>> = Err(ErrorKind::Internal("boom".to_owned()).into());
        let err = Response::from(result);
        assert_eq!(err.status, Response::ERROR);
        assert!(err.payload().is_empty());
    }
}
