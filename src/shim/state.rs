use std::fmt;
use std::ops::Deref;

use crate::common::LedgerError;

// Maximum number of bytes in Key.
// if it's not in ascii, Len  is misleading, so using Bytes explicitly.
pub const MAX_KEY_BYTES: usize = 1024;

// Maximum number of bytes in Value.
pub const MAX_VALUE_BYTES: usize = 1024 * 1024 * 10;

// Key represents a ledger key that passed the stub's validation.
// other components can handle Key without checking the length.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Key(String);

impl Deref for Key {
    type Target = String;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for Key {
    type Error = LedgerError;
    fn try_from(s: String) -> Result<Self, Self::Error> {
        Key::new(s)
    }
}

impl Key {
    // Construct Key from given string.
    pub fn new(s: impl Into<String>) -> Result<Self, LedgerError> {
        let s = s.into();
        if s.is_empty() {
            Err(LedgerError::EmptyKey)
        } else if s.len() > MAX_KEY_BYTES {
            Err(LedgerError::MaxKeyBytes {
                key: s,
                max_bytes: MAX_KEY_BYTES,
            })
        } else {
            Ok(Self(s))
        }
    }

    pub(crate) fn new_unchecked(s: impl Into<String>) -> Self {
        Key(s.into())
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

// Value represents the serialized state stored under a key.
// It does not have to be Vec<u8> because we do not mutate.
#[derive(Clone, PartialEq, Eq)]
pub struct Value(Box<[u8]>);

impl Deref for Value {
    type Target = [u8];
    fn deref(&self) -> &Self::Target {
        self.0.as_ref()
    }
}

impl Value {
    pub fn new(v: impl Into<Box<[u8]>>) -> Result<Self, LedgerError> {
        let v = v.into();
        if v.len() > MAX_VALUE_BYTES {
            Err(LedgerError::MaxValueBytes {
                max_bytes: MAX_VALUE_BYTES,
            })
        } else {
            Ok(Value(v))
        }
    }

    pub(crate) fn new_unchecked(v: impl Into<Box<[u8]>>) -> Self {
        Value(v.into())
    }

    pub fn into_boxed_bytes(self) -> Box<[u8]> {
        self.0
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.0.into_vec()
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.len() > 1024 {
            write!(f, "{}", String::from_utf8_lossy(&self.deref()[..1024]))
        } else {
            write!(f, "{}", String::from_utf8_lossy(self.deref()))
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct KeyValue {
    pub key: Key,
    pub value: Value,
}

impl<K, V> TryFrom<(K, V)> for KeyValue
where
    K: Into<String>,
    V: AsRef<[u8]>,
{
    type Error = LedgerError;
    fn try_from(kv: (K, V)) -> Result<Self, Self::Error> {
        Ok(KeyValue {
            key: Key::new(kv.0)?,
            value: Value::new(Box::<[u8]>::from(kv.1.as_ref()))?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_key_is_rejected() {
        assert!(matches!(Key::new(""), Err(LedgerError::EmptyKey)));
    }

    #[test]
    fn oversized_key_is_rejected() {
        let key = "k".repeat(MAX_KEY_BYTES + 1);
        assert!(matches!(
            Key::new(key),
            Err(LedgerError::MaxKeyBytes { max_bytes, .. }) if max_bytes == MAX_KEY_BYTES
        ));
        assert!(Key::new("k".repeat(MAX_KEY_BYTES)).is_ok());
    }

    #[test]
    fn oversized_value_is_rejected() {
        let value = vec![0_u8; MAX_VALUE_BYTES + 1];
        assert!(Value::new(value).is_err());
    }
}
