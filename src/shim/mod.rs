//! Boundary between the chaincode and the host that executes it.
//!
//! The host hands every call a [`ChaincodeStub`] carrying the function name,
//! its arguments and access to ledger state. Chaincode reports back through
//! a [`Response`]. Nothing in here knows about tickets.

mod state;
pub use self::state::{Key, KeyValue, Value, MAX_KEY_BYTES, MAX_VALUE_BYTES};

mod response;
pub use self::response::Response;

mod iterator;
pub use self::iterator::StateIterator;

mod mock;
pub use self::mock::MockStub;

use std::ops::Bound;

use async_trait::async_trait;

use crate::common::Result;

/// Ledger access handed to chaincode for the duration of one call.
#[async_trait]
pub trait ChaincodeStub: Send {
    /// First argument is the function name, the rest are its parameters.
    fn function_and_parameters(&self) -> (String, Vec<String>);

    fn tx_id(&self) -> &str;

    /// Returns `None` when nothing is stored under `key`.
    async fn get_state(&mut self, key: &str) -> Result<Option<Value>>;

    async fn put_state(&mut self, key: &str, value: Value) -> Result<()>;

    /// Lexical range scan, `start_key` inclusive and `end_key` exclusive.
    /// An empty `end_key` leaves the range open ended.
    async fn get_state_by_range(&mut self, start_key: &str, end_key: &str)
        -> Result<StateIterator>;
}

#[async_trait]
pub trait Chaincode: Send + Sync {
    /// Called once when the chaincode is instantiated on a channel.
    async fn init(&self, stub: &mut dyn ChaincodeStub) -> Response;

    async fn invoke(&self, stub: &mut dyn ChaincodeStub) -> Response;
}

/// Generate a transaction id, 128 random bits in hex.
pub fn new_tx_id() -> String {
    format!("{:032x}", rand::random::<u128>())
}

// Translate a stub range into map bounds.
// None means the range can not contain any key.
pub(crate) fn key_range<'a>(
    start_key: &'a str,
    end_key: &'a str,
) -> Option<(Bound<&'a str>, Bound<&'a str>)> {
    if end_key.is_empty() {
        return Some((Bound::Included(start_key), Bound::Unbounded));
    }
    if start_key >= end_key {
        return None;
    }
    Some((Bound::Included(start_key), Bound::Excluded(end_key)))
}
