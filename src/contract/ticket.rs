use serde::{Deserialize, Serialize};

use crate::common::Result;
use crate::shim::Value;

/// A ticket as stored on the ledger. Field order is the encoded order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket {
    pub organisator: String,
    pub event: String,
    // Free form, never validated.
    pub date: String,
    pub owner: String,
}

impl Ticket {
    pub fn new(
        organisator: impl Into<String>,
        event: impl Into<String>,
        date: impl Into<String>,
        owner: impl Into<String>,
    ) -> Self {
        Self {
            organisator: organisator.into(),
            event: event.into(),
            date: date.into(),
            owner: owner.into(),
        }
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }

    pub fn to_value(&self) -> Result<Value> {
        let bytes = serde_json::to_vec(self)?;
        Ok(Value::new(bytes)?)
    }
}

/// One element of the `queryAllTickets` payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record<T = Ticket> {
    #[serde(rename = "Key")]
    pub key: String,
    #[serde(rename = "Record")]
    pub record: T,
}

// Tickets written by initLedger, in key order.
pub(crate) fn seed_tickets() -> Vec<Ticket> {
    vec![
        Ticket::new("MadisonSquareGarden", "Knicks-Bulls", "20180501", "Carlos"),
        Ticket::new("MadisonSquareGarden", "Knicks-Jazz", "20180602", "Carlos"),
        Ticket::new("MadisonSquareGarden", "Knicks-Heat", "20180404", "Emad"),
        Ticket::new("BroadwayTheater", "BruceSpringsteen", "20180715", "Varad"),
        Ticket::new("BroadwayTheater", "Madonna", "201805010", "Phil"),
        Ticket::new("BroadwayTheater", "CatStevens", "20180519", "John"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_fields_in_declared_order() {
        let ticket = Ticket::new("BroadwayTheater", "Madonna", "201805010", "Phil");
        let value = ticket.to_value().unwrap();
        assert_eq!(
            std::str::from_utf8(&value).unwrap(),
            r#"{"organisator":"BroadwayTheater","event":"Madonna","date":"201805010","owner":"Phil"}"#
        );
    }

    #[test]
    fn decode_rejects_non_ticket_json() {
        assert!(Ticket::from_slice(b"not json").is_err());
        assert!(Ticket::from_slice(br#"{"owner":"Phil"}"#).is_err());
    }
}
