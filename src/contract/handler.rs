use serde_json::value::RawValue;

use crate::common::{info, ErrorKind, Result};
use crate::contract::ticket::{seed_tickets, Record, Ticket};
use crate::shim::{ChaincodeStub, Value};

// Key prefix used by initLedger.
pub const SEED_KEY_PREFIX: &str = "Ticket";

// Range scanned by queryAllTickets. The upper case prefix does not match
// the keys initLedger writes, so seeded tickets are not listed.
pub const ALL_TICKETS_START_KEY: &str = "TICKET0";
pub const ALL_TICKETS_END_KEY: &str = "TICKET999";

fn expect_args(args: &[String], expected: usize) -> Result<()> {
    if args.len() != expected {
        return Err(ErrorKind::IncorrectArguments {
            expected,
            got: args.len(),
        }
        .into());
    }
    Ok(())
}

pub(crate) async fn query_ticket(
    stub: &mut dyn ChaincodeStub,
    args: &[String],
) -> Result<Option<Vec<u8>>> {
    expect_args(args, 1)?;

    let value = stub.get_state(&args[0]).await?;

    Ok(value.map(Value::into_vec))
}

pub(crate) async fn init_ledger(stub: &mut dyn ChaincodeStub) -> Result<Option<Vec<u8>>> {
    for (i, ticket) in seed_tickets().into_iter().enumerate() {
        let key = format!("{}{}", SEED_KEY_PREFIX, i);
        stub.put_state(&key, ticket.to_value()?).await?;
        info!(%key, ?ticket, "Added");
    }

    Ok(None)
}

pub(crate) async fn create_ticket(
    stub: &mut dyn ChaincodeStub,
    args: &[String],
) -> Result<Option<Vec<u8>>> {
    expect_args(args, 5)?;

    let ticket = Ticket::new(&args[1], &args[2], &args[3], &args[4]);
    stub.put_state(&args[0], ticket.to_value()?).await?;

    Ok(None)
}

pub(crate) async fn query_all_tickets(stub: &mut dyn ChaincodeStub) -> Result<Option<Vec<u8>>> {
    let iter = stub
        .get_state_by_range(ALL_TICKETS_START_KEY, ALL_TICKETS_END_KEY)
        .await
        .map_err(range_error)?;

    let mut records = Vec::new();
    for kv in iter {
        let kv = kv.map_err(range_error)?;
        // Stored bytes are embedded verbatim, only checked to be JSON.
        let record: Box<RawValue> = serde_json::from_slice(&kv.value)?;
        records.push(Record {
            key: kv.key.into_string(),
            record,
        });
    }

    let payload = serde_json::to_vec(&records)?;
    info!(records = records.len(), "queryAllTickets");

    Ok(Some(payload))
}

pub(crate) async fn change_ticket_owner(
    stub: &mut dyn ChaincodeStub,
    args: &[String],
) -> Result<Option<Vec<u8>>> {
    expect_args(args, 2)?;

    let key = &args[0];
    let value = stub
        .get_state(key)
        .await?
        .ok_or_else(|| ErrorKind::TicketNotFound { key: key.clone() })?;

    let mut ticket = Ticket::from_slice(&value)?;
    ticket.owner = args[1].clone();

    stub.put_state(key, ticket.to_value()?).await?;

    Ok(None)
}

fn range_error(err: crate::common::Error) -> crate::common::Error {
    ErrorKind::RangeIteration {
        description: err.to_string(),
    }
    .into()
}
