use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::io::{AsyncRead, AsyncSeek, AsyncWrite};

use crate::common::{trace, Result};
use crate::core::table::Table;
use crate::core::uow::Proposal;
use crate::shim::{ChaincodeStub, Key, StateIterator, Value};

// Stub backing a single proposal on the local peer.
// Reads see committed state only, writes are collected until the proposal
// is decided.
pub(crate) struct TxStub<'a, File> {
    proposal: &'a Proposal,
    table: &'a mut Table<File>,
    write_set: BTreeMap<Key, Value>,
}

impl<'a, File> TxStub<'a, File> {
    pub(crate) fn new(proposal: &'a Proposal, table: &'a mut Table<File>) -> Self {
        Self {
            proposal,
            table,
            write_set: BTreeMap::new(),
        }
    }

    pub(crate) fn into_write_set(self) -> BTreeMap<Key, Value> {
        self.write_set
    }
}

#[async_trait]
impl<'a, File> ChaincodeStub for TxStub<'a, File>
where
    File: AsyncWrite + AsyncRead + AsyncSeek + Unpin + Send,
{
    fn function_and_parameters(&self) -> (String, Vec<String>) {
        match self.proposal.args.split_first() {
            Some((function, params)) => (function.clone(), params.to_vec()),
            None => (String::new(), Vec::new()),
        }
    }

    fn tx_id(&self) -> &str {
        &self.proposal.tx_id
    }

    async fn get_state(&mut self, key: &str) -> Result<Option<Value>> {
        self.table.get(key).await
    }

    async fn put_state(&mut self, key: &str, value: Value) -> Result<()> {
        let key = Key::new(key)?;
        trace!(%key, tx_id=%self.proposal.tx_id, "Buffer write");
        self.write_set.insert(key, value);
        Ok(())
    }

    async fn get_state_by_range(
        &mut self,
        start_key: &str,
        end_key: &str,
    ) -> Result<StateIterator> {
        let results = self.table.range(start_key, end_key).await?;
        Ok(StateIterator::new(results))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    use crate::contract::TicketContract;
    use crate::shim::{Chaincode, Response};

    #[test]
    fn writes_are_buffered_until_commit() {
        tokio_test::block_on(async move {
            let mut table = Table::new(Cursor::new(Vec::new())).await.unwrap();
            let proposal = Proposal::new(["createTicket", "T"]);

            let mut stub = TxStub::new(&proposal, &mut table);
            assert_eq!(
                stub.function_and_parameters(),
                ("createTicket".to_owned(), vec!["T".to_owned()])
            );
            stub.put_state("T", Value::new(b"v".as_ref()).unwrap())
                .await
                .unwrap();
            assert!(stub.get_state("T").await.unwrap().is_none());

            let writes = stub.into_write_set();
            assert_eq!(writes.len(), 1);
            table.commit(writes).await.unwrap();
            assert!(table.get("T").await.unwrap().is_some());
        })
    }

    #[test]
    fn corrupted_entry_in_range_fails_query_all() {
        tokio_test::block_on(async move {
            let mut table = Table::new(Cursor::new(Vec::new())).await.unwrap();
            let mut writes = BTreeMap::new();
            for key in ["TICKET1", "TICKET2"] {
                let value = format!(r#"{{"organisator":"o","event":"e","date":"d","owner":"{}"}}"#, key);
                writes.insert(Key::new(key).unwrap(), Value::new(value.into_bytes()).unwrap());
            }
            table.commit(writes).await.unwrap();

            // Flip a byte inside the stored record of TICKET2.
            let mut bytes = table.into_file().into_inner();
            let needle = br#""owner":"TICKET2""#;
            let at = bytes
                .windows(needle.len())
                .position(|w| w == needle)
                .unwrap();
            bytes[at + 1] ^= 0x20;

            let mut table = Table::new(Cursor::new(bytes)).await.unwrap();
            let proposal = Proposal::new(["queryAllTickets"]);
            let mut stub = TxStub::new(&proposal, &mut table);
            let response = TicketContract.invoke(&mut stub).await;

            assert_eq!(response.status, Response::ERROR);
            assert!(
                response.message.starts_with("range iteration error. "),
                "{}",
                response.message
            );
            assert!(stub.into_write_set().is_empty());
        })
    }
}
