use async_trait::async_trait;
use tokio::fs;
use tokio::io::{AsyncRead, AsyncSeek, AsyncWrite};

use crate::common::{debug, info, Result};
use crate::core::middleware::Middleware;
use crate::core::stub::TxStub;
use crate::core::table::Table;
use crate::core::uow::Proposal;
use crate::core::UnitOfWork;
use crate::shim::{Chaincode, Response};

// Runs proposals against the chaincode and decides whether their writes
// reach the ledger.
pub(crate) struct Dispatcher<C, File = fs::File> {
    chaincode: C,
    table: Table<File>,
}

impl<C, File> Dispatcher<C, File>
where
    C: Chaincode,
    File: AsyncWrite + AsyncRead + AsyncSeek + Unpin + Send,
{
    pub(crate) fn new(chaincode: C, table: Table<File>) -> Self {
        Self { chaincode, table }
    }

    async fn execute(&mut self, proposal: &Proposal, init: bool, commit: bool) -> Result<Response> {
        let mut stub = TxStub::new(proposal, &mut self.table);

        let response = if init {
            self.chaincode.init(&mut stub).await
        } else {
            self.chaincode.invoke(&mut stub).await
        };

        let write_set = stub.into_write_set();

        if response.is_ok() && commit {
            let committed = self.table.commit(write_set).await?;
            info!(tx_id=%proposal.tx_id, status=response.status, committed, "Proposal committed");
        } else {
            debug!(
                tx_id=%proposal.tx_id,
                status=response.status,
                discarded=write_set.len(),
                "Proposal not committed"
            );
        }

        Ok(response)
    }
}

#[async_trait]
impl<C, File> Middleware for Dispatcher<C, File>
where
    C: Chaincode,
    File: AsyncWrite + AsyncRead + AsyncSeek + Unpin + Send,
{
    async fn apply(&mut self, uow: UnitOfWork) -> Result<()> {
        match uow {
            UnitOfWork::Init(mut work) => {
                let result = self.execute(&work.request, true, true).await;
                work.send_response(result)
            }
            UnitOfWork::Invoke(mut work) => {
                let result = self.execute(&work.request, false, true).await;
                work.send_response(result)
            }
            UnitOfWork::Query(mut work) => {
                let result = self.execute(&work.request, false, false).await;
                work.send_response(result)
            }
        }
    }
}
