use tokio::fs;
use tokio::io::{AsyncRead, AsyncSeek, AsyncWrite};

use crate::common::Result;
use crate::core::middleware::{Dispatcher, Logger, Middleware};
use crate::core::table::Table;
use crate::core::UnitOfWork;
use crate::shim::Chaincode;

pub(crate) struct MiddlewareChain<C, File = fs::File> {
    root: Logger<Dispatcher<C, File>>,
}

impl<C, File> MiddlewareChain<C, File>
where
    C: Chaincode + 'static,
    File: AsyncWrite + AsyncRead + AsyncSeek + Unpin + Send + 'static,
{
    pub(crate) fn new(chaincode: C, table: Table<File>) -> Self {
        let dispatcher = Dispatcher::new(chaincode, table);

        let logger = Logger::new(dispatcher);

        Self { root: logger }
    }

    pub(crate) async fn apply(&mut self, uow: UnitOfWork) -> Result<()> {
        self.root.apply(uow).await
    }
}
