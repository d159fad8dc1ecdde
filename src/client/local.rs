use async_trait::async_trait;
use tokio::sync::mpsc::Sender;
use tokio::sync::oneshot;

use crate::client::Api;
use crate::common::{ErrorKind, Result};
use crate::core::{Proposal, UnitOfWork};
use crate::shim::Response;

/// Client of a peer running in the same process.
#[derive(Clone)]
pub struct LocalClient {
    request_sender: Sender<UnitOfWork>,
}

impl LocalClient {
    pub(crate) fn new(request_sender: Sender<UnitOfWork>) -> Self {
        Self { request_sender }
    }

    async fn submit(
        &mut self,
        uow: UnitOfWork,
        rx: oneshot::Receiver<Result<Response>>,
    ) -> Result<Response> {
        self.request_sender
            .send(uow)
            .await
            .map_err(|_| ErrorKind::Internal("peer stopped".to_owned()))?;

        rx.await
            .map_err(|_| ErrorKind::Internal("peer dropped proposal".to_owned()))?
    }
}

#[async_trait]
impl Api for LocalClient {
    async fn invoke(&mut self, args: Vec<String>) -> Result<Response> {
        let (uow, rx) = UnitOfWork::new_invoke(Proposal::new(args));
        self.submit(uow, rx).await
    }

    async fn query(&mut self, args: Vec<String>) -> Result<Response> {
        let (uow, rx) = UnitOfWork::new_query(Proposal::new(args));
        self.submit(uow, rx).await
    }
}
