use tokio::sync::mpsc::{self, Receiver, Sender};
use tracing_futures::Instrument;

use crate::common::{debug, error, info, ErrorKind, Result};
use crate::core::middleware::MiddlewareChain;
use crate::core::table::Table;
use crate::core::uow::Proposal;
use crate::core::{Config, UnitOfWork};
use crate::shim::Chaincode;

pub(crate) struct Builder<C> {
    config: Config,
    chaincode: C,
}

impl<C> Builder<C>
where
    C: Chaincode + 'static,
{
    pub(crate) fn from_config(config: Config, chaincode: C) -> Self {
        Self { config, chaincode }
    }

    pub(crate) async fn build(self) -> Result<Peer<C>> {
        let (send, recv) = mpsc::channel(self.config.request_channel_buffer());

        let ledger = self.config.ledger_path()?;
        debug!("Open ledger file {}", ledger.display());
        let table = Table::from_path(&ledger).await?;
        debug!(keys = table.len(), "Ledger opened");
        let instantiate = table.is_empty();

        let mut middlewares = MiddlewareChain::new(self.chaincode, table);

        if instantiate {
            info!(channel = self.config.channel(), "Instantiate chaincode");
            let (uow, rx) = UnitOfWork::new_init(Proposal::new(Vec::<String>::new()));
            middlewares.apply(uow).await?;
            let response = rx
                .await
                .map_err(|_| ErrorKind::Internal("init response dropped".to_owned()))??;
            if !response.is_ok() {
                return Err(ErrorKind::Internal(format!(
                    "chaincode init failed. {}",
                    response.message
                ))
                .into());
            }
        }

        Ok(Peer {
            request_send: send,
            request_recv: recv,
            middlewares,
        })
    }
}

// Executes proposals one at a time, in arrival order.
pub(crate) struct Peer<C> {
    request_recv: Receiver<UnitOfWork>,
    request_send: Sender<UnitOfWork>,
    middlewares: MiddlewareChain<C>,
}

impl<C> Peer<C>
where
    C: Chaincode + 'static,
{
    pub(crate) fn request_channel(&self) -> Sender<UnitOfWork> {
        self.request_send.clone()
    }

    // Runs until every request channel handed out is dropped.
    pub(crate) async fn run(self) {
        let Peer {
            mut request_recv,
            request_send,
            mut middlewares,
        } = self;
        drop(request_send);

        info!("Peer running");

        while let Some(uow) = request_recv.recv().await {
            let span = tracing::info_span!("proposal", tx_id = %uow.proposal().tx_id);
            if let Err(err) = middlewares.apply(uow).instrument(span).await {
                error!("Handle proposal {}", err);
            }
        }

        info!("Peer stopped");
    }
}
