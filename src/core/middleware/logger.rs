use async_trait::async_trait;

use crate::common::{info, warn, Result};
use crate::core::middleware::Middleware;
use crate::core::UnitOfWork;

// Records every proposal passing through the chain with its elapsed time.
pub(crate) struct Logger<MW> {
    next: MW,
}

impl<MW> Logger<MW> {
    pub(crate) fn new(next: MW) -> Self {
        Self { next }
    }
}

#[async_trait]
impl<MW> Middleware for Logger<MW>
where
    MW: Middleware + Send + 'static,
{
    async fn apply(&mut self, uow: UnitOfWork) -> Result<()> {
        let start = tokio::time::Instant::now();
        let kind = uow.kind();
        let proposal = uow.proposal();
        let function = proposal.function().to_owned();
        let tx_id = proposal.tx_id.clone();
        let params = proposal.args.len().saturating_sub(1);

        let result = self.next.apply(uow).await;
        let elapsed = start.elapsed();

        match &result {
            Ok(()) => info!(kind, %function, %tx_id, params, ?elapsed, "Proposal done"),
            Err(err) => warn!(kind, %function, %tx_id, params, ?elapsed, %err, "Proposal failed"),
        }

        result
    }
}
