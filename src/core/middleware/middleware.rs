use async_trait::async_trait;

use crate::common::Result;
use crate::core::UnitOfWork;

// One stage a proposal passes through on the peer. The last stage answers the proposal.
#[async_trait]
pub(crate) trait Middleware {
    // Errors are peer failures. A failed chaincode call is still Ok and carried in its response.
    async fn apply(&mut self, uow: UnitOfWork) -> Result<()>;
}
