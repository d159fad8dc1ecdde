mod proposal;
pub use self::proposal::Proposal;

use std::fmt;

use tokio::sync::oneshot;

use crate::common::{ErrorKind, Result};
use crate::shim::Response;

pub(crate) enum UnitOfWork {
    // Chaincode instantiation. Commits on success.
    Init(Work<Proposal, Response>),
    // Commits on success.
    Invoke(Work<Proposal, Response>),
    // Evaluated against committed state, never commits.
    Query(Work<Proposal, Response>),
}

pub(crate) struct Work<Req, Res> {
    pub(crate) request: Req,
    // Wrap with option so that response can be sent via mut reference.
    pub(crate) response_sender: Option<oneshot::Sender<Result<Res>>>,
}

impl<Req, Res> Work<Req, Res> {
    fn new(request: Req) -> (Self, oneshot::Receiver<Result<Res>>) {
        let (tx, rx) = oneshot::channel();
        (
            Work {
                request,
                response_sender: Some(tx),
            },
            rx,
        )
    }

    pub(crate) fn send_response(&mut self, response: Result<Res>) -> Result<()> {
        self.response_sender
            .take()
            .ok_or_else(|| ErrorKind::Internal("response already sent".to_owned()))?
            .send(response)
            .map_err(|_| ErrorKind::Internal("send response".to_owned()).into())
    }
}

impl UnitOfWork {
    pub(crate) fn new_init(
        proposal: Proposal,
    ) -> (UnitOfWork, oneshot::Receiver<Result<Response>>) {
        let (work, rx) = Work::new(proposal);
        (UnitOfWork::Init(work), rx)
    }

    pub(crate) fn new_invoke(
        proposal: Proposal,
    ) -> (UnitOfWork, oneshot::Receiver<Result<Response>>) {
        let (work, rx) = Work::new(proposal);
        (UnitOfWork::Invoke(work), rx)
    }

    pub(crate) fn new_query(
        proposal: Proposal,
    ) -> (UnitOfWork, oneshot::Receiver<Result<Response>>) {
        let (work, rx) = Work::new(proposal);
        (UnitOfWork::Query(work), rx)
    }

    pub(crate) fn kind(&self) -> &'static str {
        match self {
            UnitOfWork::Init(_) => "init",
            UnitOfWork::Invoke(_) => "invoke",
            UnitOfWork::Query(_) => "query",
        }
    }

    pub(crate) fn proposal(&self) -> &Proposal {
        match self {
            UnitOfWork::Init(work) | UnitOfWork::Invoke(work) | UnitOfWork::Query(work) => {
                &work.request
            }
        }
    }
}

impl fmt::Debug for UnitOfWork {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            UnitOfWork::Init(_) => {
                write!(f, "Init")
            }
            UnitOfWork::Invoke(invoke) => {
                write!(f, "Invoke {}", invoke.request)
            }
            UnitOfWork::Query(query) => {
                write!(f, "Query {}", query.request)
            }
        }
    }
}
