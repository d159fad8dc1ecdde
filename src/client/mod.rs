use async_trait::async_trait;

use crate::contract::{Function, Record, Ticket};
use crate::shim::Response;
use crate::{ErrorKind, Result};

mod local;
pub use self::local::LocalClient;

/// Typed access to the ticket chaincode running on a peer.
#[async_trait]
pub trait Api: Send {
    /// Submit a proposal whose writes are committed on success.
    async fn invoke(&mut self, args: Vec<String>) -> Result<Response>;

    /// Evaluate a proposal without committing anything.
    async fn query(&mut self, args: Vec<String>) -> Result<Response>;

    async fn init_ledger(&mut self) -> Result<()> {
        let response = self.invoke(call(Function::InitLedger, &[])).await?;
        expect_ok(response).map(|_| ())
    }

    async fn create_ticket(&mut self, key: &str, ticket: &Ticket) -> Result<()> {
        let args = call(
            Function::CreateTicket,
            &[
                key,
                ticket.organisator.as_str(),
                ticket.event.as_str(),
                ticket.date.as_str(),
                ticket.owner.as_str(),
            ],
        );
        let response = self.invoke(args).await?;
        expect_ok(response).map(|_| ())
    }

    async fn query_ticket(&mut self, key: &str) -> Result<Option<Ticket>> {
        let response = self.query(call(Function::QueryTicket, &[key])).await?;
        let payload = expect_ok(response)?;
        if payload.is_empty() {
            return Ok(None);
        }
        Ticket::from_slice(&payload).map(Some)
    }

    async fn change_ticket_owner(&mut self, key: &str, owner: &str) -> Result<()> {
        let response = self
            .invoke(call(Function::ChangeTicketOwner, &[key, owner]))
            .await?;
        expect_ok(response).map(|_| ())
    }

    async fn query_all_tickets(&mut self) -> Result<Vec<Record>> {
        let response = self.query(call(Function::QueryAllTickets, &[])).await?;
        let payload = expect_ok(response)?;
        Ok(serde_json::from_slice(&payload)?)
    }
}

fn call(function: Function, params: &[&str]) -> Vec<String> {
    std::iter::once(function.name())
        .chain(params.iter().copied())
        .map(str::to_owned)
        .collect()
}

// Turn an error response into an error, return the payload otherwise.
fn expect_ok(response: Response) -> Result<Vec<u8>> {
    if !response.is_ok() {
        return Err(ErrorKind::ChaincodeResponse {
            status: response.status,
            message: response.message,
        }
        .into());
    }
    Ok(response.payload.unwrap_or_default())
}
