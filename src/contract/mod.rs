//! Ticket registry chaincode.

mod function;
pub use self::function::Function;

mod ticket;
pub use self::ticket::{Record, Ticket};

mod handler;
pub use self::handler::{ALL_TICKETS_END_KEY, ALL_TICKETS_START_KEY, SEED_KEY_PREFIX};

use async_trait::async_trait;

use crate::common::{debug, warn};
use crate::shim::{Chaincode, ChaincodeStub, Response};

/// The ticket registry. Holds no state of its own, everything lives on the ledger.
#[derive(Debug, Default, Clone, Copy)]
pub struct TicketContract;

impl TicketContract {
    pub fn new() -> Self {
        TicketContract
    }
}

#[async_trait]
impl Chaincode for TicketContract {
    async fn init(&self, stub: &mut dyn ChaincodeStub) -> Response {
        debug!(tx_id=%stub.tx_id(), "Init");
        Response::success(None)
    }

    async fn invoke(&self, stub: &mut dyn ChaincodeStub) -> Response {
        let (name, args) = stub.function_and_parameters();

        let function = match name.parse::<Function>() {
            Ok(function) => function,
            Err(err) => {
                warn!(function=%name, "Unknown function");
                return Response::error(err.to_string());
            }
        };

        let result = match function {
            Function::QueryTicket => handler::query_ticket(stub, &args).await,
            Function::InitLedger => handler::init_ledger(stub).await,
            Function::CreateTicket => handler::create_ticket(stub, &args).await,
            Function::QueryAllTickets => handler::query_all_tickets(stub).await,
            Function::ChangeTicketOwner => handler::change_ticket_owner(stub, &args).await,
        };

        if let Err(err) = &result {
            warn!(%function, tx_id=%stub.tx_id(), %err, "Function failed");
        }

        Response::from(result)
    }
}
