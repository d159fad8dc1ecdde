use std::io::Write;

use clap::Args;

use crate::cli::{launch, PeerOptions};
use crate::client::Api;
use crate::{ErrorKind, Result};

/// Call a chaincode function
#[derive(Args, Debug)]
pub struct InvokeCommand {
    /// Function name (e.g. queryTicket, createTicket)
    #[arg(value_name = "FUNCTION")]
    pub(crate) function: String,
    /// Function arguments
    #[arg(value_name = "ARGS", allow_hyphen_values = true)]
    pub(crate) args: Vec<String>,
}

impl InvokeCommand {
    pub async fn run(self, peer: PeerOptions, commit: bool) -> Result<()> {
        let InvokeCommand { function, args } = self;

        let (mut client, handle) = launch(peer).await?;

        let mut call = Vec::with_capacity(args.len() + 1);
        call.push(function);
        call.extend(args);

        let response = if commit {
            client.invoke(call).await?
        } else {
            client.query(call).await?
        };

        // Let the peer drain and stop before reporting.
        drop(client);
        handle
            .await
            .map_err(|e| ErrorKind::Internal(format!("peer task {}", e)))?;

        if !response.is_ok() {
            return Err(ErrorKind::ChaincodeResponse {
                status: response.status,
                message: response.message,
            }
            .into());
        }

        let payload = response.payload();
        if !payload.is_empty() {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(payload)?;
            writeln!(stdout)?;
        }

        Ok(())
    }
}
