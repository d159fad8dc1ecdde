use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tokio::task::JoinHandle;

use crate::cli::{dump, invoke};
use crate::client::LocalClient;
use crate::common::debug;
use crate::config::Initializer;
use crate::core::Config as PeerConfig;
use crate::contract::TicketContract;
use crate::Result;

const DEFAULT_LEDGER_DIR: &str = ".ticketcc";

/// Ticket registry chaincode on a local development peer
#[derive(Parser, Debug)]
#[command(version, propagate_version = true, subcommand_required = true)]
pub struct TicketccCommand {
    /// Peer options
    #[command(flatten)]
    pub peer: PeerOptions,
    /// Subcommand
    #[command(subcommand)]
    pub command: Command,
}

/// Peer options
#[derive(Args, Debug)]
pub struct PeerOptions {
    /// Configuration file path
    #[arg(long, short = 'C', env = "TICKETCC_CONFIG_PATH", global = true)]
    pub config: Option<PathBuf>,
    /// Root directory where ledger files are stored [default: .ticketcc]
    #[arg(long, env = "TICKETCC_DIR", global = true)]
    pub ledger_dir: Option<PathBuf>,
    /// Channel the chaincode runs on
    #[arg(long, env = "TICKETCC_CHANNEL", global = true)]
    pub channel: Option<String>,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Invoke a chaincode function and commit its writes
    Invoke(invoke::InvokeCommand),
    /// Evaluate a chaincode function without committing
    Query(invoke::InvokeCommand),
    /// Dump ledger file entries as json
    Dump(dump::DumpCommand),
}

impl Command {
    pub async fn run(self, peer: PeerOptions) -> Result<()> {
        match self {
            Command::Invoke(invoke) => invoke.run(peer, true).await,
            Command::Query(query) => query.run(peer, false).await,
            Command::Dump(dump) => dump.run().await,
        }
    }
}

/// Parse command line args
pub fn parse() -> TicketccCommand {
    TicketccCommand::parse()
}

/// Start a peer running the ticket contract as configured by `options`.
pub async fn launch(options: PeerOptions) -> Result<(LocalClient, JoinHandle<()>)> {
    let PeerOptions {
        config,
        mut ledger_dir,
        mut channel,
    } = options;

    let mut initializer = match config {
        Some(path) => Initializer::load_config_file(path).await?,
        None => Initializer::from_config(Default::default()),
    };

    let flags = {
        let mut flags = PeerConfig::default();
        flags.set_root_dir(&mut ledger_dir);
        flags.set_channel(&mut channel);
        flags
    };
    initializer.override_peer_config(flags);
    if initializer.config.peer.root_dir.is_none() {
        initializer.set_root_dir(DEFAULT_LEDGER_DIR);
    }

    debug!("{:?}", initializer);

    initializer.init_dir().await?;
    initializer.launch(TicketContract::new()).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_definition() {
        TicketccCommand::command().debug_assert();
    }

    #[test]
    fn invoke_collects_function_and_args() {
        let parsed = TicketccCommand::try_parse_from([
            "ticketcc",
            "--channel",
            "ticketing",
            "invoke",
            "createTicket",
            "Ticket9",
            "MadisonSquareGarden",
            "event",
            "date",
            "owner",
        ])
        .unwrap();

        assert_eq!(parsed.peer.channel.as_deref(), Some("ticketing"));
        assert!(parsed.peer.ledger_dir.is_none());
        match parsed.command {
            Command::Invoke(invoke) => {
                assert_eq!(invoke.function, "createTicket");
                assert_eq!(invoke.args.len(), 5);
                assert_eq!(invoke.args[1], "MadisonSquareGarden");
            }
            other => panic!("unexpected {:?}", other),
        }
    }
}
