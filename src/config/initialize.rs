use std::path::{Path, PathBuf};

use tokio::fs;
use tokio::task::JoinHandle;

use crate::client::LocalClient;
use crate::common::{debug, Result};
use crate::config::Config;
use crate::core::{self, Builder};
use crate::shim::Chaincode;

#[derive(Debug)]
pub struct Initializer {
    pub config: Config,
}

impl Initializer {
    pub fn from_config(config: Config) -> Self {
        Self { config }
    }

    pub async fn load_config_file(path: impl AsRef<Path>) -> Result<Self> {
        let f = fs::File::open(path).await?;
        let config = serde_yaml::from_reader::<_, Config>(f.into_std().await)?;

        Ok(Self { config })
    }

    pub fn set_root_dir(&mut self, root_dir: impl Into<PathBuf>) {
        self.config.peer.set_root_dir(&mut Some(root_dir.into()));
    }

    // Command line flags take precedence over the file.
    pub fn override_peer_config(&mut self, mut flags: core::Config) {
        self.config.peer.override_merge(&mut flags);
    }

    pub fn ledger_path(&self) -> Result<PathBuf> {
        self.config.peer.ledger_path()
    }

    // Create the directory layout the ledger file lives in.
    pub async fn init_dir(&self) -> Result<()> {
        let ledger = self.ledger_path()?;
        if let Some(dir) = ledger.parent() {
            debug!("Create dir {}", dir.display());
            fs::create_dir_all(dir).await?;
        }
        Ok(())
    }

    /// Open the ledger, instantiate `chaincode` if needed and start the peer.
    /// The peer stops once the returned client and its clones are dropped.
    pub async fn launch<C>(self, chaincode: C) -> Result<(LocalClient, JoinHandle<()>)>
    where
        C: Chaincode + 'static,
    {
        let peer = Builder::from_config(self.config.peer, chaincode)
            .build()
            .await?;
        let client = LocalClient::new(peer.request_channel());

        let handle = tokio::spawn(peer.run());

        Ok((client, handle))
    }
}
