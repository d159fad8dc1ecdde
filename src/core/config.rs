use std::path::PathBuf;

use serde::Deserialize;

use crate::common::{ErrorKind, Result};
use crate::config::filepath;

// Local peer configuration.
#[derive(Debug, Deserialize, Default, Clone)]
pub struct Config {
    // Directory where ledger files are kept.
    pub(crate) root_dir: Option<PathBuf>,
    // Channel the chaincode is instantiated on.
    channel: Option<String>,
    // Chaincode name, used as the ledger file name.
    chaincode: Option<String>,
    // Buffer size of the proposal queue.
    request_channel_buffer: Option<usize>,
}

impl Config {
    const DEFAULT_CHANNEL: &'static str = "mychannel";
    const DEFAULT_CHAINCODE: &'static str = "ticketcc";
    const DEFAULT_REQUEST_CHANNEL_BUFFER: usize = 1024;

    pub fn set_root_dir(&mut self, val: &mut Option<PathBuf>) {
        if let Some(val) = val.take() {
            self.root_dir = Some(val)
        }
    }
    pub fn set_channel(&mut self, val: &mut Option<String>) {
        if let Some(val) = val.take() {
            self.channel = Some(val)
        }
    }
    pub fn set_chaincode(&mut self, val: &mut Option<String>) {
        if let Some(val) = val.take() {
            self.chaincode = Some(val)
        }
    }
    pub fn set_request_channel_buffer(&mut self, val: Option<usize>) {
        if let Some(val) = val {
            self.request_channel_buffer = Some(std::cmp::max(val, 1));
        }
    }
    pub(crate) fn override_merge(&mut self, other: &mut Config) {
        self.set_root_dir(&mut other.root_dir);
        self.set_channel(&mut other.channel);
        self.set_chaincode(&mut other.chaincode);
        self.set_request_channel_buffer(other.request_channel_buffer);
    }

    pub(crate) fn channel(&self) -> &str {
        self.channel.as_deref().unwrap_or(Config::DEFAULT_CHANNEL)
    }

    pub(crate) fn chaincode(&self) -> &str {
        self.chaincode
            .as_deref()
            .unwrap_or(Config::DEFAULT_CHAINCODE)
    }

    pub(crate) fn request_channel_buffer(&self) -> usize {
        self.request_channel_buffer
            .unwrap_or(Config::DEFAULT_REQUEST_CHANNEL_BUFFER)
    }

    // <root_dir>/channels/<channel>/<chaincode>.ledger
    pub(crate) fn ledger_path(&self) -> Result<PathBuf> {
        let root_dir = self
            .root_dir
            .as_ref()
            .ok_or_else(|| ErrorKind::Internal("root_dir not configured".to_owned()))?;

        Ok(root_dir
            .join(filepath::CHANNELS)
            .join(self.channel())
            .join(format!("{}.{}", self.chaincode(), filepath::LEDGER_EXTENSION)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn override_keeps_unset_fields() {
        let mut base: Config =
            serde_yaml::from_str("channel: ticketing\nrequest_channel_buffer: 16\n").unwrap();
        let mut flags = Config::default();
        flags.set_chaincode(&mut Some("tickets".to_owned()));
        flags.set_request_channel_buffer(Some(0));

        base.override_merge(&mut flags);

        assert_eq!(base.channel(), "ticketing");
        assert_eq!(base.chaincode(), "tickets");
        assert_eq!(base.request_channel_buffer(), 1);
        assert!(base.root_dir.is_none());
    }

    #[test]
    fn defaults() {
        let config = Config::default();
        assert_eq!(config.channel(), "mychannel");
        assert_eq!(config.chaincode(), "ticketcc");
        assert_eq!(config.request_channel_buffer(), 1024);
        assert!(config.ledger_path().is_err());
    }

    #[test]
    fn ledger_path_layout() {
        let mut config = Config::default();
        config.set_root_dir(&mut Some(PathBuf::from("/var/ticketcc")));
        assert_eq!(
            config.ledger_path().unwrap(),
            PathBuf::from("/var/ticketcc/channels/mychannel/ticketcc.ledger")
        );
    }
}
