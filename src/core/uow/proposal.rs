use std::fmt;

use crate::shim::new_tx_id;

/// A single chaincode call submitted to the peer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Proposal {
    pub tx_id: String,
    // First element names the function.
    pub args: Vec<String>,
}

impl Proposal {
    pub fn new<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tx_id: new_tx_id(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    pub fn function(&self) -> &str {
        self.args.first().map(String::as_str).unwrap_or_default()
    }
}

impl fmt::Display for Proposal {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{function} {params:?}",
            function = self.function(),
            params = self.args.get(1..).unwrap_or_default(),
        )
    }
}
