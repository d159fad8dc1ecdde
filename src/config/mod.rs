mod initialize;
pub use initialize::Initializer;

mod config;
pub use config::Config;

pub(crate) mod filepath {
    pub const CHANNELS: &str = "channels";
    pub const LEDGER_EXTENSION: &str = "ledger";
}

pub mod env {
    pub const LOG_DIRECTIVE: &str = "TICKETCC_LOG";
}
