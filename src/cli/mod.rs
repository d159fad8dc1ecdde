mod root;
pub use self::root::{launch, parse, Command, PeerOptions, TicketccCommand};

pub mod dump;
pub mod invoke;
