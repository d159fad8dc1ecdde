mod peer;
pub(crate) use self::peer::Builder;

mod config;
pub use self::config::Config;

mod table;
pub(crate) use self::table::Table;
pub use self::table::{dump_entries, EntryDump, UndecodableTail};

mod stub;

pub(crate) mod uow;
pub(crate) use self::uow::UnitOfWork;
pub use self::uow::Proposal;

mod middleware;
