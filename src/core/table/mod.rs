mod entry;
mod index;

mod table;
pub(crate) use self::table::Table;

mod dump;
pub use self::dump::{dump_entries, EntryDump, UndecodableTail};
