use std::path::PathBuf;

use clap::Args;
use serde_json::json;
use tokio::fs;
use tokio::io::BufReader;

use crate::core::{dump_entries, EntryDump, UndecodableTail};
use crate::Result;

/// Dump ledger file
#[derive(Args, Debug)]
pub struct DumpCommand {
    /// Path to ledger file
    #[arg()]
    path: PathBuf,
}

impl DumpCommand {
    pub async fn run(self) -> Result<()> {
        let output = self.collect().await?;

        let stdout = std::io::stdout();
        serde_json::to_writer_pretty(stdout.lock(), &output)?;
        println!();

        Ok(())
    }

    // Read only, the ledger is left exactly as found.
    async fn collect(self) -> Result<serde_json::Value> {
        let DumpCommand { path } = self;

        tracing::debug!("Dump {}", path.display());

        let file = fs::File::open(&path).await?;
        let len = file.metadata().await?.len();

        let mut entries = Vec::new();
        let tail = dump_entries(BufReader::new(file), |entry| entries.push(dump(entry))).await?;

        Ok(json!({
            "entries": entries,
            "undecodable_tail": tail.map(|tail| undecodable(tail, len)),
        }))
    }
}

fn dump(entry: EntryDump) -> serde_json::Value {
    if let Some(batch_entries) = entry.batch_entries {
        return json!({
            "offset": entry.offset,
            "time": entry.time.to_rfc3339(),
            "checksum_ok": entry.checksum_ok,
            "batch_entries": batch_entries,
        });
    }

    let value = String::from_utf8_lossy(&entry.value);

    json!({
        "offset": entry.offset,
        "time": entry.time.to_rfc3339(),
        "is_active": entry.is_active,
        "checksum_ok": entry.checksum_ok,
        "key": entry.key,
        "value": value,
    })
}

fn undecodable(tail: UndecodableTail, len: u64) -> serde_json::Value {
    json!({
        "offset": tail.offset,
        "bytes": len.saturating_sub(tail.offset as u64),
        "reason": tail.reason,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Table;
    use crate::shim::{Key, Value};
    use std::collections::BTreeMap;

    #[test]
    fn dump_leaves_ledger_untouched() {
        tokio_test::block_on(async move {
            let dir = tempfile::Builder::new()
                .prefix("ticketcc-dump")
                .tempdir()
                .unwrap();
            let path = dir.path().join("mycc.ledger");

            let mut table = Table::from_path(&path).await.unwrap();
            let mut writes = BTreeMap::new();
            writes.insert(Key::new("TICKET1").unwrap(), Value::new(b"{}".as_ref()).unwrap());
            table.commit(writes).await.unwrap();
            drop(table);

            let mut bytes = std::fs::read(&path).unwrap();
            let complete = bytes.len();
            bytes.extend_from_slice(&[0xff; 5]);
            std::fs::write(&path, &bytes).unwrap();

            let output = DumpCommand { path: path.clone() }.collect().await.unwrap();

            assert_eq!(std::fs::read(&path).unwrap(), bytes);
            let entries = output["entries"].as_array().unwrap();
            assert_eq!(entries.len(), 2);
            assert_eq!(entries[0]["key"], "TICKET1");
            assert_eq!(entries[1]["batch_entries"], 1);
            assert_eq!(output["undecodable_tail"]["offset"], complete);
            assert_eq!(output["undecodable_tail"]["bytes"], 5);
        })
    }

    #[test]
    fn missing_file_is_an_error() {
        tokio_test::block_on(async move {
            let dir = tempfile::tempdir().unwrap();
            let path = dir.path().join("absent.ledger");

            assert!(DumpCommand { path: path.clone() }.collect().await.is_err());
            assert!(!path.exists());
        })
    }
}
