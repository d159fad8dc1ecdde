use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::common::{Result, Time};
use crate::core::table::entry::Entry;

/// One ledger file entry as found on disk.
#[derive(Debug)]
pub struct EntryDump {
    pub offset: usize,
    pub time: Time,
    pub is_active: bool,
    /// Set on the marker closing a commit, holds the entry count of that commit.
    pub batch_entries: Option<usize>,
    pub checksum_ok: bool,
    pub key: String,
    pub value: Vec<u8>,
}

/// Bytes at the end of a ledger file that do not form a whole entry.
#[derive(Debug, PartialEq, Eq)]
pub struct UndecodableTail {
    pub offset: usize,
    pub reason: String,
}

/// Visit every entry of a ledger file in file order, superseded and uncommitted ones included.
/// Only reads. Decoding stops at the first entry that can not be read, which is returned.
pub async fn dump_entries<R, F>(mut reader: R, mut f: F) -> Result<Option<UndecodableTail>>
where
    R: AsyncBufRead + Unpin,
    F: FnMut(EntryDump),
{
    let mut pos: usize = 0;
    loop {
        if reader.fill_buf().await?.is_empty() {
            return Ok(None);
        }

        match Entry::decode_from(&mut reader).await {
            Ok((n, entry)) => {
                f(entry.into_dump(pos));
                pos += n;
            }
            Err(err) => {
                return Ok(Some(UndecodableTail {
                    offset: pos,
                    reason: err.to_string(),
                }))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    use crate::shim::KeyValue;

    async fn encoded(kvs: &[(&str, &str)]) -> Vec<u8> {
        let mut buf = Cursor::new(Vec::new());
        for kv in kvs {
            Entry::from(KeyValue::try_from(*kv).unwrap())
                .encode_to(&mut buf)
                .await
                .unwrap();
        }
        Entry::batch_end(kvs.len()).encode_to(&mut buf).await.unwrap();
        buf.into_inner()
    }

    #[test]
    fn dump_every_entry() {
        tokio_test::block_on(async move {
            let mut bytes = encoded(&[("k1", "v1"), ("k2", "v2")]).await;
            bytes.extend(encoded(&[("k1", "v1-2")]).await);

            let mut dumped = Vec::new();
            let tail = dump_entries(Cursor::new(bytes), |e| dumped.push(e))
                .await
                .unwrap();
            assert_eq!(tail, None);

            assert_eq!(dumped.len(), 5);
            assert!(dumped.iter().all(|e| e.checksum_ok));
            let batches: Vec<Option<usize>> = dumped.iter().map(|e| e.batch_entries).collect();
            assert_eq!(batches, vec![None, None, Some(2), None, Some(1)]);
            assert_eq!(dumped[3].key, "k1");
            assert_eq!(dumped[3].value, b"v1-2");
        })
    }

    #[test]
    fn garbage_tail_is_reported() {
        tokio_test::block_on(async move {
            let mut bytes = encoded(&[("k1", "v1")]).await;
            let complete = bytes.len();
            bytes.extend_from_slice(&[0xff; 5]);

            let mut dumped = Vec::new();
            let tail = dump_entries(Cursor::new(bytes), |e| dumped.push(e))
                .await
                .unwrap()
                .unwrap();

            assert_eq!(dumped.len(), 2);
            assert_eq!(tail.offset, complete);
        })
    }

    #[test]
    fn broken_header_still_dumps_preceding_entries() {
        tokio_test::block_on(async move {
            let mut bytes = encoded(&[("k1", "v1")]).await;
            let complete = bytes.len();
            // key_bytes far past the key limit.
            bytes.extend_from_slice(&[0xff; 40]);

            let mut dumped = Vec::new();
            let tail = dump_entries(Cursor::new(bytes), |e| dumped.push(e))
                .await
                .unwrap()
                .unwrap();

            assert_eq!(dumped.len(), 2);
            assert_eq!(tail.offset, complete);
            assert!(tail.reason.contains("out of range"), "{}", tail.reason);
        })
    }
}
