use std::collections::BTreeMap;
use std::path::Path;

use tokio::fs;
use tokio::io::{AsyncRead, AsyncSeek, AsyncSeekExt, AsyncWrite, AsyncWriteExt, BufReader, SeekFrom};

use crate::common::{debug, info, trace, warn, ErrorKind, Result};
use crate::core::table::entry::Entry;
use crate::core::table::index::Index;
use crate::shim::{Key, KeyValue, Value};

// Append only ledger file. Latest entry for a key is the committed state.
pub(crate) struct Table<File = fs::File> {
    file: File,
    index: Index,
}

impl Table<fs::File> {
    pub(crate) async fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let f = fs::OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .open(path.as_ref())
            .await?;

        let table = Table::new(f).await?;

        // Drop a partially written batch so that appends start on a batch boundary.
        let len = table.file.metadata().await?.len();
        let end = table.index.end() as u64;
        if len > end {
            warn!(path=%path.as_ref().display(), len, end, "Truncate incomplete ledger tail");
            table.file.set_len(end).await?;
        }

        Ok(table)
    }
}

impl<File> Table<File>
where
    File: AsyncWrite + AsyncRead + AsyncSeek + Unpin + Send,
{
    pub(crate) async fn new(mut file: File) -> Result<Self> {
        file.seek(SeekFrom::Start(0)).await?;

        let index = Index::from_reader(BufReader::new(&mut file)).await?;
        info!(keys = index.len(), end = index.end(), "Ledger index loaded");

        Ok(Self { file, index })
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.index.len() == 0
    }

    pub(crate) fn len(&self) -> usize {
        self.index.len()
    }

    pub(crate) async fn get(&mut self, key: &str) -> Result<Option<Value>> {
        let offset = match self.index.lookup_offset(key) {
            Some(offset) => offset,
            None => return Ok(None),
        };

        let entry = self.read_entry(offset).await?;
        debug_assert_eq!(entry.key(), key);

        Ok(Some(entry.into_key_value().value))
    }

    // Every key in range is read independently, a broken entry only fails its own slot.
    pub(crate) async fn range(
        &mut self,
        start_key: &str,
        end_key: &str,
    ) -> Result<Vec<Result<KeyValue>>> {
        let offsets = self.index.range_offsets(start_key, end_key);
        trace!(start_key, end_key, hits = offsets.len(), "Range");

        let mut results = Vec::with_capacity(offsets.len());
        for (_, offset) in offsets {
            results.push(self.read_entry(offset).await.map(Entry::into_key_value));
        }

        Ok(results)
    }

    // Append the write set as one batch and make it visible to subsequent reads.
    // The batch counts only once its batch end marker is on disk.
    pub(crate) async fn commit(&mut self, writes: BTreeMap<Key, Value>) -> Result<usize> {
        let count = writes.len();
        if count == 0 {
            return Ok(0);
        }

        let mut offset = self.index.end();
        self.file.seek(SeekFrom::Start(offset as u64)).await?;

        let mut appended = Vec::with_capacity(count);
        for (key, value) in writes {
            let entry = Entry::new(key, value);
            let n = entry.encode_to(&mut self.file).await?;
            trace!(key = entry.key(), offset, "Append");
            appended.push((entry.take_key(), offset));
            offset += n;
        }
        offset += Entry::batch_end(count).encode_to(&mut self.file).await?;
        self.file.flush().await?;

        self.index.commit_batch(appended, offset);
        debug!(count, end = self.index.end(), "Committed");

        Ok(count)
    }

    async fn read_entry(&mut self, offset: usize) -> Result<Entry> {
        self.file.seek(SeekFrom::Start(offset as u64)).await?;
        let (_, entry) = Entry::decode_from(&mut self.file).await?;

        if !entry.verify_checksum() {
            return Err(ErrorKind::EntryCorrupted {
                key: entry.take_key(),
                offset,
            }
            .into());
        }

        Ok(entry)
    }
}

#[cfg(test)]
impl<File> Table<File> {
    pub(crate) fn into_file(self) -> File {
        self.file
    }
}
