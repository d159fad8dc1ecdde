use std::collections::BTreeMap;

use tokio::io::AsyncReadExt;

use crate::common::{warn, ErrorKind, Result};
use crate::core::table::entry::Entry;
use crate::shim::key_range;

#[derive(Debug)]
pub(super) struct Index {
    // key to file offset mapping, ordered for range scans.
    entry_offsets: BTreeMap<String, usize>,
    // offset just past the last complete batch.
    end: usize,
}

// Entries read since the last batch end marker.
struct PendingBatch {
    start: usize,
    entries: usize,
    offsets: Vec<(String, usize)>,
}

impl Index {
    pub(super) async fn from_reader<R: AsyncReadExt + Unpin>(mut reader: R) -> Result<Self> {
        let mut index = Index::new(BTreeMap::new(), 0);
        let mut batch = PendingBatch::new(0);
        let mut pos: usize = 0;
        loop {
            match Entry::decode_from(&mut reader).await {
                Ok((n, entry)) if entry.is_batch_end() => {
                    if !entry.verify_checksum() || entry.batch_entries() != Some(batch.entries) {
                        return Err(ErrorKind::EntryDecode {
                            description: format!(
                                "batch end at offset {} does not close {} entries",
                                pos, batch.entries
                            ),
                        }
                        .into());
                    }
                    pos += n;
                    index.commit_batch(batch.offsets, pos);
                    batch = PendingBatch::new(pos);
                }
                Ok((n, entry)) => {
                    batch.entries += 1;
                    if entry.is_active() {
                        batch.offsets.push((entry.take_key(), pos));
                    } else {
                        warn!(offset = pos, "Skip inactive entry");
                    }
                    pos += n;
                }
                Err(err) if err.is_eof() => {
                    if batch.entries > 0 {
                        warn!(
                            offset = batch.start,
                            entries = batch.entries,
                            "Drop batch without batch end"
                        );
                    }
                    return Ok(index);
                }
                Err(err) => {
                    return Err(err);
                }
            }
        }
    }

    // Make a written batch visible. `end` is the offset just past its batch end marker.
    pub(super) fn commit_batch(&mut self, offsets: Vec<(String, usize)>, end: usize) {
        self.entry_offsets.extend(offsets);
        self.end = end;
    }

    pub(super) fn lookup_offset(&self, key: &str) -> Option<usize> {
        self.entry_offsets.get(key).cloned()
    }

    pub(super) fn range_offsets(&self, start_key: &str, end_key: &str) -> Vec<(String, usize)> {
        match key_range(start_key, end_key) {
            Some(range) => self
                .entry_offsets
                .range::<str, _>(range)
                .map(|(key, offset)| (key.clone(), *offset))
                .collect(),
            None => Vec::new(),
        }
    }

    pub(super) fn end(&self) -> usize {
        self.end
    }

    pub(super) fn len(&self) -> usize {
        self.entry_offsets.len()
    }

    fn new(entry_offsets: BTreeMap<String, usize>, end: usize) -> Self {
        Self { entry_offsets, end }
    }
}

impl PendingBatch {
    fn new(start: usize) -> Self {
        Self {
            start,
            entries: 0,
            offsets: Vec::new(),
        }
    }
}
