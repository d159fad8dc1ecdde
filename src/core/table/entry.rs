use chrono::{TimeZone, Utc};
use tokio::io::{AsyncReadExt, AsyncWriteExt};

use crate::common::{ErrorKind, Result, Time};
use crate::core::table::EntryDump;
use crate::shim::{Key, KeyValue, Value, MAX_KEY_BYTES, MAX_VALUE_BYTES};

// Entry represent one committed write in the ledger file.
#[derive(PartialEq, Debug)]
pub(super) struct Entry {
    header: Header,
    body: Body,
}

#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
    Invalid = 0,
    Active = 1,
    // Closes a batch. Value holds the number of entries in the batch.
    BatchEnd = 2,
}

// store mata value for entry.
#[derive(PartialEq, Debug)]
struct Header {
    // key length.
    key_bytes: usize,
    // value length.
    value_bytes: usize,
    // entry crated timestamp.
    // milliseconds since January 1,1970 UTC
    timestamp_ms: i64,
    state: State,
    // check data integrity.
    crc_checksum: u32,
}

// actual data written by chaincode.
#[derive(PartialEq, Debug)]
struct Body {
    key: String,
    value: Box<[u8]>,
}

impl From<KeyValue> for Entry {
    fn from(kv: KeyValue) -> Self {
        Entry::new(kv.key, kv.value)
    }
}

impl Entry {
    pub(super) const HEADER_BYTES: usize = 8 // key_bytes
        + 8 // value_bytes
        + 8 // timestamp_ms
        + 1 // state
        + 4 // crc_checksum
    ;

    pub(super) fn new(key: Key, value: Value) -> Self {
        let header = Header {
            key_bytes: key.len(),
            value_bytes: value.len(),
            timestamp_ms: Utc::now().timestamp_millis(),
            state: State::Active,
            crc_checksum: 0,
        };

        let body = Body {
            key: key.into_string(),
            value: value.into_boxed_bytes(),
        };

        let mut entry = Self { header, body };
        entry.header.crc_checksum = entry.calc_crc_checksum();

        entry
    }

    // Marker written after the entries of one commit.
    // Entries not followed by a matching marker were never committed.
    pub(super) fn batch_end(entries: usize) -> Self {
        let value: Box<[u8]> = Box::new((entries as u64).to_be_bytes());
        let header = Header {
            key_bytes: 0,
            value_bytes: value.len(),
            timestamp_ms: Utc::now().timestamp_millis(),
            state: State::BatchEnd,
            crc_checksum: 0,
        };
        let body = Body {
            key: String::new(),
            value,
        };

        let mut entry = Self { header, body };
        entry.header.crc_checksum = entry.calc_crc_checksum();

        entry
    }

    // Write binary expression to writer.
    // return written bytes.
    // flush is left to the caller.
    pub(super) async fn encode_to<W: AsyncWriteExt + Unpin>(&self, mut writer: W) -> Result<usize> {
        debug_assert!(self.is_consistent());

        let mut n: usize = Entry::HEADER_BYTES;
        // Header
        writer.write_u64(self.header.key_bytes as u64).await?;
        writer.write_u64(self.header.value_bytes as u64).await?;
        writer.write_i64(self.header.timestamp_ms).await?;
        writer.write_u8(self.header.state as u8).await?;
        writer.write_u32(self.header.crc_checksum).await?;

        // Body
        writer.write_all(self.body.key.as_bytes()).await?;
        writer.write_all(&self.body.value).await?;
        n += self.body.len();

        Ok(n)
    }

    // Construct Entry from reader.
    // A truncated entry is reported as UnexpectedEof.
    pub(super) async fn decode_from<R: AsyncReadExt + Unpin>(
        mut reader: R,
    ) -> Result<(usize, Self)> {
        // calling order is important.
        // We can't like this for eval_order_dependence(https://rust-lang.github.io/rust-clippy/master/index.html#eval_order_dependence)
        // Header {
        //   key_bytes: reader.read_u64().await        <-- second
        //   value_bytes: reader.read_u64().await      <-- first
        // }
        let key_bytes = reader.read_u64().await? as usize;
        let value_bytes = reader.read_u64().await? as usize;
        let timestamp_ms = reader.read_i64().await?;
        let state = State::from(reader.read_u8().await?);
        let crc_checksum = reader.read_u32().await?;

        if key_bytes > MAX_KEY_BYTES || value_bytes > MAX_VALUE_BYTES {
            return Err(ErrorKind::EntryDecode {
                description: format!(
                    "entry length out of range. key_bytes: {} value_bytes: {}",
                    key_bytes, value_bytes
                ),
            }
            .into());
        }

        let header = Header {
            key_bytes,
            value_bytes,
            timestamp_ms,
            state,
            crc_checksum,
        };

        let mut buf = Vec::with_capacity(header.body_len());
        reader
            .take(header.body_len() as u64)
            .read_to_end(buf.as_mut())
            .await?;
        if buf.len() < header.body_len() {
            return Err(std::io::Error::from(std::io::ErrorKind::UnexpectedEof).into());
        }

        let value = buf.split_off(header.key_bytes);
        let key = String::from_utf8(buf).map_err(|e| ErrorKind::EntryDecode {
            description: e.to_string(),
        })?;

        let entry = Self {
            header,
            body: Body {
                key,
                value: value.into_boxed_slice(),
            },
        };

        Ok((entry.encoded_len(), entry))
    }

    pub(super) fn is_active(&self) -> bool {
        self.header.state == State::Active
    }

    pub(super) fn is_batch_end(&self) -> bool {
        self.header.state == State::BatchEnd
    }

    // Entry count carried by a batch end marker.
    pub(super) fn batch_entries(&self) -> Option<usize> {
        if !self.is_batch_end() {
            return None;
        }
        let bytes: [u8; 8] = self.body.value[..].try_into().ok()?;
        Some(u64::from_be_bytes(bytes) as usize)
    }

    pub(super) fn verify_checksum(&self) -> bool {
        self.header.crc_checksum == self.calc_crc_checksum()
    }

    pub(super) fn key(&self) -> &str {
        &self.body.key
    }

    pub(super) fn take_key(self) -> String {
        self.body.key
    }

    pub(super) fn into_key_value(self) -> KeyValue {
        KeyValue {
            key: Key::new_unchecked(self.body.key),
            value: Value::new_unchecked(self.body.value),
        }
    }

    pub(super) fn into_dump(self, offset: usize) -> EntryDump {
        let checksum_ok = self.verify_checksum();
        let time: Time = Utc
            .timestamp_millis_opt(self.header.timestamp_ms)
            .single()
            .unwrap_or_default();
        EntryDump {
            offset,
            time,
            is_active: self.is_active(),
            batch_entries: self.batch_entries(),
            checksum_ok,
            key: self.body.key,
            value: self.body.value.into_vec(),
        }
    }

    fn calc_crc_checksum(&self) -> u32 {
        let mut h = crc32fast::Hasher::new();
        h.update(
            [
                (self.header.key_bytes as u64).to_be_bytes(),
                (self.header.value_bytes as u64).to_be_bytes(),
                self.header.timestamp_ms.to_be_bytes(),
            ]
            .concat()
            .as_ref(),
        );

        h.update((self.header.state as u8).to_be_bytes().as_ref());
        h.update(self.body.key.as_bytes());
        h.update(&self.body.value);
        h.finalize()
    }

    // Assert entry data consistency.
    fn is_consistent(&self) -> bool {
        self.header.key_bytes == self.body.key.len()
            && self.header.value_bytes == self.body.value.len()
            && self.verify_checksum()
    }

    // Return assuming encoded bytes length.
    pub(super) fn encoded_len(&self) -> usize {
        Entry::HEADER_BYTES + self.body.len()
    }
}

impl From<u8> for State {
    fn from(n: u8) -> Self {
        match n {
            1 => State::Active,
            2 => State::BatchEnd,
            _ => State::Invalid,
        }
    }
}

impl Header {
    fn body_len(&self) -> usize {
        self.key_bytes + self.value_bytes
    }
}

impl Body {
    fn len(&self) -> usize {
        self.key.len() + self.value.len()
    }
}
