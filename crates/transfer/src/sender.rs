use photolink_protocol::{Dictionary, MessageKeys};

use crate::{DEFAULT_CHUNK_SIZE, MAX_TRANSFER_SIZE, TransferError};

/// Splits a payload into messages a [`Reassembler`](crate::Reassembler) can
/// rebuild.
///
/// Every message carries the id, the total size, the offset and the chunk
/// bytes, so the first one doubles as the size announcement.
pub struct ChunkSplitter<'a> {
    id: u32,
    data: &'a [u8],
    chunk_size: usize,
    offset: usize,
    keys: MessageKeys,
    finished: bool,
}

impl<'a> ChunkSplitter<'a> {
    /// Prepares `data` for sending under transfer id `id`.
    ///
    /// If `chunk_size` is 0, [`DEFAULT_CHUNK_SIZE`] is used.
    pub fn new(
        id: u32,
        data: &'a [u8],
        chunk_size: usize,
        keys: MessageKeys,
    ) -> Result<Self, TransferError> {
        if data.len() > MAX_TRANSFER_SIZE {
            return Err(TransferError::TooLarge { size: data.len() });
        }
        let chunk_size = if chunk_size == 0 {
            DEFAULT_CHUNK_SIZE
        } else {
            chunk_size
        };
        Ok(Self {
            id,
            data,
            chunk_size,
            offset: 0,
            keys,
            finished: false,
        })
    }

    /// Builds the next message. Returns `None` once every byte was emitted.
    ///
    /// An empty payload still yields one message so the receiver completes.
    pub fn next_message(&mut self) -> Option<Dictionary> {
        if self.finished {
            return None;
        }

        let end = std::cmp::min(self.offset + self.chunk_size, self.data.len());
        // Both bounds were checked against MAX_TRANSFER_SIZE in `new`.
        let message = Dictionary::new()
            .with_uint(self.keys.id, self.id)
            .with_bytes(self.keys.bytes, &self.data[self.offset..end])
            .with_uint(self.keys.size, self.data.len() as u32)
            .with_uint(self.keys.offset, self.offset as u32);

        tracing::trace!(
            id = self.id,
            from = self.offset,
            to = end,
            total = self.data.len(),
            "built chunk message"
        );

        self.offset = end;
        if end == self.data.len() {
            self.finished = true;
        }
        Some(message)
    }

    /// Offset of the next chunk.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Total payload size in bytes.
    pub fn total_size(&self) -> usize {
        self.data.len()
    }

    /// Bytes not yet emitted.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.offset
    }
}

impl Iterator for ChunkSplitter<'_> {
    type Item = Dictionary;

    fn next(&mut self) -> Option<Dictionary> {
        self.next_message()
    }
}

/// Splits `data` into the full list of messages for one transfer.
pub fn split_into_messages(
    id: u32,
    data: &[u8],
    chunk_size: usize,
    keys: MessageKeys,
) -> Result<Vec<Dictionary>, TransferError> {
    Ok(ChunkSplitter::new(id, data, chunk_size, keys)?.collect())
}
