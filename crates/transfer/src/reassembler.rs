use photolink_protocol::{Dictionary, MessageKeys, Value};

use crate::ReceiveError;
use crate::types::{ReceivedFile, ReceiverState, TransferEvent};

/// An in-flight transfer. Only exists while downloading, so the buffer
/// cannot outlive the transfer it belongs to.
#[derive(Debug)]
struct Download {
    id: u32,
    size: u16,
    offset: u16,
    buffer: Vec<u8>,
}

#[derive(Debug)]
enum Session {
    AwaitingSize,
    Downloading(Download),
    Faulted,
}

/// Rebuilds one file from a sequence of chunk messages.
///
/// The first message of a transfer must carry the total size; later
/// messages carry payload bytes and, optionally, the offset they were
/// written at. Messages are processed synchronously, one at a time.
#[derive(Debug)]
pub struct Reassembler {
    keys: MessageKeys,
    session: Session,
}

impl Reassembler {
    /// Creates an idle reassembler reading fields from the given keys.
    pub fn new(keys: MessageKeys) -> Self {
        Self {
            keys,
            session: Session::AwaitingSize,
        }
    }

    /// Dictionary keys this reassembler reads fields from.
    pub fn keys(&self) -> &MessageKeys {
        &self.keys
    }

    /// Current phase of the session.
    pub fn state(&self) -> ReceiverState {
        match self.session {
            Session::AwaitingSize => ReceiverState::AwaitingSize,
            Session::Downloading(_) => ReceiverState::Downloading,
            Session::Faulted => ReceiverState::Faulted,
        }
    }

    /// Identifier of the active transfer, if any.
    pub fn transfer_id(&self) -> Option<u32> {
        match &self.session {
            Session::Downloading(d) => Some(d.id),
            _ => None,
        }
    }

    /// Declared size of the active transfer (0 when idle or faulted).
    pub fn declared_size(&self) -> u16 {
        match &self.session {
            Session::Downloading(d) => d.size,
            _ => 0,
        }
    }

    /// Bytes written so far in the active transfer (0 when idle or faulted).
    pub fn write_offset(&self) -> u16 {
        match &self.session {
            Session::Downloading(d) => d.offset,
            _ => 0,
        }
    }

    /// Drops any partial transfer and waits for a new size announcement.
    ///
    /// This is also the only way out of [`ReceiverState::Faulted`].
    pub fn reset(&mut self) {
        if let Session::Downloading(d) = &self.session {
            tracing::debug!(
                id = d.id,
                received = d.offset,
                total = d.size,
                "discarding partial transfer"
            );
        }
        self.session = Session::AwaitingSize;
    }

    /// Processes one inbound message.
    ///
    /// Returns `None` when the message produces no notification: a size
    /// announcement without payload, a chunk for a stale transfer id, or
    /// any message while faulted.
    pub fn handle(&mut self, message: &Dictionary) -> Option<TransferEvent> {
        if matches!(self.session, Session::Faulted) {
            return None;
        }

        match self.step(message) {
            Ok(event) => event,
            Err(err) => {
                tracing::warn!(code = err.code(), error = %err, "transfer aborted");
                self.session = Session::Faulted;
                Some(TransferEvent::Failed(err))
            }
        }
    }

    fn step(&mut self, message: &Dictionary) -> Result<Option<TransferEvent>, ReceiveError> {
        let keys = self.keys;
        let id = read_id(message, keys.id).ok_or(ReceiveError::InvalidId)?;

        match self.session {
            Session::AwaitingSize => {
                let size = read_size(message, keys.size)?;
                let buffer = allocate(size)?;
                tracing::debug!(id, size, "transfer started");
                self.session = Session::Downloading(Download {
                    id,
                    size,
                    offset: 0,
                    buffer,
                });
            }
            Session::Downloading(ref mut download) => {
                if id != download.id {
                    tracing::debug!(id, active = download.id, "dropping chunk for stale transfer");
                    return Ok(None);
                }
                // The offset is a consistency check only; chunks never seek.
                if let Some(offset) = message.get(keys.offset).and_then(Value::as_uint) {
                    if offset != u32::from(download.offset) {
                        return Err(ReceiveError::InvalidOffset);
                    }
                }
            }
            Session::Faulted => return Ok(None),
        }

        let Some(bytes) = message.get(keys.bytes).and_then(Value::as_bytes) else {
            return Ok(None);
        };
        let Session::Downloading(download) = &mut self.session else {
            return Ok(None);
        };

        let start = usize::from(download.offset);
        let end = start + bytes.len();
        if end > usize::from(download.size) {
            return Err(ReceiveError::InvalidOffset);
        }
        download.buffer[start..end].copy_from_slice(bytes);
        // end <= size, which is a u16.
        download.offset = end as u16;

        if download.offset == download.size {
            let id = download.id;
            let data = std::mem::take(&mut download.buffer);
            self.session = Session::AwaitingSize;
            tracing::debug!(id, size = data.len(), "transfer completed");
            return Ok(Some(TransferEvent::Completed(ReceivedFile { id, data })));
        }

        Ok(Some(TransferEvent::Progress {
            id: download.id,
            received: download.offset,
            total: download.size,
        }))
    }
}

fn read_id(message: &Dictionary, key: u32) -> Option<u32> {
    let value = message.get(key)?;
    value.as_uint().or_else(|| value.as_int().map(|v| v as u32))
}

fn read_size(message: &Dictionary, key: u32) -> Result<u16, ReceiveError> {
    let raw = message
        .get(key)
        .and_then(Value::as_uint)
        .ok_or(ReceiveError::InvalidState)?;
    u16::try_from(raw).map_err(|_| ReceiveError::InvalidSize)
}

fn allocate(size: u16) -> Result<Vec<u8>, ReceiveError> {
    let len = usize::from(size);
    let mut buffer = Vec::new();
    buffer
        .try_reserve_exact(len)
        .map_err(|_| ReceiveError::AllocationFailure)?;
    buffer.resize(len, 0);
    Ok(buffer)
}
