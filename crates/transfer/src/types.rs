use crate::ReceiveError;

/// Observable phase of a [`Reassembler`](crate::Reassembler).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReceiverState {
    /// Idle; the next message must announce the file size.
    AwaitingSize,
    /// A transfer is in flight and a buffer is allocated.
    Downloading,
    /// A protocol fault occurred. Only `reset` leaves this state.
    Faulted,
}

/// A fully received file.
///
/// The bytes belong to the holder; the receiver keeps no reference to them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceivedFile {
    /// Transfer identifier announced by the sender.
    pub id: u32,
    /// The reassembled bytes, exactly the declared size.
    pub data: Vec<u8>,
}

impl ReceivedFile {
    /// Total size in bytes.
    pub fn total(&self) -> usize {
        self.data.len()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }
}

/// Outcome of feeding one message to the receiver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransferEvent {
    /// Payload accepted; more bytes are expected.
    Progress { id: u32, received: u16, total: u16 },
    /// The last byte arrived. The receiver is idle again.
    Completed(ReceivedFile),
    /// The transfer was aborted and the receiver is now faulted.
    Failed(ReceiveError),
}
