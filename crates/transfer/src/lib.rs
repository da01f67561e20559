//! Chunked single-file transfer over small key/value messages.
//!
//! The receiving side is a [`Reassembler`]: a passive state machine that is
//! fed one message at a time and rebuilds the file in memory. [`FileReceiver`]
//! wraps it with callbacks. The sending side is [`ChunkSplitter`].

mod reassembler;
mod receiver;
mod sender;
mod types;

pub use reassembler::Reassembler;
pub use receiver::{
    ErrorCallback, FileReceivedCallback, FileReceiver, ProgressCallback, ReceiverCallbacks,
};
pub use sender::{ChunkSplitter, split_into_messages};
pub use types::{ReceivedFile, ReceiverState, TransferEvent};

/// Default payload bytes per message.
///
/// Companion messages top out around 124 bytes; 100 leaves room for the
/// id, size and offset fields.
pub const DEFAULT_CHUNK_SIZE: usize = 100;

/// Largest file a single transfer can carry (sizes travel as `u16`).
pub const MAX_TRANSFER_SIZE: usize = u16::MAX as usize;

/// Protocol faults reported by the receiving side.
///
/// Every fault ends the current transfer and discards the bytes received.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ReceiveError {
    #[error("expected a size announcement")]
    InvalidState,

    #[error("message has no transfer id")]
    InvalidId,

    #[error("declared size does not fit in 16 bits")]
    InvalidSize,

    #[error("chunk does not continue at the current write offset")]
    InvalidOffset,

    #[error("could not allocate the transfer buffer")]
    AllocationFailure,
}

impl ReceiveError {
    /// Numeric code shown to the user ("Error 4").
    pub fn code(&self) -> i32 {
        match self {
            ReceiveError::AllocationFailure => 0,
            ReceiveError::InvalidState => 1,
            ReceiveError::InvalidId => 2,
            ReceiveError::InvalidSize => 3,
            ReceiveError::InvalidOffset => 4,
        }
    }
}

/// Errors produced on the sending side.
#[derive(Debug, thiserror::Error)]
pub enum TransferError {
    #[error("payload of {size} bytes exceeds the {max} byte transfer limit", max = MAX_TRANSFER_SIZE)]
    TooLarge { size: usize },
}
