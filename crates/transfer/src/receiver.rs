use photolink_protocol::{Dictionary, MessageKeys};

use crate::types::{ReceivedFile, ReceiverState, TransferEvent};
use crate::{ReceiveError, Reassembler};

/// Callback invoked when a transfer is aborted.
pub type ErrorCallback = Box<dyn FnMut(ReceiveError) + Send>;

/// Callback invoked with `(id, received, total)` after each accepted chunk.
pub type ProgressCallback = Box<dyn FnMut(u32, u16, u16) + Send>;

/// Callback invoked with the finished file. The callback owns the bytes.
pub type FileReceivedCallback = Box<dyn FnMut(ReceivedFile) + Send>;

/// The set of notifications a [`FileReceiver`] can deliver.
///
/// Unset callbacks are skipped.
#[derive(Default)]
pub struct ReceiverCallbacks {
    pub error: Option<ErrorCallback>,
    pub progress: Option<ProgressCallback>,
    pub file_received: Option<FileReceivedCallback>,
}

/// A [`Reassembler`] that reports through callbacks instead of return values.
pub struct FileReceiver {
    reassembler: Reassembler,
    callbacks: ReceiverCallbacks,
}

impl FileReceiver {
    pub fn new(keys: MessageKeys) -> Self {
        Self {
            reassembler: Reassembler::new(keys),
            callbacks: ReceiverCallbacks::default(),
        }
    }

    /// Replaces all callbacks at once.
    pub fn set_callbacks(&mut self, callbacks: ReceiverCallbacks) {
        self.callbacks = callbacks;
    }

    pub fn on_error(&mut self, callback: ErrorCallback) {
        self.callbacks.error = Some(callback);
    }

    pub fn on_progress(&mut self, callback: ProgressCallback) {
        self.callbacks.progress = Some(callback);
    }

    pub fn on_file_received(&mut self, callback: FileReceivedCallback) {
        self.callbacks.file_received = Some(callback);
    }

    /// Feeds one message and fires at most one callback.
    pub fn handle_message(&mut self, message: &Dictionary) {
        let Some(event) = self.reassembler.handle(message) else {
            return;
        };

        match event {
            TransferEvent::Progress {
                id,
                received,
                total,
            } => {
                if let Some(cb) = self.callbacks.progress.as_mut() {
                    cb(id, received, total);
                }
            }
            TransferEvent::Completed(file) => {
                if let Some(cb) = self.callbacks.file_received.as_mut() {
                    cb(file);
                }
            }
            TransferEvent::Failed(err) => {
                if let Some(cb) = self.callbacks.error.as_mut() {
                    cb(err);
                }
            }
        }
    }

    /// Drops any partial transfer; call before requesting a new file.
    pub fn reset(&mut self) {
        self.reassembler.reset();
    }

    pub fn state(&self) -> ReceiverState {
        self.reassembler.state()
    }

    pub fn reassembler(&self) -> &Reassembler {
        &self.reassembler
    }
}
