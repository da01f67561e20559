//! Drives one transfer from splitter to receiver in memory.

use std::sync::{Arc, Mutex};

use photolink_transfer::{ChunkSplitter, FileReceiver, ReceiveError, ReceivedFile};

use crate::config::Config;

/// Splits `data` into messages, feeds them through a [`FileReceiver`] and
/// returns the rebuilt file.
pub fn run(config: &Config, data: &[u8]) -> anyhow::Result<ReceivedFile> {
    let failure: Arc<Mutex<Option<ReceiveError>>> = Arc::new(Mutex::new(None));
    let received: Arc<Mutex<Option<ReceivedFile>>> = Arc::new(Mutex::new(None));

    let mut receiver = FileReceiver::new(config.keys);
    // Start from a clean session, as the watch does before each request.
    receiver.reset();

    let f = Arc::clone(&failure);
    receiver.on_error(Box::new(move |err| {
        tracing::error!(code = err.code(), "Error {}", err.code());
        *f.lock().unwrap() = Some(err);
    }));
    receiver.on_progress(Box::new(|id, received, total| {
        tracing::info!(id, "{received} / {total}");
    }));
    let r = Arc::clone(&received);
    receiver.on_file_received(Box::new(move |file| {
        tracing::info!(id = file.id, size = file.total(), "file received");
        *r.lock().unwrap() = Some(file);
    }));

    let splitter = ChunkSplitter::new(config.transfer_id, data, config.chunk_size, config.keys)?;
    for message in splitter {
        receiver.handle_message(&message);
        if let Some(err) = *failure.lock().unwrap() {
            anyhow::bail!("transfer failed: {err} (error {})", err.code());
        }
    }

    let file = received.lock().unwrap().take();
    file.ok_or_else(|| anyhow::anyhow!("transfer ended without completing"))
}
