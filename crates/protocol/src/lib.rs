//! Message types shared by the photo sender and the watch-side receiver.
//!
//! Messages are small key/value dictionaries. Which numeric key carries
//! which field of a transfer is configured through [`MessageKeys`].

pub mod keys;
pub mod message;

pub use keys::MessageKeys;
pub use message::{Dictionary, Value};
