use serde::{Deserialize, Serialize};

/// Key used by the companion app for the transfer identifier.
pub const DEFAULT_ID_KEY: u32 = 47000;
/// Key used by the companion app for the payload bytes.
pub const DEFAULT_BYTES_KEY: u32 = 47001;
/// Key used by the companion app for the declared total size.
pub const DEFAULT_SIZE_KEY: u32 = 47002;
/// Key used by the companion app for the byte offset of a chunk.
pub const DEFAULT_OFFSET_KEY: u32 = 47003;

/// Maps the logical fields of a transfer message to dictionary keys.
///
/// Keys are not validated; two fields sharing a key is the caller's problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MessageKeys {
    pub id: u32,
    pub size: u32,
    pub offset: u32,
    pub bytes: u32,
}

impl Default for MessageKeys {
    fn default() -> Self {
        Self {
            id: DEFAULT_ID_KEY,
            size: DEFAULT_SIZE_KEY,
            offset: DEFAULT_OFFSET_KEY,
            bytes: DEFAULT_BYTES_KEY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_companion_app() {
        let keys = MessageKeys::default();
        assert_eq!(keys.id, 47000);
        assert_eq!(keys.bytes, 47001);
        assert_eq!(keys.size, 47002);
        assert_eq!(keys.offset, 47003);
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let keys: MessageKeys = serde_json::from_str(r#"{"id":1,"size":2}"#).unwrap();
        assert_eq!(keys.id, 1);
        assert_eq!(keys.size, 2);
        assert_eq!(keys.offset, DEFAULT_OFFSET_KEY);
        assert_eq!(keys.bytes, DEFAULT_BYTES_KEY);
    }
}
