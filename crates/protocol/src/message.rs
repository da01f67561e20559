use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A single typed value in a [`Dictionary`].
///
/// Byte arrays are base64-encoded when serialized to JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "camelCase")]
pub enum Value {
    Uint(u32),
    Int(i32),
    Bytes(#[serde(with = "base64_bytes")] Vec<u8>),
    CString(String),
}

impl Value {
    /// Returns the value if it is an unsigned integer.
    pub fn as_uint(&self) -> Option<u32> {
        match self {
            Value::Uint(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the value if it is a signed integer.
    pub fn as_int(&self) -> Option<i32> {
        match self {
            Value::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the payload if the value is a byte array.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Bytes(b) => Some(b),
            _ => None,
        }
    }

    /// Returns the string if the value is a C string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::CString(s) => Some(s),
            _ => None,
        }
    }
}

/// An inbound or outbound message: numeric keys mapped to typed values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Dictionary {
    entries: BTreeMap<u32, Value>,
}

impl Dictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a value, returning the one it replaced.
    pub fn insert(&mut self, key: u32, value: Value) -> Option<Value> {
        self.entries.insert(key, value)
    }

    pub fn with_uint(mut self, key: u32, value: u32) -> Self {
        self.insert(key, Value::Uint(value));
        self
    }

    pub fn with_int(mut self, key: u32, value: i32) -> Self {
        self.insert(key, Value::Int(value));
        self
    }

    pub fn with_bytes(mut self, key: u32, value: impl Into<Vec<u8>>) -> Self {
        self.insert(key, Value::Bytes(value.into()));
        self
    }

    pub fn with_cstring(mut self, key: u32, value: impl Into<String>) -> Self {
        self.insert(key, Value::CString(value.into()));
        self
    }

    /// Looks up the value stored under `key`.
    pub fn get(&self, key: u32) -> Option<&Value> {
        self.entries.get(&key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates entries in ascending key order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &Value)> {
        self.entries.iter().map(|(k, v)| (*k, v))
    }
}

mod base64_bytes {
    use base64::{Engine, engine::general_purpose::STANDARD};
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(data: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        STANDARD.encode(data).serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let s = String::deserialize(deserializer)?;
        STANDARD.decode(&s).map_err(serde::de::Error::custom)
    }
}
