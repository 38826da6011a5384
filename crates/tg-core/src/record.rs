//! Time records as stored by the remote TimeTagger server.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Description prefix that excludes a record from reports.
pub const HIDDEN_MARKER: &str = "HIDDEN";

const KEY_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

const KEY_LENGTH: usize = 8;

/// UUID v4 byte positions that carry no version or variant bits.
const KEY_SOURCE_BYTES: [usize; 14] = [0, 1, 2, 3, 4, 5, 7, 9, 10, 11, 12, 13, 14, 15];

/// Bytes at or above this bound are discarded so each letter is equally likely.
const KEY_BYTE_LIMIT: u8 = 208;

/// Validation errors for records.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RecordError {
    /// The record key was empty.
    #[error("record key cannot be empty")]
    EmptyKey,
}

/// A validated record key.
///
/// Keys are opaque to the server. Keys generated by this client are eight
/// ASCII letters, which leaves about 5e13 possibilities per user.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RecordKey(String);

impl RecordKey {
    /// Creates a key after validation.
    pub fn new(key: impl Into<String>) -> Result<Self, RecordError> {
        let key = key.into();
        if key.is_empty() {
            return Err(RecordError::EmptyKey);
        }
        Ok(Self(key))
    }

    /// Generates a fresh random key with uniformly drawn letters.
    pub fn generate() -> Self {
        let mut key = String::with_capacity(KEY_LENGTH);
        while key.len() < KEY_LENGTH {
            let bytes = Uuid::new_v4().into_bytes();
            for byte in KEY_SOURCE_BYTES.iter().map(|&i| bytes[i]) {
                if key.len() == KEY_LENGTH {
                    break;
                }
                if let Some(letter) = key_letter(byte) {
                    key.push(letter);
                }
            }
        }
        Self(key)
    }

    /// Returns the key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Maps a random byte onto the key alphabet, or `None` if it must be redrawn.
fn key_letter(byte: u8) -> Option<char> {
    (byte < KEY_BYTE_LIMIT).then(|| char::from(KEY_ALPHABET[usize::from(byte) % KEY_ALPHABET.len()]))
}

impl TryFrom<String> for RecordKey {
    type Error = RecordError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<RecordKey> for String {
    fn from(key: RecordKey) -> Self {
        key.0
    }
}

impl fmt::Display for RecordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One tracked time interval.
///
/// Timestamps are epoch seconds. A record whose `t1` equals its `t2` is a
/// running timer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Unique key, assigned by the client that created the record.
    pub key: RecordKey,
    /// Start time.
    pub t1: f64,
    /// End time. Equal to `t1` while the timer runs.
    pub t2: f64,
    /// Last modification time.
    #[serde(default)]
    pub mt: f64,
    /// Status marker, `0` for active records.
    #[serde(default)]
    pub st: f64,
    /// Free-text description. `#` introduces tags.
    #[serde(default)]
    pub ds: String,
}

impl Record {
    /// Creates a running record starting at `now`.
    pub fn start(description: impl Into<String>, now: f64, modified: f64) -> Self {
        Self::finished(now, now, description, modified)
    }

    /// Creates a record with explicit bounds and a fresh key.
    pub fn finished(t1: f64, t2: f64, description: impl Into<String>, modified: f64) -> Self {
        Self {
            key: RecordKey::generate(),
            t1,
            t2,
            mt: modified,
            st: 0.0,
            ds: description.into(),
        }
    }

    /// Whether this record is an unfinished timer.
    #[allow(clippy::float_cmp)]
    pub fn is_running(&self) -> bool {
        self.t1 == self.t2
    }

    /// Whether the description starts with the hidden marker.
    pub fn is_hidden(&self) -> bool {
        self.ds.starts_with(HIDDEN_MARKER)
    }

    /// Whether the description contains the hidden marker anywhere.
    pub fn mentions_hidden(&self) -> bool {
        self.ds.contains(HIDDEN_MARKER)
    }

    /// Ends a running timer at `at`.
    pub fn stop(&mut self, at: f64, modified: f64) {
        self.t2 = at;
        self.mt = modified;
    }

    /// Orders records by start, then end, then key.
    pub fn chronological(a: &Self, b: &Self) -> Ordering {
        a.t1
            .total_cmp(&b.t1)
            .then_with(|| a.t2.total_cmp(&b.t2))
            .then_with(|| a.key.cmp(&b.key))
    }
}
