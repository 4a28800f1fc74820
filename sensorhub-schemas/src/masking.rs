//! Secret masking for diagnostics and exports
//!
//! Sensitive values are only ever rendered as [`MASK`]. The raw string is
//! reachable through [`Secret::expose`] for the code that actually opens a
//! connection, and nowhere else: `Debug`, `Display` and `Serialize` all
//! print the mask.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Fixed-length placeholder for a set sensitive value
pub const MASK: &str = "********";

/// Placeholder for a sensitive value that was never set
pub const UNSET: &str = "<unset>";

/// Redacted rendering of a sensitive value
///
/// The length of the mask never depends on the value.
pub fn mask(value: &str) -> &'static str {
    if value.is_empty() {
        UNSET
    } else {
        MASK
    }
}

/// A string that never prints itself
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
    /// Wrap a raw value
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// The raw value, for handing to a client library
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Whether no value is set (whitespace counts as unset)
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Secret({})", mask(&self.0))
    }
}

impl fmt::Display for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(mask(&self.0))
    }
}

impl Serialize for Secret {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(mask(&self.0))
    }
}

impl<'de> Deserialize<'de> for Secret {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(Secret)
    }
}

impl From<&str> for Secret {
    fn from(value: &str) -> Self {
        Secret::new(value)
    }
}

impl From<String> for Secret {
    fn from(value: String) -> Self {
        Secret(value)
    }
}
