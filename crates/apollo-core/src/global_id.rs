//! Opaque global identifiers.
//!
//! Every id that crosses the graph boundary is the base64 form of
//! `"{type_name}:{internal_id}"`. The type name travels inside the encoding,
//! so ids are collision-free across types and the concrete type can be
//! recovered without guessing from the raw id.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A decoded `(type name, internal id)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GlobalId {
    /// Concrete graph type name, e.g. `Concept` or `HRLPDocument`.
    pub type_name: String,
    /// Backend-internal identifier (URI fragment).
    pub id: String,
}

impl GlobalId {
    /// Pair a type name with an internal id.
    pub fn new(type_name: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            id: id.into(),
        }
    }

    /// Encode into the opaque wire form.
    ///
    /// Deterministic: the same pair always encodes to the same string.
    pub fn encode(&self) -> String {
        BASE64.encode(format!("{}:{}", self.type_name, self.id))
    }

    /// Decode an opaque id back into its `(type name, internal id)` pair.
    ///
    /// The internal id may itself contain `:`; only the first separator
    /// splits. Fails with [`Error::Decode`] on non-base64 input, a
    /// non-UTF-8 payload, or a payload without a separator.
    pub fn decode(encoded: &str) -> Result<Self> {
        let bytes = BASE64
            .decode(encoded)
            .map_err(|_| Error::Decode(format!("not base64: {encoded}")))?;
        let payload = String::from_utf8(bytes)
            .map_err(|_| Error::Decode(format!("payload is not UTF-8: {encoded}")))?;
        let (type_name, id) = payload
            .split_once(':')
            .ok_or_else(|| Error::Decode(format!("missing type separator: {payload}")))?;
        Ok(Self::new(type_name, id))
    }
}

impl std::fmt::Display for GlobalId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.encode())
    }
}

impl std::str::FromStr for GlobalId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::decode(s)
    }
}
