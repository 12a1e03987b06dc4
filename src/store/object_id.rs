//! Object Id Module
//!
//! The store's document identifier. Generation and parsing come from
//! `bson::oid`; this wrapper pins the JSON form to a plain 24-digit hex
//! string instead of bson's extended `{"$oid": ...}` shape.

use std::fmt;
use std::str::FromStr;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

// == Constants ==
/// Length of the textual (hex) form
pub const OBJECT_ID_HEX_LEN: usize = 24;

// == Error ==
/// Returned when a string does not have the shape of an object id.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("'{0}' is not a valid object id")]
pub struct ObjectIdError(pub String);

// == Object Id ==
/// Store-assigned document identifier.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(bson::oid::ObjectId);

impl ObjectId {
    /// Generates a fresh id.
    pub fn new() -> Self {
        Self(bson::oid::ObjectId::new())
    }

    /// Returns true if `s` has the shape of an object id (24 hex digits).
    pub fn is_valid(s: &str) -> bool {
        s.len() == OBJECT_ID_HEX_LEN && s.bytes().all(|b| b.is_ascii_hexdigit())
    }

    /// Lowercase hex form.
    pub fn to_hex(&self) -> String {
        self.0.to_hex()
    }
}

impl Default for ObjectId {
    fn default() -> Self {
        Self::new()
    }
}

// == Parsing ==
impl FromStr for ObjectId {
    type Err = ObjectIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if !Self::is_valid(s) {
            return Err(ObjectIdError(s.to_string()));
        }

        bson::oid::ObjectId::parse_str(s)
            .map(Self)
            .map_err(|_| ObjectIdError(s.to_string()))
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjectId({})", self.to_hex())
    }
}

// == Serde ==
impl Serialize for ObjectId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for ObjectId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}
