//! Patch fields that can be cleared
//!
//! A plain `Option<T>` cannot tell a missing field from an explicit `null`.
//! [`Nullable`] keeps both: `None` leaves the stored value alone, `Some(None)`
//! writes `null`, `Some(Some(v))` writes `v`.

use serde::{Deserialize, Deserializer};

/// Patch value for a field that may be set, cleared or left untouched.
pub type Nullable<T> = Option<Option<T>>;

/// `deserialize_with` target for [`Nullable`] fields. Must be paired with
/// `#[serde(default)]` so that a missing field stays `None`.
pub fn deserialize<'de, T, D>(deserializer: D) -> Result<Nullable<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
