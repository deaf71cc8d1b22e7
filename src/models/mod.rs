pub mod auth;
pub mod driver;
pub mod fuel;
pub mod gps;
pub mod insurance;
pub mod maintenance;
pub mod project;
pub mod vehicle;

use serde::{Deserialize, Deserializer};

/// Patch field that tells "absent" (`None`) apart from an explicit JSON
/// `null` (`Some(None)`). Pair with `#[serde(default)]`.
pub(crate) fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
