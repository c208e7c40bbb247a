pub mod job;
pub mod resume;

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Reads a JSON number or numeric string (a trailing `%` is allowed).
/// Model output is not consistent about which one it returns.
pub fn lenient_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().trim_end_matches('%').trim().parse().ok(),
        _ => None,
    }
}

/// Treats an explicit `null` like a missing field. Pair with `#[serde(default)]`.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}
