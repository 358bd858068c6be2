//! Serialization boundary for the profession-to-salary mapping.
//!
//! The backend stores this mapping as free text. Two renderings exist in
//! the wild: proper JSON (`{"Nurse":"₦50,000"}`) written by the current
//! backend, and a legacy brace/equals rendering (`{Nurse=₦50,000,
//! Doctor=₦80,000}`) left behind by an earlier client. Decoding is lenient:
//! unparsable input degrades to `None` so a bad field never rejects the
//! record it rides on.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer};

/// Decode a raw salary-text field into a structured mapping.
///
/// Tries JSON first, then the legacy brace rendering. Keys and values are
/// trimmed; blank keys are dropped; an empty result becomes `None`.
pub fn decode(raw: &str) -> Option<BTreeMap<String, String>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(map) = serde_json::from_str::<BTreeMap<String, String>>(trimmed) {
        return normalize(map);
    }

    // Legacy rendering: {Nurse=₦50,000, Doctor=₦80,000}. Pairs that don't
    // contain '=' are skipped rather than failing the whole field.
    let inner = trimmed.strip_prefix('{')?.strip_suffix('}')?;
    let mut map = BTreeMap::new();
    for pair in inner.split(',') {
        if let Some((key, value)) = pair.split_once('=') {
            map.insert(key.to_string(), value.to_string());
        }
    }
    normalize(map)
}

/// Encode a mapping back to its canonical wire text (JSON).
pub fn encode(map: &BTreeMap<String, String>) -> String {
    serde_json::to_string(map).unwrap_or_default()
}

/// Trim keys and values, drop blank keys, collapse empty to `None`.
pub fn normalize(map: BTreeMap<String, String>) -> Option<BTreeMap<String, String>> {
    let cleaned: BTreeMap<String, String> = map
        .into_iter()
        .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
        .filter(|(k, _)| !k.is_empty())
        .collect();
    if cleaned.is_empty() { None } else { Some(cleaned) }
}

/// Serde adapter for the `professionSalaries` wire field.
///
/// Accepts a structured object, a text rendering in either historical
/// format, or null. Used via `#[serde(deserialize_with = ...)]` on
/// [`crate::HospitalRecord`].
pub fn deserialize_lenient<'de, D>(
    deserializer: D,
) -> Result<Option<BTreeMap<String, String>>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Wire {
        Map(BTreeMap<String, String>),
        Text(String),
    }

    Ok(match Option::<Wire>::deserialize(deserializer)? {
        None => None,
        Some(Wire::Map(map)) => normalize(map),
        Some(Wire::Text(text)) => decode(&text),
    })
}
