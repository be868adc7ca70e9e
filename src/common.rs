//! Serde helpers for partial-update payloads.
//!
//! Patch fields use `#[serde(default, deserialize_with = ...)]` so that an
//! absent key and an explicit `null` can be told apart.

use serde::{Deserialize, Deserializer};

/// For non-nullable columns: absent stays `None`, a value becomes `Some`,
/// and an explicit `null` is rejected.
pub fn non_null<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

/// For nullable columns: absent stays `None`, `null` becomes `Some(None)`
/// (clear the column) and a value becomes `Some(Some(value))`.
pub fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Payload {
        #[serde(default, deserialize_with = "non_null")]
        name: Option<String>,
        #[serde(default, deserialize_with = "nullable")]
        note: Option<Option<String>>,
    }

    #[test]
    fn absent_fields_stay_unset() {
        let p: Payload = serde_json::from_str("{}").unwrap();
        assert_eq!(p.name, None);
        assert_eq!(p.note, None);
    }

    #[test]
    fn null_clears_nullable_field() {
        let p: Payload = serde_json::from_str(r#"{"note": null}"#).unwrap();
        assert_eq!(p.note, Some(None));

        let p: Payload = serde_json::from_str(r#"{"note": "hi", "name": "x"}"#).unwrap();
        assert_eq!(p.note, Some(Some("hi".to_string())));
        assert_eq!(p.name.as_deref(), Some("x"));
    }

    #[test]
    fn null_is_rejected_for_required_field() {
        assert!(serde_json::from_str::<Payload>(r#"{"name": null}"#).is_err());
    }
}
