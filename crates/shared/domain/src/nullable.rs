//! Serde helper for nullable backend columns.
//!
//! `#[serde(default)]` only covers missing keys. Columns declared `null=True` on the
//! backend arrive as an explicit `null`, which this maps to the field's default.

use serde::{Deserialize, Deserializer};

/// Deserializes `T`, turning `null` into `T::default()`.
pub fn deserialize<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Default, Deserialize)]
    #[serde(default)]
    struct Row {
        #[serde(deserialize_with = "super::deserialize")]
        quantity: u32,
        #[serde(deserialize_with = "super::deserialize")]
        notes: String,
    }

    #[test]
    fn null_and_missing_both_fall_back() {
        let row: Row = serde_json::from_value(json!({ "quantity": null, "notes": null })).unwrap();
        assert_eq!(row.quantity, 0);
        assert!(row.notes.is_empty());

        let row: Row = serde_json::from_value(json!({})).unwrap();
        assert_eq!(row.quantity, 0);

        let row: Row = serde_json::from_value(json!({ "quantity": 4, "notes": "ok" })).unwrap();
        assert_eq!((row.quantity, row.notes.as_str()), (4, "ok"));
    }

    #[test]
    fn wrong_types_still_fail() {
        assert!(serde_json::from_value::<Row>(json!({ "quantity": "four" })).is_err());
    }
}
