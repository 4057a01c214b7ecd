//! Null handling for typed record fields.

use serde::{Deserialize, Deserializer};

/// `deserialize_with` adapter that reads JSON `null` as the field's default.
///
/// Values of the wrong type are still rejected.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Row {
        #[serde(default, deserialize_with = "null_as_default")]
        count: i64,
        #[serde(default, deserialize_with = "null_as_default")]
        label: String,
    }

    #[test]
    fn null_reads_as_default() {
        let row: Row = serde_json::from_str(r#"{"count":null,"label":null}"#).unwrap();
        assert_eq!(row.count, 0);
        assert_eq!(row.label, "");
    }

    #[test]
    fn present_values_pass_through() {
        let row: Row = serde_json::from_str(r#"{"count":4,"label":"x"}"#).unwrap();
        assert_eq!(row.count, 4);
        assert_eq!(row.label, "x");
    }

    #[test]
    fn wrong_type_is_still_an_error() {
        assert!(serde_json::from_str::<Row>(r#"{"count":"four"}"#).is_err());
    }
}
