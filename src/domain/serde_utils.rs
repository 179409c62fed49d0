//! Serde utilities for the tracker API payloads.

use serde::de::{self, Visitor};
use serde::Deserializer;
use std::fmt;

/// Identifiers that the API may send either as JSON strings or as numbers.
pub mod string_or_number {
    use super::{de, fmt, Deserializer, Visitor};

    struct StringOrNumberVisitor;

    impl Visitor<'_> for StringOrNumberVisitor {
        type Value = String;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or integer identifier")
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(value.to_string())
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(value.to_string())
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(value.to_string())
        }

        fn visit_string<E>(self, value: String) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(value)
        }
    }

    /// Deserializes an identifier from a string or number.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is neither a string nor an integer.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(StringOrNumberVisitor)
    }

    /// Optional identifiers; `null` and empty strings both map to `None`.
    pub mod option {
        use super::{de, fmt, Deserializer, Visitor};

        /// Deserializes an optional identifier from a string or number.
        ///
        /// # Errors
        ///
        /// Returns an error if deserialization fails.
        pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
        where
            D: Deserializer<'de>,
        {
            struct OptionVisitor;

            impl<'de> Visitor<'de> for OptionVisitor {
                type Value = Option<String>;

                fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                    formatter.write_str("optional identifier")
                }

                fn visit_none<E>(self) -> Result<Self::Value, E>
                where
                    E: de::Error,
                {
                    Ok(None)
                }

                fn visit_unit<E>(self) -> Result<Self::Value, E>
                where
                    E: de::Error,
                {
                    Ok(None)
                }

                fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
                where
                    D: Deserializer<'de>,
                {
                    super::deserialize(deserializer).map(|id| Some(id).filter(|s| !s.is_empty()))
                }
            }

            deserializer.deserialize_option(OptionVisitor)
        }
    }
}

/// Counts that aggregate endpoints may send as numbers or numeric strings.
pub mod lenient_count {
    use super::{de, fmt, Deserializer, Visitor};

    struct CountVisitor;

    impl Visitor<'_> for CountVisitor {
        type Value = u64;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a non-negative integer or numeric string")
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(value)
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            u64::try_from(value).map_err(de::Error::custom)
        }

        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            if value.is_finite() && value >= 0.0 {
                Ok(value.trunc() as u64)
            } else {
                Err(de::Error::custom(format!("invalid count: {value}")))
            }
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            parse_count(value).ok_or_else(|| de::Error::custom(format!("invalid count: {value}")))
        }
    }

    /// Parses the leading integer of a string, the way a lenient `parseInt` would.
    #[must_use]
    pub fn parse_count(value: &str) -> Option<u64> {
        let digits: String = value
            .trim()
            .chars()
            .take_while(char::is_ascii_digit)
            .collect();
        digits.parse().ok()
    }

    /// Deserializes a count from a number or numeric string.
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be read as a count.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<u64, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(CountVisitor)
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;
    use test_case::test_case;

    #[derive(Deserialize)]
    struct Id {
        #[serde(with = "super::string_or_number")]
        id: String,
    }

    #[derive(Deserialize)]
    struct MaybeId {
        #[serde(default, with = "super::string_or_number::option")]
        id: Option<String>,
    }

    #[derive(Deserialize)]
    struct Count {
        #[serde(with = "super::lenient_count")]
        count: u64,
    }

    #[test_case(r#"{"id": 7}"#, "7" ; "number")]
    #[test_case(r#"{"id": "7"}"#, "7" ; "string")]
    #[test_case(r#"{"id": "a1b2"}"#, "a1b2" ; "opaque string")]
    fn test_identifier_forms(json: &str, expected: &str) {
        let parsed: Id = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.id, expected);
    }

    #[test]
    fn test_optional_identifier() {
        let missing: MaybeId = serde_json::from_str("{}").unwrap();
        assert!(missing.id.is_none());

        let null: MaybeId = serde_json::from_str(r#"{"id": null}"#).unwrap();
        assert!(null.id.is_none());

        let empty: MaybeId = serde_json::from_str(r#"{"id": ""}"#).unwrap();
        assert!(empty.id.is_none());

        let present: MaybeId = serde_json::from_str(r#"{"id": 12}"#).unwrap();
        assert_eq!(present.id.as_deref(), Some("12"));
    }

    #[test_case(r#"{"count": 3}"#, 3 ; "number")]
    #[test_case(r#"{"count": "3"}"#, 3 ; "numeric string")]
    #[test_case(r#"{"count": "12abc"}"#, 12 ; "leading digits")]
    fn test_count_forms(json: &str, expected: u64) {
        let parsed: Count = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.count, expected);
    }

    #[test]
    fn test_count_rejects_garbage() {
        assert!(serde_json::from_str::<Count>(r#"{"count": "many"}"#).is_err());
        assert!(serde_json::from_str::<Count>(r#"{"count": -1}"#).is_err());
    }
}
