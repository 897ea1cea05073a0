//! Serde converters for response payloads

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Identifier that the API sends as either a JSON string or a number
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ExternalId(String);

impl ExternalId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric value, when the identifier is numeric
    pub fn as_u64(&self) -> Option<u64> {
        self.0.parse().ok()
    }
}

impl fmt::Display for ExternalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<u32> for ExternalId {
    fn from(value: u32) -> Self {
        Self(value.to_string())
    }
}

impl Serialize for ExternalId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for ExternalId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct IdVisitor;

        impl<'de> Visitor<'de> for IdVisitor {
            type Value = ExternalId;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a string or integer identifier")
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<ExternalId, E> {
                Ok(ExternalId(value.to_string()))
            }

            fn visit_u64<E: de::Error>(self, value: u64) -> Result<ExternalId, E> {
                Ok(ExternalId(value.to_string()))
            }

            fn visit_i64<E: de::Error>(self, value: i64) -> Result<ExternalId, E> {
                Ok(ExternalId(value.to_string()))
            }
        }

        deserializer.deserialize_any(IdVisitor)
    }
}

/// `MM/dd/yyyy` dates in optional fields; an empty string reads as `None`
pub mod us_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%m/%d/%Y";

    pub fn serialize<S: Serializer>(value: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(date) => serializer.serialize_str(&date.format(FORMAT).to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<NaiveDate>, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        match raw.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(text) => NaiveDate::parse_from_str(text, FORMAT)
                .map(Some)
                .map_err(|e| serde::de::Error::custom(format!("invalid date '{text}': {e}"))),
        }
    }
}

/// Booleans sent either as JSON booleans or as `"true"`/`"false"` strings
pub mod loose_bool {
    use serde::de::{self, Deserializer, Visitor};
    use serde::Serializer;
    use std::fmt;

    pub fn serialize<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_bool(*value)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        struct FlagVisitor;

        impl<'de> Visitor<'de> for FlagVisitor {
            type Value = bool;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a boolean or \"true\"/\"false\"")
            }

            fn visit_bool<E: de::Error>(self, value: bool) -> Result<bool, E> {
                Ok(value)
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<bool, E> {
                match value.trim().to_ascii_lowercase().as_str() {
                    "true" => Ok(true),
                    "false" | "" => Ok(false),
                    other => Err(E::custom(format!("invalid boolean '{other}'"))),
                }
            }

            fn visit_unit<E: de::Error>(self) -> Result<bool, E> {
                Ok(false)
            }
        }

        deserializer.deserialize_any(FlagVisitor)
    }
}

/// Optional [`WireEnum`](crate::models::enums::WireEnum) members
///
/// An unknown code is an error in strict decoding and reads as `None` in
/// lenient decoding.
pub mod wire_or_none {
    use crate::models::enums::{is_skipping_unknown, unknown_wire_message, WireEnum};
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawCode {
        Text(String),
        Number(i64),
    }

    pub fn serialize<S, E>(value: &Option<E>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
        E: WireEnum + Serialize,
    {
        value.serialize(serializer)
    }

    pub fn deserialize<'de, D, E>(deserializer: D) -> Result<Option<E>, D::Error>
    where
        D: Deserializer<'de>,
        E: WireEnum,
    {
        let raw = match Option::<RawCode>::deserialize(deserializer)? {
            None => return Ok(None),
            Some(RawCode::Text(text)) => text,
            Some(RawCode::Number(code)) => code.to_string(),
        };
        match E::from_wire(&raw) {
            Some(variant) => Ok(Some(variant)),
            None if is_skipping_unknown() => {
                tracing::debug!(enum_type = E::NAME, value = %raw, "Ignoring unknown enum value");
                Ok(None)
            }
            None => Err(serde::de::Error::custom(unknown_wire_message::<E>(&raw))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::enums::{skipping_unknown, AppointmentStatus};
    use chrono::NaiveDate;

    #[derive(Debug, Default, Serialize, Deserialize)]
    struct Holder {
        id: ExternalId,
        #[serde(default, with = "us_date")]
        dob: Option<NaiveDate>,
        #[serde(default, with = "loose_bool")]
        active: bool,
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    struct Visit {
        #[serde(default, with = "wire_or_none")]
        status: Option<AppointmentStatus>,
    }

    #[test]
    fn test_wire_or_none_reads_known_codes() {
        let visit: Visit = serde_json::from_str(r#"{"status":"x"}"#).unwrap();
        assert_eq!(visit.status, Some(AppointmentStatus::Cancelled));
        let visit: Visit = serde_json::from_str(r#"{"status":null}"#).unwrap();
        assert_eq!(visit.status, None);
        assert_eq!(serde_json::to_value(&Visit::default()).unwrap()["status"], serde_json::Value::Null);
    }

    #[test]
    fn test_wire_or_none_unknown_code() {
        let err = serde_json::from_str::<Visit>(r#"{"status":"z"}"#).unwrap_err();
        assert!(err.to_string().contains("AppointmentStatus"));

        let visit: Visit = skipping_unknown(|| serde_json::from_str(r#"{"status":"z"}"#)).unwrap();
        assert_eq!(visit.status, None);
    }

    #[test]
    fn test_loose_bool_accepts_strings() {
        let holder: Holder = serde_json::from_str(r#"{"id":"1","active":"true"}"#).unwrap();
        assert!(holder.active);
        let holder: Holder = serde_json::from_str(r#"{"id":"1","active":false}"#).unwrap();
        assert!(!holder.active);
        assert!(serde_json::from_str::<Holder>(r#"{"id":"1","active":"maybe"}"#).is_err());
    }

    #[test]
    fn test_external_id_from_number_or_string() {
        let holder: Holder = serde_json::from_str(r#"{"id": 42}"#).unwrap();
        assert_eq!(holder.id.as_str(), "42");
        let holder: Holder = serde_json::from_str(r#"{"id": "42"}"#).unwrap();
        assert_eq!(holder.id.as_u64(), Some(42));
    }

    #[test]
    fn test_us_date_round_trip() {
        let holder: Holder = serde_json::from_str(r#"{"id":"1","dob":"07/04/1980"}"#).unwrap();
        assert_eq!(holder.dob, NaiveDate::from_ymd_opt(1980, 7, 4));
        let json = serde_json::to_value(&holder).unwrap();
        assert_eq!(json["dob"], "07/04/1980");
    }

    #[test]
    fn test_us_date_empty_and_invalid() {
        let holder: Holder = serde_json::from_str(r#"{"id":"1","dob":""}"#).unwrap();
        assert_eq!(holder.dob, None);
        assert!(serde_json::from_str::<Holder>(r#"{"id":"1","dob":"1980-07-04"}"#).is_err());
    }
}
