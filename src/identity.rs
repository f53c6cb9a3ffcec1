//! The application identity value object.

use secrecy::{ExposeSecret, SecretString};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};

use crate::Error;

/// Identity values as delivered by the sources, before required fields are checked.
///
/// Sources may deliver any scalar. `api_id` accepts an integer or a numeric
/// string; the string fields accept any scalar and keep its text.
#[derive(Debug, Default, Deserialize)]
pub struct RawIdentity {
    #[serde(default, deserialize_with = "api_id_from_scalar")]
    pub api_id: Option<i32>,
    #[serde(default, deserialize_with = "text_from_scalar")]
    pub api_hash: Option<String>,
    #[serde(default, alias = "hockey_app_id", deserialize_with = "text_from_scalar")]
    pub telemetry_service_id: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Text(String),
}

fn api_id_from_scalar<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i32>, D::Error> {
    let id = match Option::<Scalar>::deserialize(deserializer)? {
        None => return Ok(None),
        Some(Scalar::Integer(id)) => i32::try_from(id).map_err(D::Error::custom)?,
        Some(Scalar::Text(text)) => text.trim().parse::<i32>().map_err(|err| {
            D::Error::custom(format!("api_id '{text}' is not a 32-bit integer: {err}"))
        })?,
        Some(Scalar::Float(_) | Scalar::Boolean(_)) => {
            return Err(D::Error::custom("api_id must be an integer"))
        }
    };
    Ok(Some(id))
}

fn text_from_scalar<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(Option::<Scalar>::deserialize(deserializer)?.map(|scalar| match scalar {
        Scalar::Integer(i) => i.to_string(),
        Scalar::Float(f) => f.to_string(),
        Scalar::Boolean(b) => b.to_string(),
        Scalar::Text(text) => text,
    }))
}

/// Numeric application id, its paired secret, and the telemetry service id.
///
/// Immutable once built, and only built by a
/// [`ConfigurationProvider`](crate::ConfigurationProvider). The secret is
/// redacted from `Debug` output.
#[derive(Debug)]
pub struct ApplicationConfiguration {
    api_id: i32,
    api_hash: SecretString,
    telemetry_service_id: String,
}

impl ApplicationConfiguration {
    /// Builds the identity, requiring `api_id` and a non-empty `api_hash`.
    ///
    /// A missing telemetry service id resolves to an empty string.
    pub(crate) fn from_raw(raw: RawIdentity) -> Result<Self, Error> {
        let api_hash = raw.api_hash.filter(|hash| !hash.is_empty());

        match (raw.api_id, api_hash) {
            (Some(api_id), Some(api_hash)) => Ok(Self {
                api_id,
                api_hash: SecretString::from(api_hash),
                telemetry_service_id: raw.telemetry_service_id.unwrap_or_default(),
            }),
            (api_id, api_hash) => {
                let mut missing = Vec::new();
                if api_id.is_none() {
                    missing.push("api_id");
                }
                if api_hash.is_none() {
                    missing.push("api_hash");
                }
                Err(Error::ConfigurationUnavailable { missing })
            }
        }
    }

    /// Numeric application id presented to the backend.
    pub fn api_id(&self) -> i32 {
        self.api_id
    }

    /// Secret paired with the application id.
    pub fn api_hash(&self) -> &str {
        self.api_hash.expose_secret()
    }

    /// Empty when no telemetry backend is configured.
    pub fn telemetry_service_id(&self) -> &str {
        &self.telemetry_service_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(api_id: Option<i32>, api_hash: Option<&str>, telemetry: Option<&str>) -> RawIdentity {
        RawIdentity {
            api_id,
            api_hash: api_hash.map(String::from),
            telemetry_service_id: telemetry.map(String::from),
        }
    }

    #[test]
    fn test_complete_identity() {
        let identity =
            ApplicationConfiguration::from_raw(raw(Some(12345), Some("a1b2c3d4e5"), Some("hockey-xyz")))
                .unwrap();

        assert_eq!(identity.api_id(), 12345);
        assert_eq!(identity.api_hash(), "a1b2c3d4e5");
        assert_eq!(identity.telemetry_service_id(), "hockey-xyz");
    }

    #[test]
    fn test_missing_telemetry_defaults_to_empty() {
        let identity = ApplicationConfiguration::from_raw(raw(Some(1), Some("h"), None)).unwrap();
        assert_eq!(identity.telemetry_service_id(), "");
    }

    #[test]
    fn test_missing_api_id_is_unavailable() {
        let err = ApplicationConfiguration::from_raw(raw(None, Some("h"), None)).unwrap_err();
        assert!(matches!(
            err,
            Error::ConfigurationUnavailable { ref missing } if missing == &["api_id"]
        ));
    }

    #[test]
    fn test_missing_both_reports_both() {
        let err = ApplicationConfiguration::from_raw(raw(None, None, Some("t"))).unwrap_err();
        assert!(matches!(
            err,
            Error::ConfigurationUnavailable { ref missing } if missing == &["api_id", "api_hash"]
        ));
    }

    #[test]
    fn test_empty_hash_counts_as_missing() {
        let err = ApplicationConfiguration::from_raw(raw(Some(1), Some(""), None)).unwrap_err();
        assert!(matches!(
            err,
            Error::ConfigurationUnavailable { ref missing } if missing == &["api_hash"]
        ));
    }

    #[test]
    fn test_debug_redacts_hash() {
        let identity = ApplicationConfiguration::from_raw(raw(Some(1), Some("s3cret"), None)).unwrap();
        let rendered = format!("{identity:?}");

        assert!(!rendered.contains("s3cret"));
        assert!(rendered.contains("[REDACTED]"));
    }

    #[test]
    fn test_legacy_hockey_key_is_accepted() {
        let raw: RawIdentity =
            toml::from_str("api_id = 1\napi_hash = \"h\"\nhockey_app_id = \"legacy\"").unwrap();
        assert_eq!(raw.telemetry_service_id.as_deref(), Some("legacy"));
    }

    #[test]
    fn test_string_fields_keep_scalar_text() {
        let raw: RawIdentity =
            toml::from_str("api_id = 1\napi_hash = 1234567890\ntelemetry_service_id = true").unwrap();

        assert_eq!(raw.api_hash.as_deref(), Some("1234567890"));
        assert_eq!(raw.telemetry_service_id.as_deref(), Some("true"));
    }

    #[test]
    fn test_api_id_accepts_numeric_text() {
        let raw: RawIdentity = toml::from_str("api_id = \" 12345 \"").unwrap();
        assert_eq!(raw.api_id, Some(12345));
    }

    #[test]
    fn test_api_id_rejects_out_of_range_and_non_numeric() {
        assert!(toml::from_str::<RawIdentity>("api_id = 99999999999").is_err());
        assert!(toml::from_str::<RawIdentity>("api_id = \"abc\"").is_err());
        assert!(toml::from_str::<RawIdentity>("api_id = 1.5").is_err());
    }
}
