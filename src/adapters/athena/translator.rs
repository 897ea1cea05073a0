//! HTTP outcome to typed result translation
//!
//! Status rules are applied in order: transport failure, 401/403, 404, 409,
//! 400 with `missingfields`, any other non-2xx, then decoding of the 2xx body.
//! A 200 carrying `success: false` is returned as-is; see [`SoftFailure`].

use super::decoder::{decode, decode_bytes, DecodeMode};
use crate::adapters::http::InboundResponse;
use crate::domain::{AthenaError, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

/// Translates an exchange outcome into a decoded `T`
///
/// # Errors
///
/// Passes transport errors through and maps error statuses onto the
/// matching [`AthenaError`] variant.
pub fn translate<T>(outcome: Result<InboundResponse>, mode: DecodeMode) -> Result<T>
where
    T: DeserializeOwned + Serialize + Default,
{
    let response = outcome?;
    check_status(&response)?;
    decode(&response, mode)
}

/// Translates an exchange outcome into the raw body bytes
///
/// # Errors
///
/// Same status mapping as [`translate`]
pub fn translate_bytes(outcome: Result<InboundResponse>) -> Result<Vec<u8>> {
    let response = outcome?;
    check_status(&response)?;
    Ok(decode_bytes(&response))
}

/// Maps a non-2xx response onto a typed error
///
/// # Errors
///
/// Returns the error for any non-2xx status
pub fn check_status(response: &InboundResponse) -> Result<()> {
    if response.is_success() {
        return Ok(());
    }

    let status = response.status;
    let raw = response.raw_text();
    let payload: Option<Value> = response
        .text()
        .and_then(|text| serde_json::from_str(text).ok());

    let error = match status {
        401 | 403 => AthenaError::Auth {
            status: Some(status),
            message: error_message(payload.as_ref(), &raw),
        },
        404 => AthenaError::NotFound {
            message: error_message(payload.as_ref(), &raw),
        },
        409 => AthenaError::Conflict {
            message: error_message(payload.as_ref(), &raw),
        },
        400 => match payload.as_ref().and_then(missing_fields) {
            Some(missing_fields) => AthenaError::Validation {
                message: error_message(payload.as_ref(), &raw),
                missing_fields,
            },
            None => AthenaError::Server {
                status,
                message: raw,
            },
        },
        _ => AthenaError::Server {
            status,
            message: raw,
        },
    };

    Err(error)
}

/// `error`, else `detailedmessage`, else the raw body
fn error_message(payload: Option<&Value>, raw: &str) -> String {
    payload
        .and_then(|body| {
            ["error", "detailedmessage"]
                .iter()
                .find_map(|key| body.get(*key).and_then(Value::as_str))
        })
        .map(str::to_string)
        .unwrap_or_else(|| raw.to_string())
}

fn missing_fields(payload: &Value) -> Option<Vec<String>> {
    let fields = payload.get("missingfields")?.as_array()?;
    Some(
        fields
            .iter()
            .map(|field| match field {
                Value::String(name) => name.clone(),
                other => other.to_string(),
            })
            .collect(),
    )
}

/// Write responses that report failure inside a 2xx body
///
/// ```
/// use athena_sdk::adapters::athena::translator::SoftFailure;
/// use athena_sdk::models::response::BaseResponse;
///
/// let response = BaseResponse { success: false, errormessage: Some("locked".into()) };
/// assert_eq!(response.failure_message(), Some("locked"));
/// ```
pub trait SoftFailure {
    fn succeeded(&self) -> bool;

    fn error_message(&self) -> Option<&str>;

    /// `Some` with the reported message when the body says it failed
    fn failure_message(&self) -> Option<&str> {
        if self.succeeded() {
            None
        } else {
            Some(
                self.error_message()
                    .unwrap_or("operation reported success = false"),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(status: u16, body: &str) -> Result<InboundResponse> {
        Ok(InboundResponse::json(status, body))
    }

    #[test]
    fn test_transport_error_passes_through() {
        let result: Result<Value> = translate(
            Err(AthenaError::Transport("connection reset".into())),
            DecodeMode::Strict,
        );
        assert!(matches!(result, Err(AthenaError::Transport(_))));
    }

    #[test]
    fn test_auth_statuses() {
        for status in [401, 403] {
            let err = translate::<Value>(outcome(status, "{}"), DecodeMode::Strict).unwrap_err();
            assert!(err.is_auth());
            assert_eq!(err.status(), Some(status));
        }
    }

    #[test]
    fn test_not_found_message_sources() {
        let err = translate::<Value>(outcome(404, r#"{"error":"No such patient"}"#), DecodeMode::Strict)
            .unwrap_err();
        assert_eq!(err.to_string(), "Not found: No such patient");

        let err = translate::<Value>(
            outcome(404, r#"{"detailedmessage":"Gone away"}"#),
            DecodeMode::Strict,
        )
        .unwrap_err();
        assert!(err.to_string().contains("Gone away"));

        let err = translate::<Value>(outcome(404, "plain text"), DecodeMode::Strict).unwrap_err();
        assert!(err.to_string().contains("plain text"));
    }

    #[test]
    fn test_conflict() {
        let err = translate::<Value>(outcome(409, r#"{"error":"Slot taken"}"#), DecodeMode::Strict)
            .unwrap_err();
        assert!(matches!(err, AthenaError::Conflict { ref message } if message == "Slot taken"));
    }

    #[test]
    fn test_validation_with_missing_fields() {
        let err = translate::<Value>(
            outcome(400, r#"{"missingfields":["notetext"],"error":"Additional fields are required."}"#),
            DecodeMode::Strict,
        )
        .unwrap_err();
        assert_eq!(err.missing_fields(), ["notetext".to_string()]);
        assert!(err.to_string().contains("Additional fields are required."));
        assert_eq!(err.status(), Some(400));
    }

    #[test]
    fn test_plain_400_is_server_error() {
        let err = translate::<Value>(outcome(400, r#"{"error":"bad"}"#), DecodeMode::Strict)
            .unwrap_err();
        assert!(matches!(err, AthenaError::Server { status: 400, .. }));
    }

    #[test]
    fn test_server_error_keeps_raw_body() {
        let err = translate::<Value>(outcome(503, "maintenance"), DecodeMode::Strict).unwrap_err();
        assert!(matches!(err, AthenaError::Server { status: 503, ref message } if message == "maintenance"));
    }

    #[test]
    fn test_soft_failure_not_promoted() {
        #[derive(Debug, Default, serde::Deserialize, Serialize)]
        struct Outcome {
            success: bool,
            errormessage: Option<String>,
        }

        impl SoftFailure for Outcome {
            fn succeeded(&self) -> bool {
                self.success
            }
            fn error_message(&self) -> Option<&str> {
                self.errormessage.as_deref()
            }
        }

        let decoded: Outcome = translate(
            outcome(200, r#"{"success":false,"errormessage":"Photo locked"}"#),
            DecodeMode::Strict,
        )
        .unwrap();
        assert_eq!(decoded.failure_message(), Some("Photo locked"));
    }
}
