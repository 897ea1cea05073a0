//! Response decoding
//!
//! Binary content types are returned as bytes and never parsed. Text bodies
//! are parsed as JSON into the requested type. In strict mode, a non-null
//! member that the target type does not keep is a decode failure; lenient
//! mode only logs it and reads unknown codes on optional enum members as
//! `None`.

use crate::adapters::http::{InboundResponse, ResponseBody};
use crate::domain::{AthenaError, Result};
use crate::models::enums::skipping_unknown;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

/// How to treat payload members the target type does not declare
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DecodeMode {
    #[default]
    Strict,
    Lenient,
}

impl DecodeMode {
    pub fn from_strict(strict: bool) -> Self {
        if strict {
            DecodeMode::Strict
        } else {
            DecodeMode::Lenient
        }
    }
}

/// Decodes a text response into `T`
///
/// An empty or `null` body yields `T::default()`.
///
/// # Errors
///
/// Returns [`AthenaError::Decode`] for binary content, malformed JSON, a
/// type mismatch, or (in strict mode) an unknown member.
pub fn decode<T>(response: &InboundResponse, mode: DecodeMode) -> Result<T>
where
    T: DeserializeOwned + Serialize + Default,
{
    let target = std::any::type_name::<T>();

    let text = match &response.body {
        _ if response.is_binary() => {
            return Err(AthenaError::Decode(format!(
                "Cannot decode {} content into {target}; request raw bytes instead",
                response.content_type.as_deref().unwrap_or("binary")
            )))
        }
        ResponseBody::Binary(_) => {
            return Err(AthenaError::Decode(format!(
                "Cannot decode binary content into {target}"
            )))
        }
        ResponseBody::Empty => return Ok(T::default()),
        ResponseBody::Text(text) if text.trim().is_empty() => return Ok(T::default()),
        ResponseBody::Text(text) => text,
    };

    let payload: Value = serde_json::from_str(text)
        .map_err(|e| AthenaError::Decode(format!("Response is not valid JSON: {e}")))?;
    if payload.is_null() {
        return Ok(T::default());
    }

    let value = match mode {
        DecodeMode::Strict => T::deserialize(&payload),
        DecodeMode::Lenient => skipping_unknown(|| T::deserialize(&payload)),
    }
    .map_err(|e| AthenaError::Decode(format!("Failed to decode {target}: {e}")))?;

    let echoed = serde_json::to_value(&value)
        .map_err(|e| AthenaError::Decode(format!("Failed to re-encode {target}: {e}")))?;
    let mut unknown = Vec::new();
    collect_unknown(&payload, &echoed, "$", &mut unknown);

    if !unknown.is_empty() {
        match mode {
            DecodeMode::Strict => {
                return Err(AthenaError::Decode(format!(
                    "Unknown member(s) for {target}: {}",
                    unknown.join(", ")
                )))
            }
            DecodeMode::Lenient => {
                tracing::debug!(
                    target_type = target,
                    members = ?unknown,
                    "Ignoring unknown response members"
                );
            }
        }
    }

    Ok(value)
}

/// Returns the body bytes unmodified
pub fn decode_bytes(response: &InboundResponse) -> Vec<u8> {
    match &response.body {
        ResponseBody::Empty => Vec::new(),
        ResponseBody::Text(text) => text.as_bytes().to_vec(),
        ResponseBody::Binary(bytes) => bytes.clone(),
    }
}

/// Records paths of non-null payload members missing from the echo
fn collect_unknown(payload: &Value, echoed: &Value, path: &str, unknown: &mut Vec<String>) {
    match (payload, echoed) {
        (Value::Object(members), Value::Object(kept)) => {
            for (key, member) in members {
                if member.is_null() {
                    continue;
                }
                let member_path = format!("{path}.{key}");
                match kept.get(key) {
                    Some(echo) => collect_unknown(member, echo, &member_path, unknown),
                    None => unknown.push(member_path),
                }
            }
        }
        (Value::Array(items), Value::Array(kept)) => {
            for (index, (item, echo)) in items.iter().zip(kept).enumerate() {
                collect_unknown(item, echo, &format!("{path}[{index}]"), unknown);
            }
        }
        _ => {}
    }
}
