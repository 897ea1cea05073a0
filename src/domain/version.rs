//! API version selection

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// API version prefix placed in front of every request path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiVersion {
    /// Production API (`v1`)
    #[default]
    V1,
    /// Preview sandbox (`preview1`)
    Preview1,
}

impl ApiVersion {
    /// Path segment for this version
    pub fn as_str(self) -> &'static str {
        match self {
            ApiVersion::V1 => "v1",
            ApiVersion::Preview1 => "preview1",
        }
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApiVersion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "v1" => Ok(ApiVersion::V1),
            "preview1" => Ok(ApiVersion::Preview1),
            other => Err(format!(
                "Unsupported API version '{other}'. Must be one of: v1, preview1"
            )),
        }
    }
}
