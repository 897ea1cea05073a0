//! Domain identifier types with validation
//!
//! Newtype wrappers for the identifiers that shape every request path.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Practice identifier newtype wrapper
///
/// Every practice-scoped endpoint lives under `/{version}/{practiceid}/...`.
///
/// # Examples
///
/// ```
/// use athena_sdk::domain::ids::PracticeId;
/// use std::str::FromStr;
///
/// let practice_id = PracticeId::from_str("195900").unwrap();
/// assert_eq!(practice_id.get(), 195900);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct PracticeId(u32);

impl PracticeId {
    /// Practice ID of the public preview sandbox
    pub const SANDBOX: PracticeId = PracticeId(195900);

    /// Creates a new PracticeId
    ///
    /// # Errors
    ///
    /// Returns `Err` for zero, which the API never assigns
    pub fn new(id: u32) -> Result<Self, String> {
        if id == 0 {
            return Err("Practice ID must be a positive integer".to_string());
        }
        Ok(Self(id))
    }

    /// Returns the numeric value
    pub fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for PracticeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PracticeId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id: u32 = s
            .trim()
            .parse()
            .map_err(|e| format!("Invalid practice ID '{s}': {e}"))?;
        Self::new(id)
    }
}

impl TryFrom<u32> for PracticeId {
    type Error = String;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PracticeId> for u32 {
    fn from(id: PracticeId) -> Self {
        id.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_practice_id_valid() {
        let id = PracticeId::new(195900).unwrap();
        assert_eq!(id.to_string(), "195900");
    }

    #[test]
    fn test_practice_id_zero_rejected() {
        assert!(PracticeId::new(0).is_err());
        assert!(PracticeId::from_str("0").is_err());
    }

    #[test]
    fn test_practice_id_from_str_invalid() {
        assert!(PracticeId::from_str("abc").is_err());
        assert!(PracticeId::from_str("").is_err());
        assert_eq!(PracticeId::from_str(" 42 ").unwrap().get(), 42);
    }

    #[test]
    fn test_practice_id_serde() {
        let id: PracticeId = serde_json::from_str("1959").unwrap();
        assert_eq!(id.get(), 1959);
        assert!(serde_json::from_str::<PracticeId>("0").is_err());
        assert_eq!(serde_json::to_string(&id).unwrap(), "1959");
    }
}
