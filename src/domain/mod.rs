//! Domain types shared by every layer of the SDK.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Strongly-typed identifiers** ([`PracticeId`])
//! - **API version selection** ([`ApiVersion`])
//! - **Error taxonomy** ([`AthenaError`])
//! - **Result type alias** ([`Result`])
//!
//! # Error Handling
//!
//! All fallible operations return [`Result<T, AthenaError>`]:
//!
//! ```rust
//! use athena_sdk::domain::{AthenaError, Result};
//!
//! fn example(err: AthenaError) -> Result<()> {
//!     match err.status() {
//!         Some(404) => Ok(()),
//!         _ => Err(err),
//!     }
//! }
//! ```

pub mod errors;
pub mod ids;
pub mod result;
pub mod version;

// Re-export commonly used types for convenience
pub use errors::AthenaError;
pub use ids::PracticeId;
pub use result::Result;
pub use version::ApiVersion;
