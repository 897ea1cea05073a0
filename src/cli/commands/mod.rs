//! CLI command implementations
//!
//! Each command returns its process exit code: 0 on success, 1 when the API
//! call fails, 2 for configuration errors and 5 for fatal errors.

pub mod fetch;
pub mod init;
pub mod validate;
