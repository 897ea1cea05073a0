//! athenaNet API core
//!
//! Token handling, parameter encoding, response decoding and error
//! translation, composed by [`Connection`]. Facades in [`crate::clients`]
//! only build paths and filters and call into this layer.

pub mod connection;
pub mod decoder;
pub mod encoder;
pub mod token;
pub mod translator;

pub use connection::{Call, Connection};
pub use decoder::DecodeMode;
pub use encoder::{DateFormat, FieldDescriptor, FieldValue, Paging, RequestShape};
pub use token::{AccessToken, Credentials, TokenManager};
pub use translator::SoftFailure;
