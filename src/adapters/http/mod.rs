//! Raw HTTP plumbing
//!
//! Requests and responses are plain values so any transport can sit behind
//! the [`HttpExecutor`] trait. [`ReqwestExecutor`] is the default.

pub mod executor;
pub mod request;
pub mod response;

pub use executor::{HttpExecutor, ReqwestExecutor};
pub use request::{Attachment, Authorization, HttpMethod, MultipartForm, OutboundRequest, RequestBody};
pub use response::{is_binary_content_type, InboundResponse, ResponseBody};
