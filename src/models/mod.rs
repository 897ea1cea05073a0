//! Request and response shapes for the athenaNet endpoints
//!
//! - [`enums`] - wire-string enumerations and the [`wire_enum!`](crate::wire_enum) macro
//! - [`converters`] - serde helpers for ids, `MM/dd/yyyy` dates and string booleans
//! - [`request`] - filters and bodies with their descriptor tables
//! - [`response`] - decoded payloads

pub mod converters;
pub mod enums;
pub mod request;
pub mod response;

pub use converters::ExternalId;
pub use enums::{
    AppointmentStatus, DocumentStatus, DocumentSubclass, InsuranceSequence, PatientStatus,
    PrescriptionStatus, Sex, WireEnum,
};
