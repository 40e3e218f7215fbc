//! Core response-normalization and dispatch layer for AERN.
//!
//! Everything here is pure: no I/O, no remote calls. The client and web
//! crates feed raw JSON responses and user input through these functions.

pub mod dispatch;
pub mod envelope;
pub mod fields;

pub use dispatch::{
    DispatchError, InputRecord, Modality, SubmissionPlan, TableSet, plan_combined, plan_single,
};
pub use envelope::{Envelope, FieldMap, normalize, resolve_upload_uri};
pub use fields::{extract_text, lookup};
