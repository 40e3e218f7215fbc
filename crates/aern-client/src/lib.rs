//! Remote client for the JamAI table service: credentials, attachment
//! staging, file upload, and row insertion.

pub mod client;
pub mod config;
pub mod error;
pub mod stage;

pub use client::JamClient;
pub use config::{Credentials, api_base_from_env, tables_from_env};
pub use error::ClientError;
pub use stage::stage_attachment;
