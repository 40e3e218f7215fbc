use thiserror::Error;

/// Failures from the remote client, ordered roughly by severity.
///
/// `MissingCredentials` is fatal at startup; everything else aborts only
/// the submission (or the single modality) that produced it.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("missing credential: set {0}")]
    MissingCredentials(&'static str),

    #[error("failed to stage attachment: {0}")]
    Staging(#[from] std::io::Error),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server returned {status}: {body}")]
    Api { status: u16, body: String },

    /// Upload succeeded at the transport level but the response carried
    /// no usable content reference.
    #[error("upload succeeded but no URI was returned")]
    MissingUri,

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}
