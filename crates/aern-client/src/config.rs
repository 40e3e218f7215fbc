//! Process-wide configuration: JamAI credentials, API base URL, and the
//! four table targets.
//!
//! Everything is read from the environment exactly once at startup and
//! passed down explicitly; there is no global lookup after that.

use std::env;

use aern_core::TableSet;

use crate::error::ClientError;

pub const ENV_PROJECT_ID: &str = "JAMAI_PROJECT_ID";
pub const ENV_PAT_KEY: &str = "JAMAI_PAT_KEY";
pub const ENV_API_BASE: &str = "JAMAI_API_BASE";

pub const DEFAULT_API_BASE: &str = "https://api.jamaibase.com";

/// Table-target overrides; defaults match the deployed action tables.
pub const ENV_TABLE_TEXT: &str = "AERN_TABLE_TEXT";
pub const ENV_TABLE_AUDIO: &str = "AERN_TABLE_AUDIO";
pub const ENV_TABLE_PHOTO: &str = "AERN_TABLE_PHOTO";
pub const ENV_TABLE_COMBINED: &str = "AERN_TABLE_COMBINED";

pub const DEFAULT_TABLE_TEXT: &str = "text_received";
pub const DEFAULT_TABLE_AUDIO: &str = "audio_receive";
pub const DEFAULT_TABLE_PHOTO: &str = "picture_receipt";
pub const DEFAULT_TABLE_COMBINED: &str = "combined";

/// JamAI project id and personal access token.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub project_id: String,
    pub pat_key: String,
}

impl Credentials {
    /// Load credentials from `JAMAI_PROJECT_ID` / `JAMAI_PAT_KEY`.
    ///
    /// Either one absent or blank after trimming halts startup — there is
    /// nothing useful this application can do without them.
    pub fn from_env() -> Result<Self, ClientError> {
        Self::from_values(env::var(ENV_PROJECT_ID).ok(), env::var(ENV_PAT_KEY).ok())
    }

    /// Build credentials from raw values, trimming and rejecting blanks.
    pub fn from_values(
        project_id: Option<String>,
        pat_key: Option<String>,
    ) -> Result<Self, ClientError> {
        let project_id = non_blank(project_id)
            .ok_or(ClientError::MissingCredentials(ENV_PROJECT_ID))?;
        let pat_key = non_blank(pat_key).ok_or(ClientError::MissingCredentials(ENV_PAT_KEY))?;
        Ok(Self {
            project_id,
            pat_key,
        })
    }
}

/// API base URL from `JAMAI_API_BASE`, defaulting to the hosted service.
/// Trailing slashes are stripped so paths can be appended directly.
pub fn api_base_from_env() -> String {
    non_blank(env::var(ENV_API_BASE).ok())
        .unwrap_or_else(|| DEFAULT_API_BASE.to_string())
        .trim_end_matches('/')
        .to_string()
}

/// The four table targets, each overridable via environment.
pub fn tables_from_env() -> TableSet {
    TableSet {
        text: env_or(ENV_TABLE_TEXT, DEFAULT_TABLE_TEXT),
        audio: env_or(ENV_TABLE_AUDIO, DEFAULT_TABLE_AUDIO),
        photo: env_or(ENV_TABLE_PHOTO, DEFAULT_TABLE_PHOTO),
        combined: env_or(ENV_TABLE_COMBINED, DEFAULT_TABLE_COMBINED),
    }
}

fn env_or(key: &str, default: &str) -> String {
    non_blank(env::var(key).ok()).unwrap_or_else(|| default.to_string())
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credentials_are_trimmed() {
        let creds =
            Credentials::from_values(Some("  proj-1  ".into()), Some("\tpat-abc\n".into()))
                .unwrap();
        assert_eq!(creds.project_id, "proj-1");
        assert_eq!(creds.pat_key, "pat-abc");
    }

    #[test]
    fn blank_project_id_is_rejected() {
        let err = Credentials::from_values(Some("   ".into()), Some("pat".into())).unwrap_err();
        assert!(matches!(
            err,
            ClientError::MissingCredentials(ENV_PROJECT_ID)
        ));
    }

    #[test]
    fn missing_pat_key_is_rejected() {
        let err = Credentials::from_values(Some("proj".into()), None).unwrap_err();
        assert!(matches!(err, ClientError::MissingCredentials(ENV_PAT_KEY)));
    }

    #[test]
    fn both_blank_reports_project_id_first() {
        let err = Credentials::from_values(Some("".into()), Some("".into())).unwrap_err();
        assert!(matches!(
            err,
            ClientError::MissingCredentials(ENV_PROJECT_ID)
        ));
    }
}
