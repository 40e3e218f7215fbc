//! The per-submission flow: collect form input, stage and upload binary
//! attachments, dispatch to the right table, and normalize the result.
//!
//! Every failure is converted at the boundary that produced it into an
//! inline, human-readable message; nothing propagates past the current
//! submission and nothing is retried automatically.

use axum::extract::Multipart;
use axum::http::StatusCode;
use serde::Serialize;
use serde_json::Value;
use tracing::warn;

use aern_client::{ClientError, JamClient};
use aern_core::{
    DispatchError, InputRecord, Modality, TableSet, extract_text, normalize, plan_combined,
    plan_single,
};

const NO_DESCRIPTION: &str = "No description generated";
const NO_SUMMARY: &str = "No summary generated";

/// A successfully analyzed submission.
#[derive(Debug, Serialize, PartialEq)]
pub struct AnalysisReport {
    pub description: String,
    pub summary: String,
    pub warnings: Vec<String>,
}

/// An inline-reported failure; the submission is over, resubmitting is the
/// only recovery.
#[derive(Debug)]
pub struct Failure {
    pub status: StatusCode,
    pub error: String,
    pub warnings: Vec<String>,
}

impl Failure {
    fn user(message: &str) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error: message.to_string(),
            warnings: Vec::new(),
        }
    }

    fn from_client(modality: Modality, err: &ClientError) -> Self {
        Self {
            status: status_for(err),
            error: upload_failure_message(modality, err),
            warnings: Vec::new(),
        }
    }
}

/// An uploaded blob as received from the form: original name plus bytes.
pub struct UploadedBlob {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Collected form fields for either submission mode.
#[derive(Default)]
pub struct SubmissionForm {
    pub modality: Option<String>,
    pub text: Option<String>,
    pub audio: Option<UploadedBlob>,
    pub photo: Option<UploadedBlob>,
}

/// Drain a multipart body into a [`SubmissionForm`]. Blank text and empty
/// file parts count as absent.
pub async fn read_form(mut multipart: Multipart) -> Result<SubmissionForm, Failure> {
    let mut form = SubmissionForm::default();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| Failure::user(&format!("Invalid form data: {e}")))?
    {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };
        match name.as_str() {
            "modality" => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| Failure::user(&format!("Invalid form data: {e}")))?;
                form.modality = Some(value);
            }
            "text" => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| Failure::user(&format!("Invalid form data: {e}")))?;
                if !value.trim().is_empty() {
                    form.text = Some(value);
                }
            }
            "audio" | "photo" => {
                let file_name = field
                    .file_name()
                    .unwrap_or("attachment")
                    .to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| Failure::user(&format!("Invalid form data: {e}")))?;
                if bytes.is_empty() {
                    continue;
                }
                let blob = UploadedBlob {
                    file_name,
                    bytes: bytes.to_vec(),
                };
                if name == "audio" {
                    form.audio = Some(blob);
                } else {
                    form.photo = Some(blob);
                }
            }
            _ => {}
        }
    }
    Ok(form)
}

/// Single-modality analysis: exactly one input, routed to its dedicated
/// table. A binary modality without a resolved URI blocks the submission.
pub async fn analyze_single(
    client: &JamClient,
    tables: &TableSet,
    form: SubmissionForm,
) -> Result<AnalysisReport, Failure> {
    let Some(modality) = form.modality.as_deref().and_then(Modality::from_column) else {
        return Err(Failure::user("Select an input type."));
    };

    let value = match modality {
        Modality::Text => form
            .text
            .ok_or_else(|| Failure::user("Describe the emergency situation before submitting."))?,
        Modality::Audio => {
            let blob = form
                .audio
                .ok_or_else(|| Failure::user("Upload an audio recording before submitting."))?;
            upload(client, modality, &blob).await?
        }
        Modality::Photo => {
            let blob = form
                .photo
                .ok_or_else(|| Failure::user("Upload a scene photo before submitting."))?;
            upload(client, modality, &blob).await?
        }
    };

    let plan = plan_single(tables, modality, value);
    let envelope = insert_row(client, &plan.table_id, &plan.record, Vec::new()).await?;
    Ok(report(&envelope, Vec::new()))
}

/// Multi-modality fusion: any non-empty subset of inputs, one combined
/// table. A failed binary upload drops that modality with a warning
/// instead of failing the whole submission.
pub async fn analyze_fusion(
    client: &JamClient,
    tables: &TableSet,
    form: SubmissionForm,
) -> Result<AnalysisReport, Failure> {
    if form.text.is_none() && form.audio.is_none() && form.photo.is_none() {
        return Err(Failure::user("Please provide at least one input."));
    }

    let mut record = InputRecord::new();
    let mut warnings = Vec::new();

    if let Some(text) = form.text {
        record.insert(Modality::Text, text);
    }
    for (modality, blob) in [(Modality::Audio, form.audio), (Modality::Photo, form.photo)] {
        let Some(blob) = blob else { continue };
        match client.upload_attachment(&blob.file_name, &blob.bytes).await {
            Ok(uri) => record.insert(modality, uri),
            Err(err) => {
                warn!(modality = %modality, error = %err, "dropping modality from fusion record");
                warnings.push(fusion_warning(modality, &err));
            }
        }
    }

    let plan = match plan_combined(tables, record) {
        Ok(plan) => plan,
        Err(err @ DispatchError::NoInput) => {
            // Every provided input failed to upload; nothing left to send.
            return Err(Failure {
                status: StatusCode::BAD_GATEWAY,
                error: err.to_string(),
                warnings,
            });
        }
    };

    let envelope = insert_row(client, &plan.table_id, &plan.record, warnings.clone()).await?;
    Ok(report(&envelope, warnings))
}

async fn upload(
    client: &JamClient,
    modality: Modality,
    blob: &UploadedBlob,
) -> Result<String, Failure> {
    client
        .upload_attachment(&blob.file_name, &blob.bytes)
        .await
        .map_err(|err| Failure::from_client(modality, &err))
}

async fn insert_row(
    client: &JamClient,
    table_id: &str,
    record: &InputRecord,
    warnings: Vec<String>,
) -> Result<Value, Failure> {
    client.add_row(table_id, record).await.map_err(|err| Failure {
        status: status_for(&err),
        error: format!("An error occurred: {err}"),
        warnings,
    })
}

/// Normalize the insertion response and pull out the two display fields.
/// A shape mismatch is not fatal: both fields fall back to their defaults.
fn report(envelope: &Value, warnings: Vec<String>) -> AnalysisReport {
    let fields = normalize(Some(envelope));
    AnalysisReport {
        description: extract_text(&fields, "description", NO_DESCRIPTION),
        summary: extract_text(&fields, "summary", NO_SUMMARY),
        warnings,
    }
}

/// Message for an upload failure that blocks a single-modality submission.
fn upload_failure_message(modality: Modality, err: &ClientError) -> String {
    match err {
        ClientError::Staging(e) => format!("Error saving uploaded file: {e}"),
        ClientError::MissingUri => "Upload succeeded but no URI was returned.".to_string(),
        other => format!("{} upload failed: {other}", modality.label()),
    }
}

/// Warning for a dropped modality in fusion mode.
fn fusion_warning(modality: Modality, err: &ClientError) -> String {
    match err {
        ClientError::MissingUri => format!("{} uploaded but no uri returned.", modality.label()),
        ClientError::Staging(e) => format!("Error saving uploaded file: {e}"),
        other => format!("{} upload failed: {other}", modality.label()),
    }
}

fn status_for(err: &ClientError) -> StatusCode {
    match err {
        ClientError::Staging(_) => StatusCode::INTERNAL_SERVER_ERROR,
        ClientError::MissingCredentials(_) => StatusCode::INTERNAL_SERVER_ERROR,
        _ => StatusCode::BAD_GATEWAY,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn report_extracts_fields_from_row_envelope() {
        let envelope = json!({"row": {"description": "Gas leak", "summary": "Evacuate block"}});
        let out = report(&envelope, Vec::new());
        assert_eq!(out.description, "Gas leak");
        assert_eq!(out.summary, "Evacuate block");
        assert!(out.warnings.is_empty());
    }

    #[test]
    fn report_falls_back_to_defaults_on_shape_mismatch() {
        let out = report(&json!("unexpected"), vec!["Audio uploaded but no uri returned.".into()]);
        assert_eq!(out.description, NO_DESCRIPTION);
        assert_eq!(out.summary, NO_SUMMARY);
        assert_eq!(out.warnings.len(), 1);
    }

    #[test]
    fn missing_uri_message_is_distinct_from_transport_failure() {
        let missing = upload_failure_message(Modality::Audio, &ClientError::MissingUri);
        assert_eq!(missing, "Upload succeeded but no URI was returned.");

        let transport = upload_failure_message(
            Modality::Audio,
            &ClientError::Api {
                status: 503,
                body: "unavailable".into(),
            },
        );
        assert!(transport.starts_with("Audio upload failed:"), "{transport}");
    }

    #[test]
    fn fusion_warning_names_the_modality() {
        let w = fusion_warning(Modality::Photo, &ClientError::MissingUri);
        assert_eq!(w, "Photo uploaded but no uri returned.");
    }

    #[test]
    fn remote_errors_map_to_bad_gateway() {
        let err = ClientError::Api {
            status: 500,
            body: "boom".into(),
        };
        assert_eq!(status_for(&err), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn staging_errors_stay_local() {
        let err = ClientError::Staging(std::io::Error::other("disk full"));
        assert_eq!(status_for(&err), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
