//! Attachment staging: persist an in-memory upload to a temporary file so
//! it can be handed to the file-upload API.

use std::io::Write;

use tempfile::NamedTempFile;

use crate::error::ClientError;

/// Write an uploaded blob to a fresh temporary file whose suffix matches
/// the original filename's extension (no suffix when there is none).
///
/// Ownership of the handle transfers to the caller; the file is removed
/// when the handle is dropped, whatever the upload's outcome. Deletion
/// failures at that point are swallowed, not surfaced.
pub fn stage_attachment(file_name: &str, bytes: &[u8]) -> Result<NamedTempFile, ClientError> {
    let mut builder = tempfile::Builder::new();
    let suffix = file_name
        .rsplit_once('.')
        .map(|(_, ext)| format!(".{ext}"));
    if let Some(suffix) = &suffix {
        builder.suffix(suffix.as_str());
    }

    let mut file = builder.tempfile()?;
    file.write_all(bytes)?;
    file.flush()?;
    Ok(file)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suffix_follows_extension() {
        let staged = stage_attachment("scene.jpg", b"fake image").unwrap();
        let path = staged.path().to_string_lossy().into_owned();
        assert!(path.ends_with(".jpg"), "expected .jpg suffix, got {path}");
    }

    #[test]
    fn last_extension_wins_for_multi_dot_names() {
        let staged = stage_attachment("recording.backup.wav", b"riff").unwrap();
        let path = staged.path().to_string_lossy().into_owned();
        assert!(path.ends_with(".wav"), "expected .wav suffix, got {path}");
    }

    #[test]
    fn no_extension_means_no_suffix() {
        let staged = stage_attachment("README", b"text").unwrap();
        let name = staged
            .path()
            .file_name()
            .unwrap()
            .to_string_lossy()
            .into_owned();
        assert!(!name.contains('.'), "expected no suffix, got {name}");
    }

    #[test]
    fn contents_are_written() {
        let staged = stage_attachment("note.txt", b"emergency at dock 4").unwrap();
        let contents = std::fs::read(staged.path()).unwrap();
        assert_eq!(contents, b"emergency at dock 4");
    }

    #[test]
    fn drop_removes_the_file() {
        let staged = stage_attachment("clip.mp3", b"id3").unwrap();
        let path = staged.path().to_path_buf();
        assert!(path.exists());
        drop(staged);
        assert!(!path.exists());
    }
}
