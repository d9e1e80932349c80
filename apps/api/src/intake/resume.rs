//! Resume text extraction for uploaded files.

use bytes::Bytes;
use thiserror::Error;
use tracing::debug;

const PDF_MAGIC: &[u8] = b"%PDF";

#[derive(Debug, Error)]
pub enum ResumeError {
    #[error("Unsupported resume format: {0}")]
    UnsupportedFormat(String),

    #[error("Could not read PDF: {0}")]
    Pdf(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ResumeFormat {
    Pdf,
    PlainText,
}

/// An uploaded resume, as received from the multipart form.
#[derive(Debug, Clone)]
pub struct ResumeUpload {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub data: Bytes,
}

/// Extracts the text of an uploaded resume.
///
/// PDFs are parsed on a blocking thread; a panic inside the PDF parser is
/// reported as `ResumeError::Pdf`.
pub async fn extract_resume_text(upload: ResumeUpload) -> Result<String, ResumeError> {
    let format = detect_format(&upload)?;
    debug!(
        "Extracting resume text: format={:?}, bytes={}",
        format,
        upload.data.len()
    );

    match format {
        ResumeFormat::PlainText => Ok(String::from_utf8_lossy(&upload.data).into_owned()),
        ResumeFormat::Pdf => {
            let data = upload.data;
            tokio::task::spawn_blocking(move || {
                pdf_extract::extract_text_from_mem(&data).map_err(|e| e.to_string())
            })
            .await
            .map_err(|e| ResumeError::Pdf(format!("extraction aborted: {e}")))?
            .map_err(ResumeError::Pdf)
        }
    }
}

fn detect_format(upload: &ResumeUpload) -> Result<ResumeFormat, ResumeError> {
    let content_type = upload
        .content_type
        .as_deref()
        .map(|ct| ct.to_ascii_lowercase())
        .unwrap_or_default();
    let extension = upload
        .file_name
        .as_deref()
        .and_then(|name| name.rsplit_once('.'))
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();

    if upload.data.starts_with(PDF_MAGIC)
        || content_type == "application/pdf"
        || extension == "pdf"
    {
        return Ok(ResumeFormat::Pdf);
    }

    if content_type.starts_with("text/") || matches!(extension.as_str(), "txt" | "md") {
        return Ok(ResumeFormat::PlainText);
    }

    let described = upload
        .file_name
        .clone()
        .or_else(|| upload.content_type.clone())
        .unwrap_or_else(|| "unknown".to_string());
    Err(ResumeError::UnsupportedFormat(described))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn upload(file_name: Option<&str>, content_type: Option<&str>, data: &'static [u8]) -> ResumeUpload {
        ResumeUpload {
            file_name: file_name.map(String::from),
            content_type: content_type.map(String::from),
            data: Bytes::from_static(data),
        }
    }

    #[test]
    fn test_detects_pdf_by_magic() {
        let u = upload(Some("resume"), None, b"%PDF-1.7\n...");
        assert_eq!(detect_format(&u).unwrap(), ResumeFormat::Pdf);
    }

    #[test]
    fn test_detects_pdf_by_content_type_and_extension() {
        let u = upload(None, Some("application/pdf"), b"");
        assert_eq!(detect_format(&u).unwrap(), ResumeFormat::Pdf);
        let u = upload(Some("Resume.PDF"), None, b"");
        assert_eq!(detect_format(&u).unwrap(), ResumeFormat::Pdf);
    }

    #[test]
    fn test_detects_plain_text() {
        let u = upload(Some("resume.txt"), None, b"Rust engineer");
        assert_eq!(detect_format(&u).unwrap(), ResumeFormat::PlainText);
        let u = upload(Some("cv"), Some("text/markdown"), b"# CV");
        assert_eq!(detect_format(&u).unwrap(), ResumeFormat::PlainText);
    }

    #[test]
    fn test_rejects_unknown_format() {
        let u = upload(Some("resume.docx"), Some("application/octet-stream"), b"PK\x03\x04");
        assert!(matches!(
            detect_format(&u),
            Err(ResumeError::UnsupportedFormat(name)) if name == "resume.docx"
        ));
    }

    #[tokio::test]
    async fn test_extracts_plain_text() {
        let u = upload(Some("resume.txt"), Some("text/plain"), b"Ten years of Rust.");
        assert_eq!(extract_resume_text(u).await.unwrap(), "Ten years of Rust.");
    }

    #[tokio::test]
    async fn test_invalid_utf8_is_replaced_not_rejected() {
        let u = upload(Some("resume.txt"), None, b"Rust \xff engineer");
        assert_eq!(extract_resume_text(u).await.unwrap(), "Rust \u{fffd} engineer");
    }

    #[tokio::test]
    async fn test_corrupt_pdf_is_an_error() {
        let u = upload(Some("resume.pdf"), Some("application/pdf"), b"%PDF-1.4 garbage");
        assert!(matches!(
            extract_resume_text(u).await,
            Err(ResumeError::Pdf(_))
        ));
    }
}
