// src/types/payload.rs
use crate::utils::media_type_for;

pub const PDF_MEDIA_TYPE: &str = "application/pdf";

/// A file picked by the user, with the media type reported for it
#[derive(Clone, PartialEq)]
pub struct ResumeFile {
    pub file_name: String,
    pub media_type: String,
    pub bytes: Vec<u8>,
}

impl ResumeFile {
    /// Build a file reference, reporting its media type from the name the way
    /// a browser file picker does (no content sniffing).
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let media_type = media_type_for(&file_name);
        Self {
            file_name,
            media_type,
            bytes,
        }
    }

    pub fn with_media_type(mut self, media_type: impl Into<String>) -> Self {
        self.media_type = media_type.into();
        self
    }

    pub fn is_pdf(&self) -> bool {
        self.media_type == PDF_MEDIA_TYPE
    }
}

// Resume bytes are noise in logs and test output.
impl std::fmt::Debug for ResumeFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResumeFile")
            .field("file_name", &self.file_name)
            .field("media_type", &self.media_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Everything sent to the enhancement service in one submission
#[derive(Debug, Clone, PartialEq)]
pub struct ApplicationPayload {
    pub job_description: String,
    pub company_name: String,
    pub resume: ResumeFile,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_type_reported_from_name() {
        assert!(ResumeFile::new("cv.pdf", vec![]).is_pdf());
        assert!(ResumeFile::new("CV.PDF", vec![]).is_pdf());
        assert!(!ResumeFile::new("cv.docx", vec![]).is_pdf());
        assert!(!ResumeFile::new("cv", vec![]).is_pdf());
    }

    #[test]
    fn test_reported_type_wins_over_extension() {
        let file = ResumeFile::new("cv.pdf", vec![]).with_media_type("text/plain");
        assert!(!file.is_pdf());
    }

    #[test]
    fn test_debug_hides_bytes() {
        let file = ResumeFile::new("cv.pdf", b"%PDF-1.7".to_vec());
        let debug = format!("{:?}", file);
        assert!(debug.contains("len: 8"));
        assert!(!debug.contains("37"));
    }
}
