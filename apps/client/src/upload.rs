//! Upload validation: gates the analysis submitter.
//!
//! Constraints are enforced in two places, matching when the user can observe
//! them: type and size at selection time (an invalid file never occupies the
//! slot), file/role presence at submit time.

use bytes::Bytes;

use crate::errors::ValidationError;

/// The only accepted document type.
pub const ALLOWED_MIME: &str = "application/pdf";

/// 5 MiB ceiling, matching the backend's request size limit.
pub const MAX_UPLOAD_BYTES: u64 = 5 * 1024 * 1024;

/// A file the user picked, before validation.
#[derive(Debug, Clone)]
pub struct UploadCandidate {
    pub file_name: String,
    /// Declared MIME type; must equal [`ALLOWED_MIME`] exactly.
    pub declared_type: String,
    pub bytes: Bytes,
}

impl UploadCandidate {
    pub fn size_bytes(&self) -> u64 {
        self.bytes.len() as u64
    }
}

/// A candidate that passed all four checks, ready for submission.
#[derive(Debug)]
pub struct ValidCandidate {
    pub candidate: UploadCandidate,
    pub job_role: String,
}

/// Holds the current file selection and role choice. Each new selection
/// replaces the previous one; a failed selection clears the slot so a stale
/// invalid file cannot be resubmitted.
#[derive(Debug, Default)]
pub struct UploadForm {
    candidate: Option<UploadCandidate>,
    selected_role: Option<String>,
}

impl UploadForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates type and size and stores the candidate. On failure the slot
    /// is left empty and the error's `Display` is the user-facing message.
    pub fn select_file(
        &mut self,
        candidate: UploadCandidate,
    ) -> Result<&UploadCandidate, ValidationError> {
        self.candidate = None;
        if candidate.declared_type != ALLOWED_MIME {
            return Err(ValidationError::UnsupportedType);
        }
        if candidate.size_bytes() > MAX_UPLOAD_BYTES {
            return Err(ValidationError::TooLarge);
        }
        Ok(self.candidate.insert(candidate))
    }

    pub fn select_role(&mut self, role: impl Into<String>) {
        self.selected_role = Some(role.into());
    }

    pub fn selected_file(&self) -> Option<&UploadCandidate> {
        self.candidate.as_ref()
    }

    pub fn selected_role(&self) -> Option<&str> {
        self.selected_role.as_deref()
    }

    /// Final pre-submission check. Consumes the stored file on success so a
    /// completed submission cannot be replayed; a missing role leaves the
    /// file in place for the user to retry after picking one.
    pub fn take_validated(&mut self) -> Result<ValidCandidate, ValidationError> {
        if self.candidate.is_none() {
            return Err(ValidationError::MissingFile);
        }
        let Some(job_role) = self.selected_role.clone() else {
            return Err(ValidationError::MissingRole);
        };
        let Some(candidate) = self.candidate.take() else {
            return Err(ValidationError::MissingFile);
        };
        Ok(ValidCandidate {
            candidate,
            job_role,
        })
    }

    /// Discards both the file selection and the role choice.
    pub fn reset(&mut self) {
        self.candidate = None;
        self.selected_role = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pdf(size: usize) -> UploadCandidate {
        UploadCandidate {
            file_name: "resume.pdf".to_string(),
            declared_type: ALLOWED_MIME.to_string(),
            bytes: Bytes::from(vec![0u8; size]),
        }
    }

    #[test]
    fn accepts_a_small_pdf() {
        let mut form = UploadForm::new();
        assert!(form.select_file(pdf(1024)).is_ok());
        assert!(form.selected_file().is_some());
    }

    #[test]
    fn rejects_non_pdf_and_clears_the_slot() {
        let mut form = UploadForm::new();
        form.select_file(pdf(16)).unwrap();

        let mut doc = pdf(16);
        doc.file_name = "resume.docx".to_string();
        doc.declared_type =
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document".to_string();

        let err = form.select_file(doc).unwrap_err();
        assert_eq!(err, ValidationError::UnsupportedType);
        // the previously valid file must not survive a failed reselection
        assert!(form.selected_file().is_none());
    }

    #[test]
    fn rejects_a_six_megabyte_pdf_named_resume_pdf() {
        let mut form = UploadForm::new();
        let err = form.select_file(pdf(6 * 1024 * 1024)).unwrap_err();
        assert_eq!(err, ValidationError::TooLarge);
        assert_eq!(err.to_string(), "File is too large (max 5MB)");
        assert!(form.selected_file().is_none());
    }

    #[test]
    fn exactly_five_mib_is_allowed() {
        let mut form = UploadForm::new();
        assert!(form.select_file(pdf(5 * 1024 * 1024)).is_ok());
        assert!(form
            .select_file(pdf(5 * 1024 * 1024 + 1))
            .is_err());
    }

    #[test]
    fn submit_requires_file_then_role() {
        let mut form = UploadForm::new();
        assert_eq!(
            form.take_validated().unwrap_err(),
            ValidationError::MissingFile
        );

        form.select_file(pdf(64)).unwrap();
        assert_eq!(
            form.take_validated().unwrap_err(),
            ValidationError::MissingRole
        );
        // the file survives a missing-role rejection
        assert!(form.selected_file().is_some());

        form.select_role("Data Analyst");
        let valid = form.take_validated().unwrap();
        assert_eq!(valid.job_role, "Data Analyst");
        // but is consumed by a successful validation
        assert!(form.selected_file().is_none());
    }

    #[test]
    fn reset_discards_everything() {
        let mut form = UploadForm::new();
        form.select_file(pdf(64)).unwrap();
        form.select_role("Web Developer");
        form.reset();
        assert!(form.selected_file().is_none());
        assert!(form.selected_role().is_none());
    }
}
