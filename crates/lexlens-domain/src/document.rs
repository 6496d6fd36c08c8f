//! Uploaded document - the input to one pipeline run

/// A raw document upload: original filename plus the byte content.
///
/// Instances are transient; they exist only for the duration of one request
/// and are consumed by text extraction. Construction validates the filename,
/// so a non-`.pdf` upload never reaches any pipeline stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedDocument {
    /// Original filename as supplied by the uploader
    pub filename: String,

    /// Raw file content
    pub bytes: Vec<u8>,
}

impl UploadedDocument {
    /// Create a new document, enforcing the `.pdf` filename rule.
    ///
    /// The suffix match is case-sensitive: `contract.PDF` is rejected.
    ///
    /// # Examples
    ///
    /// ```
    /// use lexlens_domain::UploadedDocument;
    ///
    /// let doc = UploadedDocument::new("contract.pdf", vec![1, 2, 3]).unwrap();
    /// assert_eq!(doc.filename, "contract.pdf");
    ///
    /// assert!(UploadedDocument::new("notes.txt", vec![]).is_err());
    /// ```
    pub fn new(filename: impl Into<String>, bytes: Vec<u8>) -> Result<Self, String> {
        let filename = filename.into();
        if !filename.ends_with(".pdf") {
            return Err(format!(
                "Only PDF files are supported (got '{}')",
                filename
            ));
        }
        Ok(Self { filename, bytes })
    }
}
