//! PDF text extraction over lopdf

use crate::error::IngestError;
use lopdf::Document;
use tracing::debug;

/// Extracts plain text from PDF byte streams.
///
/// Pages are walked in page order and their text appended directly, with no
/// separator between pages. That can fuse the last word of one page with the
/// first word of the next; an accepted approximation of the source layout,
/// not an error.
///
/// Parsing is CPU-bound; callers on an async executor should move
/// [`extract`](PdfExtractor::extract) onto a blocking thread.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfExtractor;

impl PdfExtractor {
    /// Create a new extractor
    pub fn new() -> Self {
        Self
    }

    /// Extract the text of every page, concatenated in page order.
    ///
    /// # Errors
    ///
    /// Returns [`IngestError::UnreadablePdf`] when the byte stream cannot be
    /// parsed as a PDF at all. A page whose text cannot be decoded (a scanned
    /// image with no OCR layer, an unsupported encoding) contributes nothing
    /// and does not fail the extraction.
    pub fn extract(&self, bytes: &[u8]) -> Result<String, IngestError> {
        let document =
            Document::load_mem(bytes).map_err(|e| IngestError::UnreadablePdf(e.to_string()))?;

        let mut text = String::new();
        for (page_number, _) in document.get_pages() {
            match document.extract_text(&[page_number]) {
                Ok(page_text) => text.push_str(&page_text),
                Err(e) => {
                    debug!("Page {} produced no text: {}", page_number, e);
                }
            }
        }

        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::content::{Content, Operation};
    use lopdf::{dictionary, Object, Stream};

    // Build a real PDF in memory with one page per entry in `pages_text`.
    fn pdf_with_pages(pages_text: &[&str]) -> Vec<u8> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! { "F1" => font_id },
        });

        let mut kids: Vec<Object> = Vec::new();
        for text in pages_text {
            let content = Content {
                operations: vec![
                    Operation::new("BT", vec![]),
                    Operation::new("Tf", vec!["F1".into(), 12.into()]),
                    Operation::new("Td", vec![72.into(), 720.into()]),
                    Operation::new("Tj", vec![Object::string_literal(*text)]),
                    Operation::new("ET", vec![]),
                ],
            };
            let content_id =
                doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
                "Resources" => resources_id,
                "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
            });
            kids.push(page_id.into());
        }

        let kids_len = kids.len() as i64;
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => kids_len,
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut buf = Vec::new();
        doc.save_to(&mut buf).unwrap();
        buf
    }

    #[test]
    fn test_single_page_text() {
        let bytes = pdf_with_pages(&["This agreement covers liability."]);
        let text = PdfExtractor::new().extract(&bytes).unwrap();
        assert!(text.contains("This agreement covers liability."));
    }

    #[test]
    fn test_pages_concatenated_in_order() {
        let bytes = pdf_with_pages(&["first page here", "second page here", "third page here"]);
        let text = PdfExtractor::new().extract(&bytes).unwrap();

        let first = text.find("first page here").unwrap();
        let second = text.find("second page here").unwrap();
        let third = text.find("third page here").unwrap();
        assert!(first < second && second < third);
    }

    #[test]
    fn test_no_separator_beyond_page_text() {
        // The extractor's output must equal the per-page texts joined with
        // nothing in between: whatever each page yields, and only that.
        let bytes = pdf_with_pages(&["alpha", "beta"]);
        let document = Document::load_mem(&bytes).unwrap();
        let expected: String = document
            .get_pages()
            .keys()
            .map(|page| document.extract_text(&[*page]).unwrap_or_default())
            .collect();

        let text = PdfExtractor::new().extract(&bytes).unwrap();
        assert_eq!(text, expected);
    }

    #[test]
    fn test_corrupt_bytes_rejected() {
        let result = PdfExtractor::new().extract(b"this is not a pdf at all");
        assert!(matches!(result, Err(IngestError::UnreadablePdf(_))));
    }

    #[test]
    fn test_empty_bytes_rejected() {
        let result = PdfExtractor::new().extract(&[]);
        assert!(matches!(result, Err(IngestError::UnreadablePdf(_))));
    }
}
