//! PDF text extraction

use lopdf::Document;
use std::panic::{self, AssertUnwindSafe};

use crate::error::{Error, Result};

/// Text pulled from every page of a PDF
#[derive(Debug, Clone)]
pub struct ExtractedPdf {
    /// Concatenated text of all pages
    pub text: String,
    /// Number of pages in the document
    pub page_count: usize,
}

/// PDF parser used by the document Q&A endpoint
pub struct PdfExtractor;

impl PdfExtractor {
    /// The only content type accepted for document Q&A
    pub const CONTENT_TYPE: &'static str = "application/pdf";

    /// Check the client-declared content type of an upload
    pub fn check_content_type(content_type: Option<&str>) -> Result<()> {
        let declared = content_type.unwrap_or("");
        let essence = declared.split(';').next().unwrap_or("").trim();
        if essence.eq_ignore_ascii_case(Self::CONTENT_TYPE) {
            Ok(())
        } else {
            Err(Error::InvalidContentType(if declared.is_empty() {
                "none".to_string()
            } else {
                declared.to_string()
            }))
        }
    }

    /// Extract the text of every page.
    ///
    /// The document is structurally loaded with lopdf first so malformed input
    /// is reported as a parse error before text extraction runs. pdf-extract
    /// panics on some font layouts lopdf accepts; a panic or error there falls
    /// back to lopdf's own text extraction.
    pub fn extract(filename: &str, data: &[u8]) -> Result<ExtractedPdf> {
        let doc = Self::load(filename, data)?;
        let page_count = doc.get_pages().len();

        let text = match panic::catch_unwind(|| pdf_extract::extract_text_from_mem(data)) {
            Ok(Ok(text)) => text,
            Ok(Err(e)) => {
                tracing::warn!("pdf-extract failed on '{}': {}, trying fallback", filename, e);
                Self::extract_fallback(filename, &doc)?
            }
            Err(_) => {
                tracing::warn!("pdf-extract crashed on '{}', trying fallback", filename);
                Self::extract_fallback(filename, &doc)?
            }
        };

        tracing::debug!(
            "Extracted {} chars from '{}' ({} pages)",
            text.len(),
            filename,
            page_count
        );

        Ok(ExtractedPdf { text, page_count })
    }

    /// Count pages, failing on unreadable documents
    pub fn count_pages(filename: &str, data: &[u8]) -> Result<usize> {
        Ok(Self::load(filename, data)?.get_pages().len())
    }

    fn load(filename: &str, data: &[u8]) -> Result<Document> {
        Document::load_mem(data).map_err(|e| Error::file_parse(filename, e.to_string()))
    }

    /// Text extraction straight from the content streams via lopdf
    fn extract_fallback(filename: &str, doc: &Document) -> Result<String> {
        let page_numbers: Vec<u32> = doc.get_pages().keys().copied().collect();

        let text = panic::catch_unwind(AssertUnwindSafe(|| doc.extract_text(&page_numbers)))
            .map_err(|_| Error::file_parse(filename, "Text extraction crashed"))?
            .map_err(|e| Error::file_parse(filename, e.to_string()))?;

        if text.trim().is_empty() {
            return Err(Error::file_parse(
                filename,
                "No text content could be extracted from PDF",
            ));
        }

        Ok(text)
    }
}
