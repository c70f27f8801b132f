//! Text extraction from uploaded documents

mod parser;

pub use parser::{ExtractedPdf, PdfExtractor};

#[cfg(test)]
pub(crate) use parser::fixtures;
