//! Document ingestion: PDF parsing and text chunking

mod chunker;
mod parser;

pub use chunker::TextChunker;
pub use parser::{ParsedPdf, PdfParser};
