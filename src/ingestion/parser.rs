//! PDF text extraction

use crate::error::{Error, Result};

/// Extracted text from a single PDF
#[derive(Debug, Clone)]
pub struct ParsedPdf {
    /// Extracted text content, cleaned and whitespace-normalized
    pub content: String,
    /// Total pages, when the PDF structure is readable
    pub total_pages: Option<u32>,
}

/// PDF parser backed by `pdf-extract`, with a raw `lopdf` content-stream
/// fallback for files pdf-extract chokes on.
pub struct PdfParser;

impl PdfParser {
    /// Parse a PDF from its raw bytes.
    ///
    /// Fails if no text can be extracted; an unparsable file aborts the
    /// whole upload.
    pub fn parse(filename: &str, data: &[u8]) -> Result<ParsedPdf> {
        let raw = match pdf_extract::extract_text_from_mem(data) {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!("pdf-extract failed for '{}': {}, trying fallback", filename, e);
                Self::extract_text_fallback(filename, data)?
            }
        };

        let content = normalize_text(&raw);
        if content.trim().is_empty() {
            return Err(Error::file_parse(
                filename,
                "No text content could be extracted from PDF",
            ));
        }

        let total_pages = match lopdf::Document::load_mem(data) {
            Ok(doc) => Some(doc.get_pages().len() as u32),
            Err(_) => None,
        };

        Ok(ParsedPdf {
            content,
            total_pages,
        })
    }

    /// Fallback extraction using lopdf content streams directly
    fn extract_text_fallback(filename: &str, data: &[u8]) -> Result<String> {
        let doc = lopdf::Document::load_mem(data)
            .map_err(|e| Error::file_parse(filename, format!("Failed to load PDF: {}", e)))?;

        let mut all_text = String::new();
        for (page_num, page_id) in doc.get_pages() {
            match doc.get_page_content(page_id) {
                Ok(content) => {
                    let text = extract_text_from_content(&content);
                    if !text.is_empty() {
                        all_text.push_str(&text);
                        all_text.push('\n');
                    }
                }
                Err(e) => {
                    tracing::debug!("Could not get content for page {}: {}", page_num, e);
                }
            }
        }

        if all_text.trim().is_empty() {
            return Err(Error::file_parse(
                filename,
                "PDF appears to be image-based or has no extractable text",
            ));
        }

        Ok(all_text)
    }
}

/// Replace common PDF glyph artifacts and collapse whitespace
fn normalize_text(text: &str) -> String {
    let replaced = text
        .replace('\0', "")
        .replace('\u{2010}', "-")
        .replace('\u{2011}', "-")
        .replace('\u{2013}', "-")
        .replace('\u{2014}', "--")
        .replace('\u{2018}', "'")
        .replace('\u{2019}', "'")
        .replace('\u{201C}', "\"")
        .replace('\u{201D}', "\"")
        .replace('\u{2022}', "* ")
        .replace('\u{2026}', "...")
        .replace('\u{00A0}', " ")
        .replace('\u{FB00}', "ff")
        .replace('\u{FB01}', "fi")
        .replace('\u{FB02}', "fl")
        .replace('\u{FB03}', "ffi")
        .replace('\u{FB04}', "ffl");

    replaced
        .lines()
        .map(|l| l.trim())
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Pull text show operators out of a PDF content stream.
///
/// Looks for `(...) Tj`/`TJ` between `BT`/`ET`; good enough as a last resort
/// when pdf-extract fails on font tables.
fn extract_text_from_content(content: &[u8]) -> String {
    let content_str = String::from_utf8_lossy(content);
    let mut text = String::new();
    let mut in_text_block = false;

    for line in content_str.lines() {
        let line = line.trim();

        if line == "BT" {
            in_text_block = true;
            continue;
        }
        if line == "ET" {
            in_text_block = false;
            if !text.ends_with(' ') {
                text.push(' ');
            }
            continue;
        }

        if in_text_block && (line.ends_with("Tj") || line.ends_with("TJ")) {
            if let (Some(start), Some(end)) = (line.find('('), line.rfind(')')) {
                if start < end {
                    let extracted = &line[start + 1..end];
                    let decoded = extracted
                        .replace("\\n", "\n")
                        .replace("\\r", "\r")
                        .replace("\\t", "\t")
                        .replace("\\(", "(")
                        .replace("\\)", ")")
                        .replace("\\\\", "\\");
                    text.push_str(&decoded);
                }
            }
        }
    }

    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_glyph_artifacts() {
        let raw = "smart \u{2018}quotes\u{2019} and \u{FB01}ligatures\u{2026}";
        assert_eq!(normalize_text(raw), "smart 'quotes' and filigatures...");
    }

    #[test]
    fn test_normalize_drops_blank_lines() {
        let raw = "first\n\n   \nsecond  ";
        assert_eq!(normalize_text(raw), "first\nsecond");
    }

    #[test]
    fn test_content_stream_extraction() {
        let stream = b"BT\n(Hello) Tj\n(World) Tj\nET\n";
        let text = extract_text_from_content(stream);
        assert!(text.contains("Hello"));
        assert!(text.contains("World"));
    }

    #[test]
    fn test_garbage_bytes_fail() {
        let err = PdfParser::parse("bad.pdf", b"not a pdf at all").unwrap_err();
        assert!(matches!(err, Error::FileParse { .. }));
    }
}
