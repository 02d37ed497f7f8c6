//! Sentence-aware text chunking with overlap

use unicode_segmentation::UnicodeSegmentation;

use crate::types::{Chunk, ChunkSource};

/// Text chunker with configurable size and overlap
pub struct TextChunker {
    /// Target chunk size in characters
    chunk_size: usize,
    /// Overlap between consecutive chunks
    overlap: usize,
    /// Minimum chunk size (smaller chunks are dropped)
    min_size: usize,
}

impl TextChunker {
    /// Create a new chunker
    pub fn new(chunk_size: usize, overlap: usize, min_size: usize) -> Self {
        Self {
            chunk_size,
            overlap,
            min_size,
        }
    }

    /// Split `text` into chunks owned by `session_name`, tagged with `source`.
    ///
    /// Boundaries follow sentence bounds where possible; consecutive chunks
    /// from the same document share `overlap` characters of text.
    pub fn chunk(&self, session_name: &str, text: &str, source: &ChunkSource) -> Vec<Chunk> {
        let mut chunks = Vec::new();
        let mut current = String::new();
        let mut chunk_index = 0u32;

        for sentence in text.split_sentence_bounds() {
            if !current.is_empty() && current.len() + sentence.len() > self.chunk_size {
                if current.trim().len() >= self.min_size {
                    chunks.push(Chunk::new(
                        session_name,
                        current.trim().to_string(),
                        source.clone(),
                        chunk_index,
                    ));
                    chunk_index += 1;
                }
                current = self.overlap_text(&current);
            }
            current.push_str(sentence);
        }

        if current.trim().len() >= self.min_size {
            chunks.push(Chunk::new(
                session_name,
                current.trim().to_string(),
                source.clone(),
                chunk_index,
            ));
        }

        chunks
    }

    /// Tail of a finished chunk carried into the next one
    fn overlap_text(&self, text: &str) -> String {
        if text.len() <= self.overlap {
            return text.to_string();
        }

        let mut start = text.len() - self.overlap;
        while start > 0 && !text.is_char_boundary(start) {
            start -= 1;
        }
        let tail = &text[start..];

        // Prefer starting the overlap at a sentence or word boundary
        if let Some(pos) = tail.find(". ") {
            return tail[pos + 2..].to_string();
        }
        if let Some(pos) = tail.find(' ') {
            return tail[pos + 1..].to_string();
        }
        tail.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source() -> ChunkSource {
        ChunkSource {
            filename: "doc.pdf".to_string(),
            page_count: Some(1),
        }
    }

    #[test]
    fn test_short_text_is_one_chunk() {
        let chunker = TextChunker::new(200, 50, 20);
        let chunks = chunker.chunk("demo", "A single short paragraph of text here.", &source());
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].chunk_index, 0);
        assert_eq!(chunks[0].session_name, "demo");
    }

    #[test]
    fn test_long_text_splits_near_target_size() {
        let chunker = TextChunker::new(200, 50, 20);
        let sentence = "The quarterly report covers revenue and costs in detail. ";
        let text = sentence.repeat(20);
        let chunks = chunker.chunk("demo", &text, &source());

        assert!(chunks.len() > 1);
        for chunk in &chunks {
            // A chunk may exceed the target by at most one sentence.
            assert!(chunk.content.len() <= 200 + sentence.len());
        }
    }

    #[test]
    fn test_chunk_indices_are_sequential() {
        let chunker = TextChunker::new(200, 50, 20);
        let text = "Sentence number one is here. ".repeat(30);
        let chunks = chunker.chunk("demo", &text, &source());
        for (i, chunk) in chunks.iter().enumerate() {
            assert_eq!(chunk.chunk_index, i as u32);
        }
    }

    #[test]
    fn test_overlap_starts_at_sentence_boundary() {
        let chunker = TextChunker::new(200, 50, 20);
        let text = "A long opening clause goes here to pad things out. Short tail. Final bit.";
        let overlap = chunker.overlap_text(text);
        assert_eq!(overlap, "Short tail. Final bit.");
    }

    #[test]
    fn test_overlap_of_short_text_is_whole_text() {
        let chunker = TextChunker::new(200, 50, 20);
        assert_eq!(chunker.overlap_text("tiny"), "tiny");
    }

    #[test]
    fn test_tiny_trailing_fragment_is_dropped() {
        let chunker = TextChunker::new(200, 0, 20);
        let text = format!("{} Ok.", "A proper sentence with enough words to keep. ".repeat(5));
        let chunks = chunker.chunk("demo", &text, &source());
        for chunk in &chunks {
            assert!(chunk.content.len() >= 20);
        }
    }
}
