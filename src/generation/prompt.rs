//! Prompt assembly for document-grounded answers

use crate::providers::vector_store::VectorSearchResult;
use crate::providers::ChatMessage;
use crate::types::History;

/// Retrieved chunk text is capped at this many characters when used as
/// LLM context.
pub const CONTEXT_SNIPPET_CHARS: usize = 500;

/// Fixed system instruction: answers are HTML fragments suitable for
/// direct insertion into a page body.
const SYSTEM_PROMPT: &str = "\
You are an AI named DOCBOT that answers user queries based on uploaded PDFs.
Format every answer as HTML fragments only.

FORMATTING RULES:
- Use tags that can be placed directly inside a page body: <h1>, <h2>, <p>, <ul>, <li>, <strong>, and so on.
- Never wrap the answer in <html> or <body> tags.
- Never use Markdown artifacts such as **bold** headings or ```html code fences.

Example of a correct answer:
<h1>Hello! I'm DOCBOT</h1>
<p>I'm here to help answer your questions based on the PDFs you upload.</p>";

/// Prompt builder for session-scoped RAG questions
pub struct PromptBuilder;

impl PromptBuilder {
    /// Join retrieved chunks into LLM context, truncating each chunk's text
    /// to [`CONTEXT_SNIPPET_CHARS`] characters.
    pub fn build_context(results: &[VectorSearchResult]) -> String {
        results
            .iter()
            .map(|r| r.chunk.content.chars().take(CONTEXT_SNIPPET_CHARS).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Serialize conversation history as `role: content` lines
    pub fn format_history(history: &History) -> String {
        history
            .turns()
            .iter()
            .map(|turn| format!("{}: {}", turn.role, turn.content))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Build the chat message list: fixed instruction, serialized history,
    /// then the context-augmented question.
    pub fn build_messages(
        history: &History,
        context: &str,
        user_input: &str,
    ) -> Vec<ChatMessage> {
        let mut messages = vec![ChatMessage::system(SYSTEM_PROMPT)];

        if !history.is_empty() {
            messages.push(ChatMessage::user(Self::format_history(history)));
        }

        messages.push(ChatMessage::user(format!(
            "Context:\n{}\n\nUser: {}",
            context, user_input
        )));

        messages
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::ChatRole;
    use crate::types::{Chunk, ChunkSource, Turn};

    fn result(content: &str) -> VectorSearchResult {
        let source = ChunkSource {
            filename: "doc.pdf".to_string(),
            page_count: None,
        };
        VectorSearchResult {
            chunk: Chunk::new("demo", content, source, 0),
            similarity: 0.9,
        }
    }

    #[test]
    fn test_context_truncates_long_chunks() {
        let long = "x".repeat(800);
        let context = PromptBuilder::build_context(&[result(&long), result("short")]);

        let lines: Vec<&str> = context.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].len(), CONTEXT_SNIPPET_CHARS);
        assert_eq!(lines[1], "short");
    }

    #[test]
    fn test_history_serializes_as_role_lines() {
        let history = History::from(vec![
            Turn::user("what is this?"),
            Turn::ai("<p>A report.</p>"),
        ]);
        assert_eq!(
            PromptBuilder::format_history(&history),
            "user: what is this?\nai: <p>A report.</p>"
        );
    }

    #[test]
    fn test_message_order() {
        let history = History::from(vec![Turn::user("hi")]);
        let messages = PromptBuilder::build_messages(&history, "the context", "the question");

        assert_eq!(messages.len(), 3);
        assert_eq!(messages[0].role, ChatRole::System);
        assert!(messages[0].content.contains("DOCBOT"));
        assert!(messages[0].content.contains("Never wrap the answer in <html>"));
        assert_eq!(messages[1].content, "user: hi");
        assert_eq!(messages[2].content, "Context:\nthe context\n\nUser: the question");
    }

    #[test]
    fn test_empty_history_is_omitted() {
        let messages = PromptBuilder::build_messages(&History::new(), "ctx", "q");
        assert_eq!(messages.len(), 2);
    }
}
