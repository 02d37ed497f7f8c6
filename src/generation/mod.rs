//! Answer composition: prompt assembly for the LLM

mod prompt;

pub use prompt::PromptBuilder;
