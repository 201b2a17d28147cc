//! Prompt templates for context-conditioned answering

use crate::knowledge::KnowledgeEntry;

/// Truncate `text` to at most `budget` whitespace tokens.
///
/// This is the coarse token budget used for both embedding input and
/// generation prompts; model-exact tokenization lives behind the providers.
pub fn truncate_tokens(text: &str, budget: usize) -> String {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    if tokens.len() <= budget {
        return text.to_string();
    }
    tokens[..budget].join(" ")
}

/// Prompt builder for retrieval-augmented answering.
pub struct PromptBuilder;

impl PromptBuilder {
    /// Concatenate retrieved entries into a context block.
    ///
    /// Callers pass entries in ascending knowledge-base order, which keeps
    /// the generated context reproducible independent of distance rank.
    pub fn build_context(entries: &[&KnowledgeEntry]) -> String {
        let mut context = String::new();

        for (i, entry) in entries.iter().enumerate() {
            context.push_str(&format!(
                "[{}] Q: {}\nA: {}\n\n",
                i + 1,
                entry.question,
                entry.answer
            ));
        }

        context
    }

    /// Build the answering prompt from a context block and a question.
    ///
    /// An empty context still yields a well-formed prompt; the caller
    /// decides whether an empty-context generation is acceptable.
    pub fn build_qa_prompt(context: &str, question: &str) -> String {
        format!(
            r#"Based on the following context, answer the question. Only use information from the context.

Context:
{context}

Question: {question}

Answer:"#,
            context = context,
            question = question
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_is_untouched() {
        assert_eq!(truncate_tokens("a b c", 10), "a b c");
    }

    #[test]
    fn long_text_is_cut_to_budget() {
        let text = "one two three four five";
        assert_eq!(truncate_tokens(text, 3), "one two three");
    }

    #[test]
    fn context_preserves_entry_order() {
        let first = KnowledgeEntry::new("What is X?", "X is Y.");
        let second = KnowledgeEntry::new("What is Z?", "Z is W.");
        let context = PromptBuilder::build_context(&[&first, &second]);

        let x_pos = context.find("X is Y.").unwrap();
        let z_pos = context.find("Z is W.").unwrap();
        assert!(x_pos < z_pos);
    }

    #[test]
    fn empty_context_still_builds_a_prompt() {
        let prompt = PromptBuilder::build_qa_prompt("", "What is X?");
        assert!(prompt.contains("What is X?"));
        assert!(prompt.ends_with("Answer:"));
    }
}
