//! Prompt construction for quote generation.
//!
//! The prompt is fixed apart from the embedded user text.  It instructs the
//! model to answer with *only* a JSON object carrying the keys `quote` and
//! `roleModel`, which [`crate::llm::parse`] then probes.  Models routinely
//! ignore the "ONLY" part and wrap the object in a code fence; the parser
//! handles that.

// ---------------------------------------------------------------------------
// Prompt sections
// ---------------------------------------------------------------------------

/// Task description placed before the user's text.
const PROMPT_TASK: &str = "\
Based on the following user's feeling or situation, provide an inspiring, \
motivational quote and a well-known role model who exemplifies overcoming \
similar challenges or embodies the spirit of the quote. Give practical, \
mindset-building advice that can be applied in real life. Avoid generic \
quotes and role models, focusing instead on those that are truly impactful \
and relevant to the user's input. Use simple language that is easy to \
understand. The quote should be a one-liner.";

/// Output contract placed after the user's text.
const PROMPT_CONTRACT: &str = "\
Return your response ONLY as a JSON object with two keys: \"quote\" (string) \
and \"roleModel\" (string).
Example: {\"quote\": \"The only way to do great work is to love what you do.\", \"roleModel\": \"Steve Jobs - Developer and Entrepreneur\"}
Be concise and ensure the quote is genuinely motivational.";

// ---------------------------------------------------------------------------
// build_prompt
// ---------------------------------------------------------------------------

/// Build the generation prompt around the user's (already validated) text.
///
/// # Example
/// ```rust
/// use mood_motivator::llm::build_prompt;
///
/// let prompt = build_prompt("I feel like giving up");
/// assert!(prompt.contains("I feel like giving up"));
/// assert!(prompt.contains("\"roleModel\""));
/// ```
pub fn build_prompt(text: &str) -> String {
    format!("{PROMPT_TASK}\n\nUser's input: \"{text}\"\n\n{PROMPT_CONTRACT}")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_embeds_user_text() {
        let prompt = build_prompt("I failed my exam today");
        assert!(prompt.contains("User's input: \"I failed my exam today\""));
    }

    #[test]
    fn prompt_demands_json_object_with_both_keys() {
        let prompt = build_prompt("anything");
        assert!(prompt.contains("ONLY as a JSON object"));
        assert!(prompt.contains("\"quote\""));
        assert!(prompt.contains("\"roleModel\""));
    }

    #[test]
    fn prompt_contains_example_line() {
        let prompt = build_prompt("anything");
        assert!(
            prompt.contains("Example: {\"quote\""),
            "the example line anchors the expected output shape"
        );
    }

    #[test]
    fn prompt_asks_for_a_one_liner_quote() {
        let prompt = build_prompt("anything");
        assert!(prompt.contains("one-liner"));
    }
}
