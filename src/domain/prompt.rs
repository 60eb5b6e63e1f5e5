//! Prompt construction for post generation.

use crate::domain::{Document, MAX_POST_CHARS, MAX_TAGS, TAGS_MARKER};

/// Placed in the examples section when retrieval found nothing, so the
/// model is not tempted to invent examples.
pub const NO_EXAMPLES: &str = "- No examples available";

const MIN_TAGS: usize = 3;

/// Builds the generation prompt for a trend context and retrieved
/// examples. Pure: same inputs, same prompt.
pub fn compose_prompt(trend_context: &str, examples: &[Document]) -> String {
    let examples_section = if examples.is_empty() {
        NO_EXAMPLES.to_string()
    } else {
        examples
            .iter()
            .map(format_example)
            .collect::<Vec<_>>()
            .join("\n")
    };

    format!(
        "Create an engaging Twitter post that aligns with current trends and follows these guidelines:

**Trend Context**: {trend_context}

**Examples of Successful Tweets** (learn structure from these):
{examples_section}

**Requirements**:
- Do NOT include hashtags or the '#' character in the tweet text
- Keep text under {MAX_POST_CHARS} characters (tags excluded from count)
- Use informal but professional tone
- Add emojis where appropriate
- Include {MIN_TAGS}-{MAX_TAGS} tags after the tweet for indexing
- Tags should be relevant comma-separated keywords
- Format: Tweet text followed by a new line starting with {TAGS_MARKER} tag1, tag2, tag3

Return ONLY in this format:
[Your engaging tweet text]
{TAGS_MARKER} [comma-separated keywords]
"
    )
}

fn format_example(example: &Document) -> String {
    format!(
        "- Tweet: \"{}\"\n  {TAGS_MARKER} {}",
        example.text,
        example.tags.join(", ")
    )
}
