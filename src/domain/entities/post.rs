use serde::{Deserialize, Serialize};

/// Hard cap on post body length, in characters.
pub const MAX_POST_CHARS: usize = 280;
/// At most this many tags are kept from a response.
pub const MAX_TAGS: usize = 5;
/// Marker line separating the body from the tag list.
pub const TAGS_MARKER: &str = "Tags:";

const ELLIPSIS: &str = "...";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedPost {
    pub text: String,
    pub tags: Vec<String>,
}

impl GeneratedPost {
    /// Keeps the first `MAX_TAGS` tags in their original order.
    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self.tags.truncate(MAX_TAGS);
        self
    }
}

/// Extracts the post body and tags from a raw model response.
///
/// Never fails: without a tag marker the whole trimmed response is the
/// body. Tags keep their order and duplicates pass through unchanged;
/// blank tags are dropped. The body is capped at `MAX_POST_CHARS`
/// characters, ending in an ellipsis when cut.
pub fn parse_response(raw: &str) -> GeneratedPost {
    let cleaned = raw.trim_matches(|c: char| c == '"' || c.is_whitespace());

    let marker = format!("\n{TAGS_MARKER}");
    let (body, tags) = match cleaned.split_once(marker.as_str()) {
        Some((body, tags_part)) => (body, split_tags(tags_part)),
        None => (cleaned, Vec::new()),
    };

    GeneratedPost {
        text: cap_length(body.trim()),
        tags: Vec::new(),
    }
    .with_tags(tags)
}

fn split_tags(tags_part: &str) -> Vec<String> {
    tags_part
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(String::from)
        .collect()
}

fn cap_length(body: &str) -> String {
    if body.chars().count() <= MAX_POST_CHARS {
        return body.to_string();
    }

    let keep = MAX_POST_CHARS - ELLIPSIS.len();
    let mut capped: String = body.chars().take(keep).collect();
    capped.push_str(ELLIPSIS);
    capped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_body_and_tags() {
        let post = parse_response("Hello world\nTags: a, b, c");
        assert_eq!(post.text, "Hello world");
        assert_eq!(post.tags, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_parse_truncates_long_body() {
        let post = parse_response(&"x".repeat(300));
        assert_eq!(post.text, format!("{}...", "x".repeat(277)));
        assert_eq!(post.text.chars().count(), MAX_POST_CHARS);
        assert!(post.tags.is_empty());
    }

    #[test]
    fn test_parse_keeps_body_at_limit() {
        let body = "y".repeat(MAX_POST_CHARS);
        assert_eq!(parse_response(&body).text, body);
    }

    #[test]
    fn test_parse_strips_quotes_and_whitespace() {
        let post = parse_response(" \"quoted\" \n");
        assert_eq!(post.text, "quoted");
        assert!(post.tags.is_empty());
    }

    #[test]
    fn test_parse_caps_tag_count() {
        let post = parse_response("Body\nTags: one, two, three, four, five, six, seven");
        assert_eq!(post.tags, vec!["one", "two", "three", "four", "five"]);
    }

    #[test]
    fn test_parse_drops_blank_tags_keeps_duplicates() {
        let post = parse_response("Body\nTags: ai, , ai ,  ,growth,");
        assert_eq!(post.tags, vec!["ai", "ai", "growth"]);
    }

    #[test]
    fn test_parse_marker_must_start_a_line() {
        let post = parse_response("Tags: are overrated");
        assert_eq!(post.text, "Tags: are overrated");
        assert!(post.tags.is_empty());
    }

    #[test]
    fn test_parse_multiline_body() {
        let post = parse_response("\"Line one\n\nLine two 🚀\nTags: startups, sales\"");
        assert_eq!(post.text, "Line one\n\nLine two 🚀");
        assert_eq!(post.tags, vec!["startups", "sales"]);
    }

    #[test]
    fn test_parse_truncates_by_characters_not_bytes() {
        let body = "é".repeat(290);
        let post = parse_response(&body);
        assert_eq!(post.text.chars().count(), MAX_POST_CHARS);
        assert!(post.text.starts_with("ééé"));
        assert!(post.text.ends_with("..."));
    }

    #[test]
    fn test_parse_empty_response() {
        let post = parse_response("   ");
        assert_eq!(post.text, "");
        assert!(post.tags.is_empty());
    }

    #[test]
    fn test_with_tags_never_exceeds_cap() {
        let post = parse_response("Body\nTags: a, b, c, d, e");
        let mut tags = post.tags.clone();
        tags.extend(["f".to_string(), "g".to_string()]);

        let post = post.with_tags(tags);
        assert_eq!(post.tags.len(), MAX_TAGS);
        assert_eq!(post.tags, vec!["a", "b", "c", "d", "e"]);
    }
}
