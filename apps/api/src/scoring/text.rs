//! Text shaping helpers applied to prompt inputs and raw model output.

/// Max characters of each of the resume and job description sent in a prompt.
pub const PROMPT_SEGMENT_CHARS: usize = 6000;

/// Max characters kept from a fetched job page.
pub const FETCHED_JOB_CHARS: usize = 10_000;

/// Max characters of raw model output kept in a diagnostic preview.
pub const PREVIEW_CHARS: usize = 600;

const FENCE: &str = "```";

/// Returns the prefix of `text` holding at most `max_chars` characters.
///
/// Counts Unicode scalar values, so a multi-byte character is never split.
pub fn truncate(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}

/// Strips a surrounding markdown code fence (```` ``` ```` or ```` ```json ````).
///
/// Input that does not start with a fence is returned trimmed. A fence with no
/// newline loses only its opening marker; a missing closing fence leaves the
/// rest of the body intact.
pub fn strip_fences(text: &str) -> &str {
    let trimmed = text.trim();
    if !trimmed.starts_with(FENCE) {
        return trimmed;
    }

    // Drop the opening line, language tag included.
    let body = match trimmed.find('\n') {
        Some(newline) => &trimmed[newline + 1..],
        None => &trimmed[FENCE.len()..],
    };

    let body = match body.rfind(FENCE) {
        Some(closing) => &body[..closing],
        None => body,
    };

    body.trim()
}

/// Single-line, length-capped rendering of raw model output for logs and errors.
pub fn preview(text: &str) -> String {
    let flattened = text.replace(['\r', '\n'], " ");
    let capped = truncate(&flattened, PREVIEW_CHARS);
    if capped.len() < flattened.len() {
        format!("{capped} …(truncated)")
    } else {
        flattened
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_shorter_input_is_unchanged() {
        assert_eq!(truncate("hello", 10), "hello");
    }

    #[test]
    fn test_truncate_takes_prefix() {
        assert_eq!(truncate("hello world", 5), "hello");
    }

    #[test]
    fn test_truncate_exact_length_is_unchanged() {
        assert_eq!(truncate("hello", 5), "hello");
    }

    #[test]
    fn test_truncate_empty_input() {
        assert_eq!(truncate("", PROMPT_SEGMENT_CHARS), "");
    }

    #[test]
    fn test_truncate_counts_characters_not_bytes() {
        // 'é' is two bytes in UTF-8
        assert_eq!(truncate("ééééé", 3), "ééé");
    }

    #[test]
    fn test_strip_fences_with_json_tag() {
        let input = "```json\n{\"a\":1}\n```";
        assert_eq!(strip_fences(input), "{\"a\":1}");
    }

    #[test]
    fn test_strip_fences_without_tag() {
        let input = "```\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_fences_no_fences_trims() {
        let input = "  {\"key\": \"value\"}\n";
        assert_eq!(strip_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_fences_surrounding_whitespace() {
        let input = "\n\n  ```json\n{\"a\":1}\n```  \n";
        assert_eq!(strip_fences(input), "{\"a\":1}");
    }

    #[test]
    fn test_strip_fences_missing_closing_fence() {
        let input = "```json\n{\"a\":1}";
        assert_eq!(strip_fences(input), "{\"a\":1}");
    }

    #[test]
    fn test_strip_fences_without_newline() {
        let input = "```{\"a\":1}```";
        assert_eq!(strip_fences(input), "{\"a\":1}");
    }

    #[test]
    fn test_strip_fences_bare_marker() {
        assert_eq!(strip_fences("```"), "");
    }

    #[test]
    fn test_strip_fences_drops_trailing_prose_after_closing_fence() {
        let input = "```json\n{\"a\":1}\n```\nHope this helps!";
        assert_eq!(strip_fences(input), "{\"a\":1}");
    }

    #[test]
    fn test_preview_collapses_newlines() {
        assert_eq!(preview("line one\r\nline two"), "line one  line two");
    }

    #[test]
    fn test_preview_caps_length() {
        let long = "x".repeat(PREVIEW_CHARS + 50);
        let p = preview(&long);
        assert!(p.starts_with(&"x".repeat(PREVIEW_CHARS)));
        assert!(p.ends_with("…(truncated)"));
    }

    #[test]
    fn test_preview_short_text_has_no_marker() {
        assert_eq!(preview("short"), "short");
    }
}
