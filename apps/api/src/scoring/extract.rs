//! Balanced JSON object extraction from free-form model output.
//!
//! Models wrap their JSON in prose ("Sure! Here's the result: {...}") often
//! enough that parsing the raw text directly is not an option. The scanner
//! below finds the first `{` and walks forward one character at a time,
//! tracking whether it is inside a quoted string so that braces and escaped
//! quotes inside string values never unbalance the count.

/// Returns the first balanced `{...}` span in `text`, trimmed.
///
/// `None` when the text has no `{`, or when the first object never closes.
/// The span is balanced, not validated: callers still have to parse it.
pub fn extract_first_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;

    let mut in_string = false;
    let mut escape_pending = false;
    let mut depth: u32 = 0;

    for (offset, c) in text[start..].char_indices() {
        if escape_pending {
            escape_pending = false;
            continue;
        }

        match c {
            '\\' => {
                if in_string {
                    escape_pending = true;
                }
            }
            '"' => in_string = !in_string,
            '{' if !in_string => depth += 1,
            '}' if !in_string => {
                depth -= 1;
                if depth == 0 {
                    let end = start + offset + c.len_utf8();
                    return Some(text[start..end].trim());
                }
            }
            _ => {}
        }
    }

    None
}
