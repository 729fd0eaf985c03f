//! Sanitizing text bound for the single-line prompt field.

/// Flatten pasted or typed text so it cannot corrupt the input line:
/// tabs become four spaces, line breaks become single spaces, and all
/// other control characters are dropped.
pub fn sanitize_prompt_input(text: &str) -> String {
    let mut sanitized = String::with_capacity(text.len());

    for ch in text.chars() {
        match ch {
            '\t' => sanitized.push_str("    "),
            '\r' | '\n' => sanitized.push(' '),
            _ if !ch.is_control() => sanitized.push(ch),
            _ => {}
        }
    }

    sanitized
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_passes_through() {
        assert_eq!(sanitize_prompt_input("hello world"), "hello world");
    }

    #[test]
    fn tabs_become_four_spaces() {
        assert_eq!(sanitize_prompt_input("a\tb"), "a    b");
    }

    #[test]
    fn line_breaks_flatten_to_spaces() {
        assert_eq!(sanitize_prompt_input("one\ntwo\r\nthree"), "one two  three");
    }

    #[test]
    fn control_characters_are_dropped() {
        assert_eq!(sanitize_prompt_input("a\x07b\x00c"), "abc");
    }
}
