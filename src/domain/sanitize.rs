//! Normalization of user-entered text before it reaches the store.

/// Maximum length of a list name, in characters
pub const MAX_LIST_NAME_LENGTH: usize = 32;

/// Maximum length of a task title, in characters
pub const MAX_TASK_TITLE_LENGTH: usize = 256;

/// Sanitizes user input for storage.
///
/// - Drops control characters (code points below 32) except horizontal tab
/// - Trims leading and trailing whitespace
/// - Collapses runs of spaces into a single space (tabs are kept as-is)
/// - Limits the result to `max_length` characters, trimming again afterwards
///
/// An empty result means the input carried no usable text; callers treat it
/// as a rejection.
pub fn sanitize(text: &str, max_length: usize) -> String {
    if text.is_empty() {
        return String::new();
    }

    let stripped: String = text
        .chars()
        .filter(|&c| c == '\t' || (c as u32) >= 32)
        .collect();

    let mut collapsed = String::with_capacity(stripped.len());
    let mut previous_space = false;
    for c in stripped.trim().chars() {
        if c == ' ' {
            if previous_space {
                continue;
            }
            previous_space = true;
        } else {
            previous_space = false;
        }
        collapsed.push(c);
    }

    if collapsed.chars().count() > max_length {
        let truncated: String = collapsed.chars().take(max_length).collect();
        return truncated.trim().to_string();
    }

    collapsed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapses_and_trims_spaces() {
        assert_eq!(sanitize("   buy   milk  ", MAX_TASK_TITLE_LENGTH), "buy milk");
    }

    #[test]
    fn test_empty_and_blank_input() {
        assert_eq!(sanitize("", MAX_LIST_NAME_LENGTH), "");
        assert_eq!(sanitize("     ", MAX_LIST_NAME_LENGTH), "");
        assert_eq!(sanitize("\u{0}\u{1}\u{1f}", MAX_LIST_NAME_LENGTH), "");
    }

    #[test]
    fn test_strips_control_characters_but_keeps_inner_tabs() {
        assert_eq!(sanitize("a\u{0}b\nc", MAX_TASK_TITLE_LENGTH), "abc");
        assert_eq!(sanitize("a\tb", MAX_TASK_TITLE_LENGTH), "a\tb");
        // Tabs are whitespace for trimming purposes
        assert_eq!(sanitize("\ta b\t", MAX_TASK_TITLE_LENGTH), "a b");
    }

    #[test]
    fn test_tabs_are_not_collapsed() {
        assert_eq!(sanitize("a\t\t b", MAX_TASK_TITLE_LENGTH), "a\t\t b");
    }

    #[test]
    fn test_removed_newline_can_join_spaces() {
        // The control character goes first, so the surrounding spaces collapse
        assert_eq!(sanitize("a \n b", MAX_TASK_TITLE_LENGTH), "a b");
    }

    #[test]
    fn test_truncates_and_retrims() {
        let input = format!("{} tail", "x".repeat(31));
        let result = sanitize(&input, MAX_LIST_NAME_LENGTH);
        assert_eq!(result, "x".repeat(31));
        assert_eq!(sanitize("abcdef", 3), "abc");
    }

    #[test]
    fn test_truncation_counts_characters_not_bytes() {
        let input = "é".repeat(40);
        let result = sanitize(&input, MAX_LIST_NAME_LENGTH);
        assert_eq!(result.chars().count(), MAX_LIST_NAME_LENGTH);
    }

    #[test]
    fn test_output_properties_hold_for_messy_inputs() {
        let inputs = [
            "  \u{7}hello   world\u{1b}  ",
            "\t\tfoo  \u{0} bar\t",
            "  spaced     out     words     that     go     on     and     on   ",
            "\r\n\r\n",
            "ünïcödé   text",
        ];

        for input in inputs {
            for max in [1, 5, MAX_LIST_NAME_LENGTH, MAX_TASK_TITLE_LENGTH] {
                let out = sanitize(input, max);
                assert!(out.chars().count() <= max, "{out:?} longer than {max}");
                assert_eq!(out, out.trim(), "{out:?} not trimmed");
                assert!(!out.contains("  "), "{out:?} has consecutive spaces");
                assert!(
                    out.chars().all(|c| c == '\t' || (c as u32) >= 32),
                    "{out:?} has control characters"
                );
            }
        }
    }
}
