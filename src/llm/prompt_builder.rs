use crate::llm::prompts;

/// Keep at most the first `max_lines` lines of `diff`.
///
/// Returns the kept text and whether anything was cut.
pub fn truncate_lines(diff: &str, max_lines: usize) -> (&str, bool) {
    match diff.match_indices('\n').nth(max_lines.saturating_sub(1)) {
        Some((idx, _)) if max_lines > 0 => {
            let rest = &diff[idx + 1..];
            (&diff[..idx + 1], !rest.is_empty())
        }
        _ if max_lines == 0 => ("", !diff.is_empty()),
        _ => (diff, false),
    }
}

pub fn commit_message_prompt(diff: &str) -> String {
    format!("{rules}\n\nDiff:\n{diff}", rules = prompts::COMMIT_RULES)
}
