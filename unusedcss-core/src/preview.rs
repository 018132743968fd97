//! Content previews for stylesheets that have no usable URL.
//!
//! Inline `<style>` blocks are identified in the report by a short snippet
//! of their source. The snippet is normalized for readability and, when
//! truncated, is cut at a rule or declaration boundary where possible so it
//! still reads like CSS.
//!
//! All positions are character offsets; content is never sliced mid-codepoint.

use std::sync::OnceLock;

use regex::Regex;

/// Target preview length in characters.
pub const PREVIEW_LENGTH: usize = 100;

/// Runs of 2+ spaces, or any tabs, collapse to two spaces.
fn indentation_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    // SAFETY: This regex pattern is hardcoded and validated at compile-test time.
    REGEX.get_or_init(|| Regex::new(r"( {2,}|\t)+").expect("Hardcoded regex pattern is valid"))
}

/// Whitespace between a newline and a closing brace.
fn closing_brace_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    // SAFETY: This regex pattern is hardcoded and validated at compile-test time.
    REGEX.get_or_init(|| Regex::new(r"\n\s+\}").expect("Hardcoded regex pattern is valid"))
}

/// Collapses indentation and trims, without truncating.
pub fn normalize_whitespace(content: &str) -> String {
    let indented = indentation_regex().replace_all(content, "  ");
    let braces = closing_brace_regex().replace_all(&indented, "\n}");
    braces.trim().to_string()
}

/// Produces a short, CSS-looking snippet of `content`.
pub fn determine_content_preview(content: &str) -> String {
    let head: String = content.chars().take(PREVIEW_LENGTH * 5).collect();
    let preview = normalize_whitespace(&head);

    let chars: Vec<char> = preview.chars().collect();
    if chars.len() <= PREVIEW_LENGTH {
        return preview;
    }

    let take = |n: usize| chars[..n.min(chars.len())].iter().collect::<String>();
    let rule_start = chars.iter().position(|&c| c == '{');
    let rule_end = chars.iter().position(|&c| c == '}');

    match (rule_start, rule_end) {
        (Some(start), Some(end)) if start < end && start <= PREVIEW_LENGTH => {
            if end < PREVIEW_LENGTH {
                // Whole first rule fits.
                format!("{} ...", take(end + 1))
            } else {
                let last_semicolon = chars[..PREVIEW_LENGTH].iter().rposition(|&c| c == ';');
                match last_semicolon {
                    Some(semi) if semi >= start => format!("{}... }} ...", take(semi + 1)),
                    _ => format!("{}... }} ...", take(PREVIEW_LENGTH)),
                }
            }
        }
        _ => format!("{}...", take(PREVIEW_LENGTH)),
    }
}
