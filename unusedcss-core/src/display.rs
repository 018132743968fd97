//! Short, human-scannable names for resource URLs.
//!
//! `https://cdn.example.com/assets/css/site.3f9a2b1c0d4e5f6a7b8c9d0e.css?v=2#x`
//! becomes `…css/site.3f9a2b1….css?v=2`.

use std::sync::OnceLock;

use regex::Regex;
use url::{ParseError, Url};

/// Longest display name before eliding.
pub const MAX_DISPLAY_LENGTH: usize = 64;

/// Trailing path segments kept.
const NUM_PATH_PARTS: usize = 2;

const ELLIPSIS: char = '\u{2026}';

fn hash_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    // SAFETY: This regex pattern is hardcoded and validated at compile-test time.
    REGEX.get_or_init(|| {
        Regex::new(r"([a-f0-9]{7})[a-f0-9]{13}[a-f0-9]*").expect("Hardcoded regex pattern is valid")
    })
}

fn long_number_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    // SAFETY: This regex pattern is hardcoded and validated at compile-test time.
    REGEX.get_or_init(|| Regex::new(r"([0-9]{3})[0-9]{3,}").expect("Hardcoded regex pattern is valid"))
}

fn query_value_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    // SAFETY: This regex pattern is hardcoded and validated at compile-test time.
    REGEX.get_or_init(|| Regex::new(r"\?([^=]*)(=)?.*").expect("Hardcoded regex pattern is valid"))
}

/// Path and query of a URL, with the fragment dropped.
///
/// Returns `None` for URLs without a meaningful path (`about:`, `data:`).
/// Relative input is treated as a bare path.
fn path_and_query(url: &str) -> Option<(String, String)> {
    match Url::parse(url) {
        Ok(parsed) => {
            if matches!(parsed.scheme(), "about" | "data") {
                return None;
            }
            let query = parsed.query().map(|q| format!("?{}", q)).unwrap_or_default();
            Some((parsed.path().to_string(), query))
        }
        Err(ParseError::RelativeUrlWithoutBase) => {
            let without_fragment = url.split('#').next().unwrap_or(url);
            let (path, query) = match without_fragment.find('?') {
                Some(q) => without_fragment.split_at(q),
                None => (without_fragment, ""),
            };
            Some((path.to_string(), query.to_string()))
        }
        Err(_) => None,
    }
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Display name for a URL.
pub fn display_name(url: &str) -> String {
    let mut name = match path_and_query(url) {
        None => url.to_string(),
        Some((path, query)) => {
            let segments: Vec<&str> = path.split('/').filter(|p| !p.is_empty()).collect();
            let path = if segments.len() > NUM_PATH_PARTS {
                format!("{}{}", ELLIPSIS, segments[segments.len() - NUM_PATH_PARTS..].join("/"))
            } else {
                path
            };
            format!("{}{}", path, query)
        }
    };

    name = hash_regex()
        .replace_all(&name, format!("${{1}}{}", ELLIPSIS).as_str())
        .into_owned();
    name = long_number_regex()
        .replace_all(&name, format!("${{1}}{}", ELLIPSIS).as_str())
        .into_owned();

    if char_len(&name) > MAX_DISPLAY_LENGTH && name.contains('?') {
        name = query_value_regex()
            .replace(&name, format!("?${{1}}${{2}}{}", ELLIPSIS).as_str())
            .into_owned();
        if char_len(&name) > MAX_DISPLAY_LENGTH {
            if let Some(q) = name.find('?') {
                name = format!("{}?{}", &name[..q], ELLIPSIS);
            }
        }
    }

    let len = char_len(&name);
    if len > MAX_DISPLAY_LENGTH {
        let chars: Vec<char> = name.chars().collect();
        // Keep the extension only if it leaves room for part of the name.
        let dot = chars
            .iter()
            .rposition(|&c| c == '.')
            .filter(|&dot| len - dot < MAX_DISPLAY_LENGTH - 1);
        name = match dot {
            Some(dot) => {
                let keep = MAX_DISPLAY_LENGTH - 1 - (len - dot);
                let head: String = chars[..keep].iter().collect();
                let tail: String = chars[dot..].iter().collect();
                format!("{}{}{}", head, ELLIPSIS, tail)
            }
            None => {
                let head: String = chars[..MAX_DISPLAY_LENGTH - 1].iter().collect();
                format!("{}{}", head, ELLIPSIS)
            }
        };
    }

    name
}
