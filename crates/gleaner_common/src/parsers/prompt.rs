//! Interactive-prompt removal.
//!
//! Appliance CLIs echo their prompt before every command block, so the same
//! `hostname #` substring shows up several times inside one capture. The
//! prompt is whatever runs from the start of the text up to and including
//! the first `#` or `$`; every occurrence of that exact substring is
//! removed before line parsing.

use once_cell::sync::Lazy;
use regex::Regex;

static PROMPT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^#$]*[#$]").expect("prompt pattern is valid"));

/// Strip the repeating prompt substring from raw command output.
///
/// Text with no `#` or `$` anywhere comes back unchanged, as does text
/// whose detected prompt substring is empty.
pub fn strip_prompt(raw: &str) -> String {
    match PROMPT_RE.find(raw) {
        Some(m) if !m.as_str().is_empty() => raw.replace(m.as_str(), ""),
        _ => raw.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_prompt_returns_input_unchanged() {
        let raw = "Hostname: fgt1\nVersion: v7.0.1\n";
        assert_eq!(strip_prompt(raw), raw);
        assert_eq!(strip_prompt(""), "");
    }

    #[test]
    fn test_removes_every_prompt_occurrence() {
        let raw = "device-1 # get sys status\nHostname: fgt1\ndevice-1 # ";
        let stripped = strip_prompt(raw);
        assert!(!stripped.contains("device-1 #"));
        assert_eq!(stripped, " get sys status\nHostname: fgt1\n ");
    }

    #[test]
    fn test_dollar_prompt() {
        let raw = "box$ uptime: 4 days\nbox$ load: low\n";
        let stripped = strip_prompt(raw);
        assert_eq!(stripped, " uptime: 4 days\n load: low\n");
    }

    #[test]
    fn test_prompt_is_leftmost_run_only() {
        // The first `#` terminates the prompt; later `#` characters are data.
        let raw = "fw # Interface: port#1\nfw # ";
        let stripped = strip_prompt(raw);
        assert_eq!(stripped, " Interface: port#1\n ");
    }

    #[test]
    fn test_single_char_prompt() {
        // Text starting with the terminator yields a one-character prompt.
        assert_eq!(strip_prompt("# a: 1\n# b: 2\n"), " a: 1\n b: 2\n");
    }
}
