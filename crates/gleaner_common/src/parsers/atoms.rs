//! Atomic transforms shared by the output parsers.

/// Normalize an arbitrary device-reported label into a safe fact name.
///
/// Surrounding whitespace is trimmed, every character that is not an ASCII
/// letter or underscore becomes one underscore, and letters are lowercased.
/// The result contains only lowercase letters and underscores, which makes
/// the function idempotent.
pub fn normalize_fact_name(raw: &str) -> String {
    raw.trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphabetic() {
                c.to_ascii_lowercase()
            } else if c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn golden_normalize_trims_and_lowercases() {
        assert_eq!(normalize_fact_name("  Free Memory "), "free_memory");
        assert_eq!(normalize_fact_name("Hostname"), "hostname");
        assert_eq!(normalize_fact_name("already_safe"), "already_safe");
    }

    #[test]
    fn golden_normalize_replaces_each_invalid_char() {
        // Every non-letter/underscore character becomes exactly one underscore.
        assert_eq!(normalize_fact_name("CPU-Usage(%)"), "cpu_usage___");
        assert_eq!(normalize_fact_name("Serial No."), "serial_no_");
        assert_eq!(normalize_fact_name("a:b:c"), "a_b_c");
    }

    #[test]
    fn golden_normalize_degenerate_inputs() {
        assert_eq!(normalize_fact_name(""), "");
        assert_eq!(normalize_fact_name("   "), "");
        assert_eq!(normalize_fact_name("(%)"), "___");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        for raw in [
            "  Free Memory ",
            "CPU-Usage(%)",
            "",
            "(%)",
            "Sessions: active",
            "Häufigkeit",
            "a_b_c",
        ] {
            let once = normalize_fact_name(raw);
            assert_eq!(normalize_fact_name(&once), once, "input {:?}", raw);
        }
    }
}
