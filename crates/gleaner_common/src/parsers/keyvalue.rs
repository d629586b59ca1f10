//! Line-oriented fact extraction.

use super::atoms::normalize_fact_name;
use crate::error::GatherError;
use crate::payload::FactSet;

/// Split prompt-stripped output into `label: value` facts.
///
/// Lines that are blank after trimming are skipped. Each remaining line is
/// split on its first colon only, so colons inside the value survive. A
/// later line with the same normalized label overwrites the earlier value.
/// A non-blank line with no colon is an error, not a silent drop; downstream
/// consumers rely on every non-blank line producing a fact.
pub fn parse_fact_lines(text: &str) -> Result<FactSet, GatherError> {
    let mut facts = FactSet::new();

    for (idx, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let (label, value) = match line.split_once(':') {
            Some(parts) => parts,
            None => {
                return Err(GatherError::Parse {
                    line_num: idx + 1,
                    line: line.to_string(),
                })
            }
        };

        facts.insert(normalize_fact_name(label), value.trim().to_string());
    }

    Ok(facts)
}
