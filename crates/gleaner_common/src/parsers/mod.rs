//! Parsers for raw appliance command output.
//!
//! The execution service hands back one opaque text blob per target.
//! Turning it into facts is a three step pipeline: strip the repeating
//! interactive prompt, split the remainder into lines, and derive a
//! normalized fact name from everything left of the first colon on each
//! line. Parse failures are typed and carry the offending line so the
//! caller can report them per target instead of aborting the fleet.

pub mod atoms;
pub mod keyvalue;
pub mod prompt;

pub use atoms::normalize_fact_name;
pub use keyvalue::parse_fact_lines;
pub use prompt::strip_prompt;

use crate::error::GatherError;
use crate::payload::FactSet;

/// Parse one target's raw command output into a fact set.
pub fn parse_fact_output(raw: &str) -> Result<FactSet, GatherError> {
    parse_fact_lines(&strip_prompt(raw))
}
