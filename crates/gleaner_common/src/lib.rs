//! Shared core for Gleaner: appliance output parsing and the fleet
//! aggregation pipeline around it.
//!
//! The binary crate wires these pieces to the real execution service and
//! facts database; everything here runs against the fake collaborators in
//! `exec` for deterministic tests.

pub mod config;
pub mod error;
pub mod exec;
pub mod gather;
pub mod parsers;
pub mod payload;
pub mod processor;
pub mod report;
pub mod static_facts;

pub use config::Config;
pub use error::GatherError;
pub use exec::{CommandRunner, FactsPublisher, TargetCommandResult};
pub use gather::{run, RunOptions};
pub use payload::{FactSet, PublishPayload, TargetRecord};
pub use report::{RunOutcome, RunReport};
