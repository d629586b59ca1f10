//! Exit codes for gleanerctl.

/// Exit code for success
pub const EXIT_SUCCESS: i32 = 0;

/// Exit code for general errors (bad config, unreachable services)
pub const EXIT_GENERAL_ERROR: i32 = 1;

/// Exit code when at least one target failed a stage
pub const EXIT_PARTIAL_FAILURE: i32 = 2;
