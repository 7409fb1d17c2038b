//! Test helpers shared across the `fieldflags` workspace.
//!
//! Flag defaults written as `$NAME` read the process environment, so tests
//! that exercise them need to change environment variables without racing
//! each other. The [`env`] module provides guards for that.

pub mod env;
