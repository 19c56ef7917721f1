//! Step definitions for issue query BDD scenarios.

pub mod when;
pub mod world;
