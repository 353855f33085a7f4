//! Shared utilities.
//!
//! File-name wildcard matching and test helpers.

pub mod pattern;

#[cfg(test)]
pub mod testutil;
