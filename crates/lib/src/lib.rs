//! shipit-lib: Build orchestration for a Rust server and its web front-end
//!
//! This crate provides the pieces the `shipit` binary drives:
//! - `cmd`: launching commands and streaming their output
//! - `config`: immutable project configuration
//! - `build`: turning a target into an ordered plan and executing it

pub mod build;
pub mod cmd;
pub mod config;
pub mod consts;
pub mod util;
