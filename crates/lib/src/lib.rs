//! cucumber-lib: module resolution and ordered assembly for cucumber.
//!
//! This crate holds the whole build pipeline:
//! - `config`: the immutable build configuration
//! - `discover`: recursive module discovery
//! - `load` / `artifact`: reading modules and appending them to the bundle
//! - `sequence`: strictly ordered, one-at-a-time module processing
//! - `pipeline`: the controller that validates, truncates, and runs a build

pub mod artifact;
pub mod config;
pub mod consts;
pub mod discover;
pub mod error;
pub mod load;
pub mod module;
pub mod pipeline;
pub mod report;
pub mod sequence;
pub mod util;
