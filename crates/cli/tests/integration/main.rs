//! Integration tests for the cucumber CLI.

mod build_tests;
mod common;
mod list_tests;
