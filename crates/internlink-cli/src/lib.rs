//! Shared pieces of the InternLink CLI.

pub mod logging;
