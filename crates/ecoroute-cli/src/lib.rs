//! ecoroute CLI library.
//!
//! Command handlers and output rendering for the `ecoroute` binary. The
//! binary itself only parses arguments, installs logging, and dispatches.

pub mod commands;
pub mod output;
