//! CLI-only plumbing: interactive answer collection and output rendering.
//!
//! The subcommand definitions and dispatch live in [`crate::cli_app`];
//! this module holds the pieces behind them.

pub mod interactive;
pub mod report;
