//! Classify test doubles from how a test actually uses them.
//!
//! Given five yes/no observations about a double's usage in one test,
//! the engine names the category (dummy, stub, fake, spy, or mock) and
//! can explain the verdict: every classification is a pure, total
//! function over the 32 possible profiles, backed by a priority-ordered
//! rule table, and every verdict can carry a rule-by-rule trace plus the
//! static reference content for the resulting category.
//!
//! The library layer depends only on serde, thiserror, and chrono;
//! everything terminal-facing (flags, prompts, colored output) sits
//! behind the `cli` feature, which the `tdc` binary requires.

pub mod classifier;
pub mod core;
pub mod taxonomy;

#[cfg(feature = "cli")]
pub mod cli;
#[cfg(feature = "cli")]
pub mod cli_app;

pub use crate::classifier::{
    Classification, DecisionTrace, ExplainLevel, RuleCheck, Verdict, classify,
    classify_with_trace, format_explain,
};
pub use crate::core::errors::{Result, TdcError};
pub use crate::core::profile::{Observation, ProfileBuilder, UsageProfile, parse_answer};
pub use crate::taxonomy::{Category, ReferenceEntry, describe};
