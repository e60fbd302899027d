//! Classification records and their explain renderings.
//!
//! A [`Classification`] is the audit record of one classify call: the
//! input profile, the verdict, the ordered rule-by-rule trace, and the
//! query timestamp. [`format_explain`] renders the record at four
//! cumulative detail levels, from the bare verdict word (`L0`) up to the
//! full rule walk plus the reference entry for the resulting category
//! (`L3`). Every level's output strictly contains the previous level's.

use std::fmt::Write as _;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::classifier::Verdict;
use crate::core::profile::{Observation, UsageProfile};
use crate::taxonomy::{Category, describe, render};

// ---------------------------------------------------------------------------
// Record types
// ---------------------------------------------------------------------------

/// One rule consultation, in decision priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleCheck {
    /// The observation this rule keys on.
    pub observation: Observation,
    /// The category the rule assigns when it fires.
    pub category: Category,
    /// Whether the observation held in the profile.
    pub observed: bool,
    /// Whether this rule decided the verdict. At most one check fires,
    /// always the first observed one.
    pub fired: bool,
}

/// The ordered trail of rule consultations for one profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionTrace {
    /// One check per rule, in decision priority order.
    pub checks: Vec<RuleCheck>,
}

impl DecisionTrace {
    /// The check that decided the verdict, if any rule fired.
    #[must_use]
    pub fn fired(&self) -> Option<&RuleCheck> {
        self.checks.iter().find(|check| check.fired)
    }

    /// Observed checks that the fired rule overrode by priority.
    #[must_use]
    pub fn overridden(&self) -> Vec<&RuleCheck> {
        self.checks
            .iter()
            .filter(|check| check.observed && !check.fired)
            .collect()
    }
}

/// The full record of one classification query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    /// The profile that was classified.
    pub profile: UsageProfile,
    /// The verdict.
    pub verdict: Verdict,
    /// Rule-by-rule consultation trail.
    pub trace: DecisionTrace,
    /// When the query ran (UTC).
    pub classified_at: DateTime<Utc>,
}

impl Classification {
    /// Assemble a record, stamping the query time.
    #[must_use]
    pub fn new(profile: UsageProfile, verdict: Verdict, trace: DecisionTrace) -> Self {
        Self {
            profile,
            verdict,
            trace,
            classified_at: Utc::now(),
        }
    }

    /// Compact JSON encoding. Never panics.
    #[must_use]
    pub fn to_json_compact(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| String::from("{}"))
    }

    /// Pretty JSON encoding. Never panics.
    #[must_use]
    pub fn to_json_pretty(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| String::from("{}"))
    }
}

// ---------------------------------------------------------------------------
// Explain levels
// ---------------------------------------------------------------------------

/// Detail level for [`format_explain`]. Levels are cumulative: each adds
/// to the previous level's output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum ExplainLevel {
    /// The verdict word.
    L0,
    /// Plus the rule that decided it (or that none did).
    #[default]
    L1,
    /// Plus the rule-by-rule walk, including overridden observations.
    L2,
    /// Plus the reference entry for the resulting category.
    L3,
}

/// Render a classification record at the given explain level.
#[must_use]
pub fn format_explain(record: &Classification, level: ExplainLevel) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Verdict: {}", record.verdict.display_name());
    if level < ExplainLevel::L1 {
        return out;
    }

    match record.trace.fired() {
        Some(check) => {
            let _ = writeln!(
                out,
                "Deciding rule: {} -> {}",
                check.observation.label(),
                check.category.display_name()
            );
        }
        None => {
            let _ = writeln!(out, "Deciding rule: none; no observation held");
        }
    }
    if level < ExplainLevel::L2 {
        return out;
    }

    let _ = writeln!(out, "\nRule walk (priority order):");
    for (position, check) in record.trace.checks.iter().enumerate() {
        let status = if check.fired {
            "fired"
        } else if check.observed {
            "observed, overridden by a higher-priority rule"
        } else {
            "not observed"
        };
        let _ = writeln!(
            out,
            "  {}. {} -> {}: {status}",
            position + 1,
            check.observation.label(),
            check.category.display_name()
        );
    }
    if level < ExplainLevel::L3 {
        return out;
    }

    out.push('\n');
    match record.verdict.category() {
        Some(category) => out.push_str(&render::format_entry(describe(category))),
        None => {
            let _ = writeln!(
                out,
                "No reference entry applies: the recorded usage matches no \
                 test-double category. Re-examine how the double is exercised."
            );
        }
    }

    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::{ExplainLevel, format_explain};
    use crate::classifier::classify_with_trace;
    use crate::core::profile::UsageProfile;

    fn spy_profile() -> UsageProfile {
        UsageProfile {
            tracks_invocations: true,
            has_configured_returns: true,
            ..UsageProfile::default()
        }
    }

    #[test]
    fn explain_levels_are_cumulative() {
        let record = classify_with_trace(&spy_profile());

        let l0 = format_explain(&record, ExplainLevel::L0);
        let l1 = format_explain(&record, ExplainLevel::L1);
        let l2 = format_explain(&record, ExplainLevel::L2);
        let l3 = format_explain(&record, ExplainLevel::L3);

        assert!(l0.len() < l1.len(), "L1 must be longer than L0");
        assert!(l1.len() < l2.len(), "L2 must be longer than L1");
        assert!(l2.len() < l3.len(), "L3 must be longer than L2");

        for rendering in [&l1, &l2, &l3] {
            assert!(rendering.starts_with(&l0), "levels must be cumulative");
        }
    }

    #[test]
    fn explain_l2_names_the_overridden_observation() {
        let record = classify_with_trace(&spy_profile());
        let l2 = format_explain(&record, ExplainLevel::L2);
        assert!(l2.contains("Verdict: Spy"));
        assert!(l2.contains("configured returns -> Stub: observed, overridden"));
    }

    #[test]
    fn explain_handles_unclassified_at_every_level() {
        let record = classify_with_trace(&UsageProfile::default());
        for level in [
            ExplainLevel::L0,
            ExplainLevel::L1,
            ExplainLevel::L2,
            ExplainLevel::L3,
        ] {
            let rendering = format_explain(&record, level);
            assert!(rendering.contains("Unclassified"), "{level:?}");
        }
        let l3 = format_explain(&record, ExplainLevel::L3);
        assert!(l3.contains("No reference entry applies"));
    }

    #[test]
    fn record_json_roundtrip() {
        let record = classify_with_trace(&spy_profile());
        let parsed: super::Classification =
            serde_json::from_str(&record.to_json_compact()).unwrap();
        assert_eq!(parsed, record);

        let pretty: super::Classification =
            serde_json::from_str(&record.to_json_pretty()).unwrap();
        assert_eq!(pretty, record);
    }

    #[test]
    fn overridden_lists_only_non_fired_observed_checks() {
        let record = classify_with_trace(&spy_profile());
        let overridden = record.trace.overridden();
        assert_eq!(overridden.len(), 1);
        assert!(overridden[0].observed);
        assert!(!overridden[0].fired);
    }
}
