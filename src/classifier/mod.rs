//! The classification decision plane.
//!
//! The decision flowchart is formalized as [`DECISION_ORDER`], a
//! priority-ordered rule table: the first rule whose observation holds in
//! the profile decides the category, higher-priority rules override lower
//! ones, and a profile in which nothing holds is [`Verdict::Unclassified`].
//! [`classify`] is total over all 2^5 profiles and pure; the trace-carrying
//! variant records every rule consultation for the explain renderings.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::profile::{Observation, UsageProfile};
use crate::taxonomy::Category;

pub mod trace;

pub use trace::{Classification, DecisionTrace, ExplainLevel, RuleCheck, format_explain};

// ---------------------------------------------------------------------------
// Decision table
// ---------------------------------------------------------------------------

/// The decision rules in priority order; first observed observation wins.
///
/// Overlapping profiles resolve as Fake > Mock > Spy > Stub > Dummy: the
/// more structurally specific usage dominates. All renderings of the
/// decision flow derive from this table.
pub const DECISION_ORDER: &[(Observation, Category)] = &[
    (Observation::SimplifiedRealImplementation, Category::Fake),
    (Observation::PresetExpectationsVerifiedAtEnd, Category::Mock),
    (Observation::TracksInvocations, Category::Spy),
    (Observation::ConfiguredReturns, Category::Stub),
    (Observation::PassedButUnused, Category::Dummy),
];

// ---------------------------------------------------------------------------
// Verdict
// ---------------------------------------------------------------------------

/// Outcome of classifying one usage profile.
///
/// `Unclassified` is a first-class verdict, not an error: it reports that
/// the recorded usage does not match any test-double category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "category", rename_all = "snake_case")]
pub enum Verdict {
    /// A rule fired; the profile is this category of test double.
    Classified(Category),
    /// No observation held; the usage does not look like a test double.
    Unclassified,
}

impl Verdict {
    /// The category, when classified.
    #[must_use]
    pub const fn category(self) -> Option<Category> {
        match self {
            Self::Classified(category) => Some(category),
            Self::Unclassified => None,
        }
    }

    /// Lowercase verdict name: the category name, or `unclassified`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Classified(category) => category.as_str(),
            Self::Unclassified => "unclassified",
        }
    }

    /// Capitalized verdict name for human output.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Classified(category) => category.display_name(),
            Self::Unclassified => "Unclassified",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

/// Classify a complete usage profile.
///
/// Total and pure: every one of the 32 profiles maps to exactly one
/// verdict, the same verdict on every call.
#[must_use]
pub fn classify(profile: &UsageProfile) -> Verdict {
    for (observation, category) in DECISION_ORDER {
        if profile.observed(*observation) {
            return Verdict::Classified(*category);
        }
    }
    Verdict::Unclassified
}

/// Classify a profile and record the full rule-by-rule trace.
///
/// The verdict always equals [`classify`] on the same profile; the record
/// additionally captures which rules were consulted, which fired, and
/// which observed rules a higher-priority rule overrode.
#[must_use]
pub fn classify_with_trace(profile: &UsageProfile) -> Classification {
    let mut checks = Vec::with_capacity(DECISION_ORDER.len());
    let mut verdict = Verdict::Unclassified;

    for (observation, category) in DECISION_ORDER {
        let observed = profile.observed(*observation);
        let fired = observed && verdict == Verdict::Unclassified;
        if fired {
            verdict = Verdict::Classified(*category);
        }
        checks.push(RuleCheck {
            observation: *observation,
            category: *category,
            observed,
            fired,
        });
    }

    Classification::new(*profile, verdict, DecisionTrace { checks })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
