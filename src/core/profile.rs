//! Usage profiles: the five yes/no observations recorded about how a test
//! double was used in one test.
//!
//! A [`UsageProfile`] is a plain value object constructed fresh per query.
//! Every combination of the five booleans is a legal profile; completeness
//! (all five answered) is enforced at construction time by
//! [`ProfileBuilder`], never by the classifier.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::errors::{Result, TdcError};

// ---------------------------------------------------------------------------
// Observation vocabulary
// ---------------------------------------------------------------------------

/// The five independent observations that make up a usage profile.
///
/// Declaration order follows the data model, not decision priority; the
/// classifier consults these through its own priority table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Observation {
    /// Double is supplied only to satisfy a dependency requirement; no call
    /// on it matters to the test.
    PassedButUnused,
    /// Double was programmed to return specific canned values for specific
    /// calls.
    ConfiguredReturns,
    /// Double re-implements real logic in simplified, stateful form (e.g. an
    /// in-memory store).
    SimplifiedRealImplementation,
    /// Test asserts on the calls made to the double (count, arguments) after
    /// the fact.
    TracksInvocations,
    /// Double was configured with expected interactions before exercising
    /// the system under test, and those expectations are checked as a unit
    /// at the end.
    PresetExpectationsVerifiedAtEnd,
}

impl Observation {
    /// All observations, in data-model declaration order.
    pub const ALL: &'static [Self] = &[
        Self::PassedButUnused,
        Self::ConfiguredReturns,
        Self::SimplifiedRealImplementation,
        Self::TracksInvocations,
        Self::PresetExpectationsVerifiedAtEnd,
    ];

    /// Number of observations in a complete profile.
    pub const COUNT: usize = Self::ALL.len();

    /// Stable identifier; matches the corresponding [`UsageProfile`] field
    /// name so that missing-field reports line up with the wire form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PassedButUnused => "is_passed_but_unused",
            Self::ConfiguredReturns => "has_configured_returns",
            Self::SimplifiedRealImplementation => "is_simplified_real_implementation",
            Self::TracksInvocations => "tracks_invocations",
            Self::PresetExpectationsVerifiedAtEnd => "has_preset_expectations_verified_at_end",
        }
    }

    /// Short human label used in trace and report rendering.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::PassedButUnused => "passed but unused",
            Self::ConfiguredReturns => "configured returns",
            Self::SimplifiedRealImplementation => "simplified real implementation",
            Self::TracksInvocations => "tracks invocations",
            Self::PresetExpectationsVerifiedAtEnd => "preset expectations verified at end",
        }
    }

    /// Long CLI flag (without leading dashes) answering this observation.
    #[must_use]
    pub const fn flag(self) -> &'static str {
        match self {
            Self::PassedButUnused => "passed-but-unused",
            Self::ConfiguredReturns => "configured-returns",
            Self::SimplifiedRealImplementation => "simplified-implementation",
            Self::TracksInvocations => "tracks-invocations",
            Self::PresetExpectationsVerifiedAtEnd => "preset-expectations",
        }
    }

    /// Yes/no question posed in an interactive session.
    #[must_use]
    pub const fn question(self) -> &'static str {
        match self {
            Self::PassedButUnused => {
                "Is the double only passed along to satisfy a dependency, \
                 with no call on it mattering to the test?"
            }
            Self::ConfiguredReturns => {
                "Was the double programmed to return specific canned values \
                 for specific calls?"
            }
            Self::SimplifiedRealImplementation => {
                "Does the double re-implement the real logic in a simplified, \
                 working form (e.g. an in-memory store)?"
            }
            Self::TracksInvocations => {
                "Does the test assert afterwards on the calls made to the \
                 double (count, arguments)?"
            }
            Self::PresetExpectationsVerifiedAtEnd => {
                "Were expected interactions configured up front and verified \
                 as a unit at the end?"
            }
        }
    }

    /// Position in [`Self::ALL`]; used as the builder's answer slot.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::PassedButUnused => 0,
            Self::ConfiguredReturns => 1,
            Self::SimplifiedRealImplementation => 2,
            Self::TracksInvocations => 3,
            Self::PresetExpectationsVerifiedAtEnd => 4,
        }
    }
}

impl fmt::Display for Observation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Usage profile
// ---------------------------------------------------------------------------

/// A record of the five observations about one test double in one test.
///
/// All fields are required in the wire form: a serialized profile missing a
/// field (or carrying an unknown one) is rejected at the parse boundary,
/// before classification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UsageProfile {
    /// Double is supplied only to satisfy a dependency requirement.
    pub is_passed_but_unused: bool,
    /// Double was programmed with canned return values.
    pub has_configured_returns: bool,
    /// Double re-implements real logic in simplified, stateful form.
    pub is_simplified_real_implementation: bool,
    /// Test asserts post hoc on calls made to the double.
    pub tracks_invocations: bool,
    /// Expectations were preset and verified as a unit at the end.
    pub has_preset_expectations_verified_at_end: bool,
}

impl UsageProfile {
    /// Start building a profile answer by answer.
    #[must_use]
    pub fn builder() -> ProfileBuilder {
        ProfileBuilder::new()
    }

    /// Whether the given observation holds in this profile.
    #[must_use]
    pub const fn observed(&self, observation: Observation) -> bool {
        match observation {
            Observation::PassedButUnused => self.is_passed_but_unused,
            Observation::ConfiguredReturns => self.has_configured_returns,
            Observation::SimplifiedRealImplementation => self.is_simplified_real_implementation,
            Observation::TracksInvocations => self.tracks_invocations,
            Observation::PresetExpectationsVerifiedAtEnd => {
                self.has_preset_expectations_verified_at_end
            }
        }
    }

    /// Parse a profile from its JSON wire form, rejecting missing or unknown
    /// fields at this boundary.
    pub fn from_json(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).map_err(TdcError::from)
    }
}

// ---------------------------------------------------------------------------
// Builder (the construction-time completeness boundary)
// ---------------------------------------------------------------------------

/// Accumulates per-observation answers and refuses to build an incomplete
/// profile.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileBuilder {
    answers: [Option<bool>; Observation::COUNT],
}

impl ProfileBuilder {
    /// Empty builder with no observation answered.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            answers: [None; Observation::COUNT],
        }
    }

    /// Record an answer. Re-answering an observation overwrites it.
    pub fn answer(&mut self, observation: Observation, value: bool) -> &mut Self {
        self.answers[observation.index()] = Some(value);
        self
    }

    /// The recorded answer for an observation, if any.
    #[must_use]
    pub const fn get(&self, observation: Observation) -> Option<bool> {
        self.answers[observation.index()]
    }

    /// Observations not yet answered, in data-model order.
    #[must_use]
    pub fn missing(&self) -> Vec<Observation> {
        Observation::ALL
            .iter()
            .copied()
            .filter(|observation| self.answers[observation.index()].is_none())
            .collect()
    }

    /// Whether all five observations have been answered.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.answers.iter().all(Option::is_some)
    }

    /// Build the profile, rejecting incompleteness with `TDC-1001`.
    pub fn build(&self) -> Result<UsageProfile> {
        let missing = self.missing();
        if !missing.is_empty() {
            let missing = missing
                .iter()
                .map(|observation| observation.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            return Err(TdcError::IncompleteProfile { missing });
        }

        let mut profile = UsageProfile::default();
        for observation in Observation::ALL {
            // Completeness was checked above; the fallback is unreachable.
            let value = self.answers[observation.index()].unwrap_or(false);
            match observation {
                Observation::PassedButUnused => profile.is_passed_but_unused = value,
                Observation::ConfiguredReturns => profile.has_configured_returns = value,
                Observation::SimplifiedRealImplementation => {
                    profile.is_simplified_real_implementation = value;
                }
                Observation::TracksInvocations => profile.tracks_invocations = value,
                Observation::PresetExpectationsVerifiedAtEnd => {
                    profile.has_preset_expectations_verified_at_end = value;
                }
            }
        }
        Ok(profile)
    }
}

// ---------------------------------------------------------------------------
// Answer vocabulary
// ---------------------------------------------------------------------------

/// Parse a yes/no answer token.
///
/// Accepts `yes`/`y`/`true`/`1` and `no`/`n`/`false`/`0`, case-insensitive,
/// surrounding whitespace ignored. Anything else is `TDC-1002`.
pub fn parse_answer(raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "yes" | "y" | "true" | "1" => Ok(true),
        "no" | "n" | "false" | "0" => Ok(false),
        _ => Err(TdcError::InvalidAnswer {
            raw: raw.to_string(),
        }),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::{Observation, ProfileBuilder, UsageProfile, parse_answer};
    use crate::core::errors::TdcError;

    #[test]
    fn all_covers_every_observation_once() {
        assert_eq!(Observation::ALL.len(), Observation::COUNT);
        for (position, observation) in Observation::ALL.iter().enumerate() {
            assert_eq!(observation.index(), position);
        }
    }

    #[test]
    fn identifiers_match_wire_field_names() {
        let json = serde_json::to_value(UsageProfile::default()).unwrap();
        let object = json.as_object().unwrap();
        for observation in Observation::ALL {
            assert!(
                object.contains_key(observation.as_str()),
                "wire form missing {observation}"
            );
        }
        assert_eq!(object.len(), Observation::COUNT);
    }

    #[test]
    fn observed_reads_the_matching_field() {
        let profile = UsageProfile {
            tracks_invocations: true,
            ..UsageProfile::default()
        };
        assert!(profile.observed(Observation::TracksInvocations));
        assert!(!profile.observed(Observation::ConfiguredReturns));
    }

    #[test]
    fn builder_tracks_missing_in_declaration_order() {
        let mut builder = ProfileBuilder::new();
        builder
            .answer(Observation::TracksInvocations, true)
            .answer(Observation::PassedButUnused, false);
        assert_eq!(
            builder.missing(),
            vec![
                Observation::ConfiguredReturns,
                Observation::SimplifiedRealImplementation,
                Observation::PresetExpectationsVerifiedAtEnd,
            ]
        );
        assert!(!builder.is_complete());
    }

    #[test]
    fn builder_rejects_incomplete_profile_listing_gaps() {
        let mut builder = ProfileBuilder::new();
        builder.answer(Observation::ConfiguredReturns, true);
        let err = builder.build().unwrap_err();
        assert_eq!(err.code(), "TDC-1001");
        let message = err.to_string();
        assert!(message.contains("is_passed_but_unused"));
        assert!(message.contains("tracks_invocations"));
        assert!(!message.contains("has_configured_returns"));
    }

    #[test]
    fn builder_builds_complete_profile() {
        let mut builder = UsageProfile::builder();
        for observation in Observation::ALL {
            builder.answer(*observation, *observation == Observation::ConfiguredReturns);
        }
        let profile = builder.build().unwrap();
        assert_eq!(
            profile,
            UsageProfile {
                has_configured_returns: true,
                ..UsageProfile::default()
            }
        );
    }

    #[test]
    fn builder_overwrite_takes_last_answer() {
        let mut builder = ProfileBuilder::new();
        builder.answer(Observation::PassedButUnused, true);
        builder.answer(Observation::PassedButUnused, false);
        assert_eq!(builder.get(Observation::PassedButUnused), Some(false));
    }

    #[test]
    fn answer_vocabulary_accepts_both_spellings() {
        for token in ["yes", "YES", " y ", "true", "1"] {
            assert!(parse_answer(token).unwrap(), "token {token:?}");
        }
        for token in ["no", "No", "n", "FALSE", "0"] {
            assert!(!parse_answer(token).unwrap(), "token {token:?}");
        }
    }

    #[test]
    fn answer_vocabulary_rejects_everything_else() {
        for token in ["maybe", "", "yess", "2", "ja"] {
            let err = parse_answer(token).unwrap_err();
            assert!(matches!(err, TdcError::InvalidAnswer { .. }), "token {token:?}");
        }
    }

    #[test]
    fn profile_json_round_trip() {
        let profile = UsageProfile {
            is_simplified_real_implementation: true,
            tracks_invocations: true,
            ..UsageProfile::default()
        };
        let json = serde_json::to_string(&profile).unwrap();
        assert_eq!(UsageProfile::from_json(&json).unwrap(), profile);
    }

    #[test]
    fn profile_json_missing_field_is_rejected() {
        let err = UsageProfile::from_json(r#"{"is_passed_but_unused": true}"#).unwrap_err();
        assert_eq!(err.code(), "TDC-1003");
    }

    #[test]
    fn profile_json_unknown_field_is_rejected() {
        let raw = r#"{
            "is_passed_but_unused": false,
            "has_configured_returns": false,
            "is_simplified_real_implementation": false,
            "tracks_invocations": false,
            "has_preset_expectations_verified_at_end": false,
            "is_verified": true
        }"#;
        let err = UsageProfile::from_json(raw).unwrap_err();
        assert_eq!(err.code(), "TDC-1003");
    }
}
