//! The test-double taxonomy: five categories and their reference content.
//!
//! [`describe`] is a total, build-time-fixed lookup: one [`ReferenceEntry`]
//! per category, transcribed from the comparison table this crate
//! formalizes. Nothing here is computed at runtime.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::errors::{Result, TdcError};

pub mod render;

// ---------------------------------------------------------------------------
// Categories
// ---------------------------------------------------------------------------

/// The five test-double categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Passed around but never actually used.
    Dummy,
    /// Answers calls with canned values.
    Stub,
    /// A working implementation with a production-unsuitable shortcut.
    Fake,
    /// Records received calls for post-hoc assertions.
    Spy,
    /// Pre-programmed expectations, verified as a unit at the end.
    Mock,
}

impl Category {
    /// All categories, in taxonomy presentation order.
    pub const ALL: &'static [Self] = &[
        Self::Dummy,
        Self::Stub,
        Self::Fake,
        Self::Spy,
        Self::Mock,
    ];

    /// Lowercase wire/CLI name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Dummy => "dummy",
            Self::Stub => "stub",
            Self::Fake => "fake",
            Self::Spy => "spy",
            Self::Mock => "mock",
        }
    }

    /// Capitalized display name.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Dummy => "Dummy",
            Self::Stub => "Stub",
            Self::Fake => "Fake",
            Self::Spy => "Spy",
            Self::Mock => "Mock",
        }
    }

    /// Position in [`Self::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Dummy => 0,
            Self::Stub => 1,
            Self::Fake => 2,
            Self::Spy => 3,
            Self::Mock => 4,
        }
    }

    /// Resolve a category from a user-supplied name, case-insensitive.
    /// Unknown names are rejected with `TDC-2001`.
    pub fn from_name(name: &str) -> Result<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "dummy" => Ok(Self::Dummy),
            "stub" => Ok(Self::Stub),
            "fake" => Ok(Self::Fake),
            "spy" => Ok(Self::Spy),
            "mock" => Ok(Self::Mock),
            _ => Err(TdcError::UnknownCategory {
                name: name.to_string(),
            }),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Reference table
// ---------------------------------------------------------------------------

/// Static reference content for one category: the comparison-table row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReferenceEntry {
    /// The category this entry describes.
    pub category: Category,
    /// One-line definition.
    pub summary: &'static str,
    /// What the double is for.
    pub purpose: &'static str,
    /// Advantages, one clause each.
    pub advantages: &'static [&'static str],
    /// Disadvantages, one clause each.
    pub disadvantages: &'static [&'static str],
    /// A canonical, framework-neutral example.
    pub example: &'static str,
}

/// The comparison table, one row per category, in [`Category::ALL`] order.
pub static ENTRIES: [ReferenceEntry; Category::ALL.len()] = [
    ReferenceEntry {
        category: Category::Dummy,
        summary: "Passed around but never actually used; exists only to fill a parameter list.",
        purpose: "Satisfy a dependency requirement of the system under test when the \
                  collaborator itself is irrelevant to the behavior being tested.",
        advantages: &[
            "Trivial to create and maintain, since it has no behavior at all",
            "Makes it explicit in the test that the collaborator does not matter",
            "Lets the system under test be constructed without widening the test's surface",
        ],
        disadvantages: &[
            "Fails confusingly if the code under test starts calling it",
            "Can paper over a constructor that demands more collaborators than it should",
        ],
        example: "A notification service handed to a constructor whose tested code path \
                  never sends anything.",
    },
    ReferenceEntry {
        category: Category::Stub,
        summary: "Programmed with canned answers to the calls made during the test.",
        purpose: "Feed the system under test predetermined indirect inputs so a specific \
                  code path runs, without involving the real collaborator.",
        advantages: &[
            "Simple, deterministic state-based testing",
            "Isolates the test from slow, flaky, or unavailable collaborators",
            "Each test states exactly the data it runs against",
        ],
        disadvantages: &[
            "Canned answers can drift from what the real collaborator would return",
            "Verifies nothing about which calls were actually made",
            "Heavy stubbing couples tests to implementation details",
        ],
        example: "A repository stubbed to return one fixed customer record for a lookup \
                  by id.",
    },
    ReferenceEntry {
        category: Category::Fake,
        summary: "A working implementation of the dependency, taking a shortcut that makes \
                  it unsuitable for production.",
        purpose: "Replace a heavyweight dependency with a lightweight working implementation \
                  that preserves real behavior across many tests.",
        advantages: &[
            "Behaves realistically across sequences of calls, including state changes",
            "Reusable by a whole suite instead of being configured per test",
            "Supports end-to-end style scenarios without production infrastructure",
        ],
        disadvantages: &[
            "An implementation of its own to build and maintain",
            "The fake itself can have bugs that mask or invent failures",
            "Its behavior can silently diverge from the production dependency",
        ],
        example: "An in-memory store standing in for the production database.",
    },
    ReferenceEntry {
        category: Category::Spy,
        summary: "Records the calls it receives so the test can assert on them afterwards.",
        purpose: "Observe the indirect outputs of the system under test: verify after the \
                  act which calls were made, how often, and with what arguments.",
        advantages: &[
            "Verification reads in arrange-act-assert order, after the fact",
            "No interaction script to maintain up front",
            "Tolerates incidental calls the test does not care about",
        ],
        disadvantages: &[
            "Unexpected interactions pass silently unless asserted on",
            "Call recording adds bookkeeping to the double",
            "Assertions still couple the test to call signatures",
        ],
        example: "An email sender that keeps every message it was asked to deliver for \
                  later inspection.",
    },
    ReferenceEntry {
        category: Category::Mock,
        summary: "Pre-programmed with the interactions it should receive, verified as a \
                  unit at the end of the test.",
        purpose: "Behavior verification: fail the test when the system under test does not \
                  follow the specified interaction protocol.",
        advantages: &[
            "States the expected interaction contract precisely",
            "Detects unexpected or missing calls without extra assertions",
            "Frameworks automate the setup and the final verification",
        ],
        disadvantages: &[
            "Brittle under refactoring, since interaction details are pinned",
            "Expectations written before the act invert test readability",
            "Overuse welds tests to the implementation rather than the behavior",
        ],
        example: "A payment gateway expecting exactly one charge call with a given amount, \
                  verified when the test ends.",
    },
];

/// Reference lookup for a category. Total; fixed at build time.
#[must_use]
pub fn describe(category: Category) -> &'static ReferenceEntry {
    &ENTRIES[category.index()]
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
