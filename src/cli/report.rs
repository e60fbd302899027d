//! Structured payloads and human renderings for CLI output.
//!
//! Every subcommand can emit either a versioned serde payload (`--json`)
//! or a human rendering. Both are built from the same underlying data, so
//! the two forms cannot disagree.

use colored::Colorize;
use serde::Serialize;

use crate::classifier::{Classification, DECISION_ORDER, ExplainLevel, Verdict, format_explain};
use crate::core::profile::Observation;
use crate::taxonomy::{Category, ENTRIES, ReferenceEntry, describe};

/// Wire-format version stamped on every JSON payload.
pub const SCHEMA_VERSION: u32 = 1;

// ---------------------------------------------------------------------------
// Payloads
// ---------------------------------------------------------------------------

/// JSON payload for `tdc classify`.
#[derive(Debug, Clone, Serialize)]
pub struct ClassifyPayload {
    /// Wire-format version.
    pub schema_version: u32,
    /// The classification record (profile, verdict, trace, timestamp).
    #[serde(flatten)]
    pub record: Classification,
    /// Reference entry for the verdict, when classified.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'static ReferenceEntry>,
}

impl ClassifyPayload {
    /// Wrap a record, attaching the reference entry when a rule fired.
    #[must_use]
    pub fn new(record: Classification) -> Self {
        let description = record.verdict.category().map(describe);
        Self {
            schema_version: SCHEMA_VERSION,
            record,
            description,
        }
    }
}

/// JSON payload for `tdc describe`.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct DescribePayload {
    /// Wire-format version.
    pub schema_version: u32,
    /// The requested reference entry.
    #[serde(flatten)]
    pub entry: &'static ReferenceEntry,
}

impl DescribePayload {
    /// Payload for one category's reference entry.
    #[must_use]
    pub fn new(category: Category) -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            entry: describe(category),
        }
    }
}

/// JSON payload for `tdc table`.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct TablePayload {
    /// Wire-format version.
    pub schema_version: u32,
    /// All reference entries, in taxonomy order.
    pub entries: &'static [ReferenceEntry],
}

impl TablePayload {
    /// Payload for the full reference table.
    #[must_use]
    pub fn new() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            entries: &ENTRIES,
        }
    }
}

impl Default for TablePayload {
    fn default() -> Self {
        Self::new()
    }
}

/// One rule of the decision flow, as data.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct FlowRule {
    /// 1-based priority; lower wins.
    pub priority: usize,
    /// The observation the rule keys on.
    pub observation: Observation,
    /// The yes/no question posed for this observation.
    pub question: &'static str,
    /// The category assigned when the answer is yes.
    pub category: Category,
}

/// JSON payload for `tdc flow`.
#[derive(Debug, Clone, Serialize)]
pub struct FlowPayload {
    /// Wire-format version.
    pub schema_version: u32,
    /// Rules in priority order.
    pub rules: Vec<FlowRule>,
    /// Verdict when no rule fires.
    pub fallback: &'static str,
}

impl FlowPayload {
    /// Payload mirroring the classifier's rule table.
    #[must_use]
    pub fn new() -> Self {
        let rules = DECISION_ORDER
            .iter()
            .enumerate()
            .map(|(position, (observation, category))| FlowRule {
                priority: position + 1,
                observation: *observation,
                question: observation.question(),
                category: *category,
            })
            .collect();
        Self {
            schema_version: SCHEMA_VERSION,
            rules,
            fallback: Verdict::Unclassified.as_str(),
        }
    }
}

impl Default for FlowPayload {
    fn default() -> Self {
        Self::new()
    }
}

/// Serialize any payload to pretty JSON for stdout. Never panics.
#[must_use]
pub fn to_json(payload: &impl Serialize) -> String {
    serde_json::to_string_pretty(payload).unwrap_or_else(|_| String::from("{}"))
}

// ---------------------------------------------------------------------------
// Human formatting
// ---------------------------------------------------------------------------

/// Format a classification for terminal output at the given explain level.
///
/// The body is the plain explain rendering; only the verdict word gets
/// color, so piped output stays byte-for-byte scriptable.
#[must_use]
pub fn format_classify_report(record: &Classification, level: ExplainLevel) -> String {
    let verdict = match record.verdict {
        Verdict::Classified(category) => category.display_name().green().bold(),
        Verdict::Unclassified => "Unclassified".yellow().bold(),
    };

    let mut out = format!("Verdict: {verdict}\n");
    let explain = format_explain(record, level);
    if let Some((_, rest)) = explain.split_once('\n') {
        out.push_str(rest);
    }
    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::{
        ClassifyPayload, DescribePayload, FlowPayload, SCHEMA_VERSION, TablePayload,
        format_classify_report, to_json,
    };
    use crate::classifier::{ExplainLevel, Verdict, classify_with_trace};
    use crate::core::profile::{Observation, UsageProfile};
    use crate::taxonomy::Category;

    #[test]
    fn classify_payload_attaches_description_only_when_classified() {
        let classified = ClassifyPayload::new(classify_with_trace(&UsageProfile {
            is_passed_but_unused: true,
            ..UsageProfile::default()
        }));
        assert_eq!(classified.schema_version, SCHEMA_VERSION);
        assert_eq!(classified.description.unwrap().category, Category::Dummy);

        let unclassified = ClassifyPayload::new(classify_with_trace(&UsageProfile::default()));
        assert!(unclassified.description.is_none());
        let json = to_json(&unclassified);
        assert!(!json.contains("\"description\""));
        assert!(json.contains("\"schema_version\""));
        assert!(json.contains("\"unclassified\""));
    }

    #[test]
    fn describe_payload_flattens_the_entry() {
        let json = to_json(&DescribePayload::new(Category::Stub));
        assert!(json.contains("\"category\": \"stub\""));
        assert!(json.contains("\"purpose\""));
        assert!(json.contains("\"advantages\""));
    }

    #[test]
    fn table_payload_lists_all_entries() {
        let payload = TablePayload::new();
        assert_eq!(payload.entries.len(), Category::ALL.len());
    }

    #[test]
    fn flow_payload_mirrors_rule_priorities() {
        let payload = FlowPayload::new();
        assert_eq!(payload.rules.len(), Observation::COUNT);
        for (position, rule) in payload.rules.iter().enumerate() {
            assert_eq!(rule.priority, position + 1);
        }
        assert_eq!(payload.rules[0].category, Category::Fake);
        // The fallback is the shared verdict vocabulary, not a parallel word.
        assert_eq!(payload.fallback, Verdict::Unclassified.as_str());
        assert_eq!(payload.fallback, "unclassified");
    }

    #[test]
    fn classify_report_keeps_the_explain_body() {
        let record = classify_with_trace(&UsageProfile {
            tracks_invocations: true,
            ..UsageProfile::default()
        });
        let report = format_classify_report(&record, ExplainLevel::L2);
        assert!(report.starts_with("Verdict: "));
        assert!(report.contains("Deciding rule: tracks invocations -> Spy"));
        assert!(report.contains("Rule walk"));
    }
}
