//! Terminal renderings of the static reference content.
//!
//! Everything here formats build-time data: the comparison table, the
//! decision flow (derived from the classifier's rule table, so the two
//! cannot drift), and single-category description cards.

use std::fmt::Write as _;

use crate::classifier::DECISION_ORDER;
use crate::taxonomy::{ENTRIES, ReferenceEntry};

/// Format one reference entry as an indented card.
#[must_use]
pub fn format_entry(entry: &ReferenceEntry) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{}", entry.category.display_name());
    let _ = writeln!(out, "  {}", entry.summary);
    let _ = writeln!(out, "\n  Purpose:\n    {}", entry.purpose);

    let _ = writeln!(out, "  Advantages:");
    for advantage in entry.advantages {
        let _ = writeln!(out, "    + {advantage}");
    }

    let _ = writeln!(out, "  Disadvantages:");
    for disadvantage in entry.disadvantages {
        let _ = writeln!(out, "    - {disadvantage}");
    }

    let _ = writeln!(out, "  Example:\n    {}", entry.example);

    out
}

/// Format the full comparison table, one card per category.
#[must_use]
pub fn format_reference_table() -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Test-double reference ({} categories):\n", ENTRIES.len());
    for (position, entry) in ENTRIES.iter().enumerate() {
        if position > 0 {
            out.push('\n');
        }
        out.push_str(&format_entry(entry));
    }

    out
}

/// Format the decision flow as text, one question per rule in priority
/// order.
#[must_use]
pub fn format_decision_flow() -> String {
    let mut out = String::new();

    let _ = writeln!(
        out,
        "Classification decision flow (first \"yes\" wins):\n"
    );
    for (position, (observation, category)) in DECISION_ORDER.iter().enumerate() {
        let _ = writeln!(out, "  {}. {}", position + 1, observation.question());
        let _ = writeln!(out, "     yes -> {}", category.display_name());
    }
    let _ = writeln!(
        out,
        "\n  All answers no -> Unclassified: the usage does not match a \
         test double."
    );

    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::{format_decision_flow, format_entry, format_reference_table};
    use crate::classifier::DECISION_ORDER;
    use crate::taxonomy::{Category, describe};

    #[test]
    fn entry_card_carries_all_sections() {
        let card = format_entry(describe(Category::Fake));
        assert!(card.starts_with("Fake\n"));
        for section in ["Purpose:", "Advantages:", "Disadvantages:", "Example:"] {
            assert!(card.contains(section), "card missing {section}");
        }
        assert!(card.contains("in-memory store"));
    }

    #[test]
    fn reference_table_lists_every_category() {
        let table = format_reference_table();
        for category in Category::ALL {
            assert!(
                table.contains(category.display_name()),
                "table missing {category}"
            );
        }
    }

    #[test]
    fn decision_flow_follows_rule_priority() {
        let flow = format_decision_flow();
        let mut last_position = 0;
        for (observation, category) in DECISION_ORDER {
            let question_at = flow
                .find(observation.question())
                .unwrap_or_else(|| panic!("flow missing question for {observation}"));
            assert!(
                question_at >= last_position,
                "{observation} out of priority order"
            );
            last_position = question_at;

            let after_question = &flow[question_at..];
            assert!(
                after_question.contains(category.display_name()),
                "{observation} not followed by {category}"
            );
        }
        assert!(flow.contains("Unclassified"));
    }
}
