//! Property-based tests for normalization and evaluation
//!
//! Documents are generated from the default operator codes, counts, whitespace
//! and comments, so every generated document is valid for the default table.

use klm::klm::{evaluate, normalize, CostTable};
use proptest::prelude::*;

/// One line of a valid document: operators with optional counts, maybe a comment
fn line_strategy() -> impl Strategy<Value = String> {
    (
        prop::collection::vec(
            (
                prop_oneof![Just(String::new()), "[1-9][0-9]?"],
                "[KPHBMkphbm]",
                "[ \t]{0,2}",
            ),
            0..8,
        ),
        prop_oneof![Just(String::new()), "# [ -~]{0,20}"],
    )
        .prop_map(|(steps, comment)| {
            let mut line: String = steps
                .into_iter()
                .map(|(count, op, pad)| format!("{count}{op}{pad}"))
                .collect();
            line.push_str(&comment);
            line
        })
}

fn document_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(line_strategy(), 0..10).prop_map(|lines| lines.join("\n"))
}

proptest! {
    #[test]
    fn valid_documents_produce_no_warnings(doc in document_strategy()) {
        let result = evaluate(&normalize(&doc), CostTable::defaults());
        prop_assert!(result.warnings.is_empty());
        prop_assert!(result.total >= 0.0);
    }

    #[test]
    fn normalization_is_idempotent(doc in "[ -~\t\n]{0,80}") {
        let once = normalize(&doc);
        let twice = normalize(once.as_str());
        prop_assert_eq!(once.as_str(), twice.as_str());
    }

    #[test]
    fn canonical_output_has_no_whitespace_or_lowercase(doc in "[ -~\t\n]{0,80}") {
        let sequence = normalize(&doc);
        prop_assert!(!sequence.chars().any(char::is_whitespace));
        prop_assert!(!sequence.chars().any(|c| c.is_ascii_lowercase()));
    }

    #[test]
    fn comments_never_contribute(doc in document_strategy(), comment in "[ -~]{0,30}") {
        let commented: String = doc
            .lines()
            .map(|line| if line.contains('#') { line.to_string() } else { format!("{line}#{comment}") })
            .collect::<Vec<_>>()
            .join("\n");
        let plain = normalize(&doc);
        let with_comment = normalize(&commented);
        prop_assert_eq!(plain.as_str(), with_comment.as_str());
    }

    #[test]
    fn totals_add_across_lines(a in line_strategy(), b in line_strategy()) {
        // Every generated line ends in an operator or a comment, never a dangling count
        let table = CostTable::defaults();
        let joined = evaluate(&normalize(&format!("{a}\n{b}")), table).total;
        let separate = evaluate(&normalize(&a), table).total + evaluate(&normalize(&b), table).total;
        prop_assert!((joined - separate).abs() < 1e-6);
    }

    #[test]
    fn unknown_characters_are_reported_at_their_index(
        prefix in "[KPHBM]{0,10}",
        suffix in "[KPHBM]{0,10}",
    ) {
        let sequence = normalize(&format!("{prefix}?{suffix}"));
        let result = evaluate(&sequence, CostTable::defaults());
        prop_assert_eq!(result.warnings.len(), 1);
        prop_assert_eq!(result.warnings[0].position, prefix.len());
        prop_assert_eq!(result.warnings[0].character, '?');
    }
}
