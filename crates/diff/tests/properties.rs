use proptest::prelude::*;
use similar::{capture_diff_slices, Algorithm, DiffTag};
use text_diff::{align, tokenize, DiffConfig, DiffGranularity, EditOp, TextDiff, Token};

/// Texts over a tiny alphabet so the two sides share plenty of lines.
/// Some lines differ only in whitespace or a carriage return.
fn text_strategy() -> impl Strategy<Value = String> {
    let line = prop_oneof!["a", "b", "c", "d", "", " a", "a\t", "b  c", "b c", "c\r"];
    prop::collection::vec(line, 0..24).prop_flat_map(|lines| {
        any::<bool>().prop_map(move |trailing| {
            let mut text = lines.join("\n");
            if trailing && !lines.is_empty() {
                text.push('\n');
            }
            text
        })
    })
}

fn granularity_strategy() -> impl Strategy<Value = DiffGranularity> {
    prop_oneof![
        Just(DiffGranularity::Line),
        Just(DiffGranularity::Word),
        Just(DiffGranularity::Character),
    ]
}

fn distance(ops: &[EditOp]) -> usize {
    ops.iter()
        .filter(|op| op.is_change())
        .map(|op| op.old_len() + op.new_len())
        .sum()
}

fn lcs_len(old: &[&str], new: &[&str]) -> usize {
    let mut row = vec![0usize; new.len() + 1];
    for a in old {
        let mut diagonal = 0;
        for (j, b) in new.iter().enumerate() {
            let above = row[j + 1];
            row[j + 1] = if a == b {
                diagonal + 1
            } else {
                row[j + 1].max(row[j])
            };
            diagonal = above;
        }
    }
    row[new.len()]
}

fn texts<'a>(tokens: &[Token<'a>]) -> Vec<&'a str> {
    tokens.iter().map(Token::text).collect()
}

proptest! {
    #[test]
    fn prop_apply_rebuilds_new(
        old in text_strategy(),
        new in text_strategy(),
        granularity in granularity_strategy(),
        context in 0usize..4,
        ignore_whitespace in any::<bool>(),
        ignore_line_endings in any::<bool>(),
    ) {
        let diff = DiffConfig::default()
            .granularity(granularity)
            .context_lines(context)
            .ignore_whitespace(ignore_whitespace)
            .ignore_line_endings(ignore_line_endings)
            .diff(&old, &new);

        prop_assert_eq!(diff.apply(&old).unwrap(), new.clone());
        prop_assert_eq!(diff.revert(&new).unwrap(), old);
    }

    #[test]
    fn prop_identical_inputs_have_no_hunks(
        text in text_strategy(),
        granularity in granularity_strategy(),
    ) {
        let diff = TextDiff::diff_with_granularity(&text, &text, granularity);

        prop_assert!(diff.is_identical());
        prop_assert!(diff.hunks().is_empty());
        prop_assert!(diff.ops().iter().all(|op| !op.is_change()));
    }

    #[test]
    fn prop_edit_distance_is_minimal(old in text_strategy(), new in text_strategy()) {
        let old_tokens = tokenize(&old, DiffGranularity::Line);
        let new_tokens = tokenize(&new, DiffGranularity::Line);
        let ops = align(&old_tokens, &new_tokens);

        let common = lcs_len(&texts(&old_tokens), &texts(&new_tokens));
        prop_assert_eq!(distance(&ops), old_tokens.len() + new_tokens.len() - 2 * common);
    }

    #[test]
    fn prop_never_longer_than_similar(old in text_strategy(), new in text_strategy()) {
        let old_tokens = tokenize(&old, DiffGranularity::Character);
        let new_tokens = tokenize(&new, DiffGranularity::Character);
        let ours = distance(&align(&old_tokens, &new_tokens));

        let reference: usize = capture_diff_slices(
            Algorithm::Myers,
            &texts(&old_tokens),
            &texts(&new_tokens),
        )
        .iter()
        .filter(|op| op.tag() != DiffTag::Equal)
        .map(|op| op.old_range().len() + op.new_range().len())
        .sum();

        prop_assert!(ours <= reference, "ours {} vs similar {}", ours, reference);
    }

    #[test]
    fn prop_ops_cover_both_sides(old in text_strategy(), new in text_strategy()) {
        let old_tokens = tokenize(&old, DiffGranularity::Line);
        let new_tokens = tokenize(&new, DiffGranularity::Line);
        let ops = align(&old_tokens, &new_tokens);

        let mut old_pos = 0;
        let mut new_pos = 0;
        for op in &ops {
            if let Some(range) = op.old_range() {
                prop_assert_eq!(range.start, old_pos);
                old_pos = range.end;
            }
            if let Some(range) = op.new_range() {
                prop_assert_eq!(range.start, new_pos);
                new_pos = range.end;
            }
            if let EditOp::Equal { old, new } = op {
                prop_assert_eq!(texts(&old_tokens[old.clone()]), texts(&new_tokens[new.clone()]));
            }
        }
        prop_assert_eq!(old_pos, old_tokens.len());
        prop_assert_eq!(new_pos, new_tokens.len());

        for pair in ops.windows(2) {
            let same_kind = std::mem::discriminant(&pair[0]) == std::mem::discriminant(&pair[1]);
            prop_assert!(!same_kind, "adjacent ops of one kind: {} {}", pair[0], pair[1]);
            prop_assert!(
                !matches!((&pair[0], &pair[1]), (EditOp::Insert { .. }, EditOp::Delete { .. })),
                "insert before delete: {} {}", pair[0], pair[1]
            );
        }
    }

    #[test]
    fn prop_hunk_context_is_bounded(
        old in text_strategy(),
        new in text_strategy(),
        granularity in granularity_strategy(),
        context in 0usize..4,
    ) {
        let diff = TextDiff::configure()
            .granularity(granularity)
            .context_lines(context)
            .diff(&old, &new);

        for hunk in diff.hunks() {
            prop_assert!(hunk.has_changes());
            let last = hunk.ops.len() - 1;
            for (index, op) in hunk.ops.iter().enumerate() {
                if let EditOp::Equal { old, .. } = op {
                    let limit = if index == 0 || index == last { context } else { 2 * context };
                    prop_assert!(old.len() <= limit, "{} exceeds {}", op, limit);
                }
            }
            prop_assert_eq!(hunk.lines.len(), hunk.unchanged_lines() + hunk.added_lines() + hunk.deleted_lines());
        }

        for pair in diff.hunks().windows(2) {
            prop_assert!(pair[0].old_range.end() < pair[1].old_range.start);
        }
    }
}
