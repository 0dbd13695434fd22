use pretty_assertions::assert_eq;
use text_diff::{
    align, apply_hunks, apply_ops, revert_hunks, revert_ops, tokenize, DiffError, DiffGranularity,
    EditOp, TextDiff, Token,
};

fn joined(tokens: &[Token<'_>]) -> String {
    tokens.iter().map(Token::text).collect()
}

#[test]
fn test_apply_and_revert_ops() {
    let old_text = "a\nb\nc\nd\n";
    let new_text = "a\nc\nd\ne\n";
    let old = tokenize(old_text, DiffGranularity::Line);
    let new = tokenize(new_text, DiffGranularity::Line);

    let ops = align(&old, &new);

    assert_eq!(joined(&apply_ops(&old, &new, &ops).unwrap()), new_text);
    assert_eq!(joined(&revert_ops(&old, &new, &ops).unwrap()), old_text);
}

#[test]
fn test_apply_ops_rejects_foreign_script() {
    let old = tokenize("a\nb\n", DiffGranularity::Line);
    let new = tokenize("a\n", DiffGranularity::Line);
    let ops = vec![EditOp::Equal { old: 0..2, new: 0..2 }];

    let err = apply_ops(&old, &new, &ops).unwrap_err();
    assert!(matches!(err, DiffError::Reconstruction { .. }));
    assert!(err
        .to_string()
        .starts_with("edit script does not reconstruct its input"));
}

#[test]
fn test_apply_and_revert_hunks() {
    let old: String = (0..40).map(|i| format!("line {i}\n")).collect();
    let new = old
        .replace("line 3\n", "")
        .replace("line 20\n", "line twenty\n")
        .replace("line 39\n", "line 39\nline 40\n");

    let diff = TextDiff::configure().context_lines(2).diff(&old, &new);
    assert_eq!(diff.hunk_count(), 3);

    assert_eq!(apply_hunks(&old, &diff).unwrap(), new);
    assert_eq!(revert_hunks(&new, &diff).unwrap(), old);
    assert_eq!(TextDiff::apply(&old, &diff).unwrap(), new);
    assert_eq!(TextDiff::revert(&new, &diff).unwrap(), old);
}

#[test]
fn test_apply_word_diff() {
    let old = "The quick brown fox";
    let new = "The slow brown dog";

    let diff = TextDiff::diff_with_granularity(old, new, DiffGranularity::Word);

    assert_eq!(diff.apply(old).unwrap(), new);
    assert_eq!(diff.revert(new).unwrap(), old);
}

#[test]
fn test_apply_to_wrong_text() {
    let diff = TextDiff::diff("a\nb\nc\n", "a\nx\nc\n");

    let err = diff.apply("a\nq\nc\n").unwrap_err();
    match err {
        DiffError::Reconstruction { op, reason } => {
            assert_eq!(op, Some(EditOp::Delete { old: 1..2 }));
            assert!(reason.contains("\"q\\n\""), "{reason}");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_apply_to_short_text() {
    let diff = TextDiff::diff("a\nb\nc\nd\n", "a\nb\nc\nD\n");

    let err = diff.apply("a\n").unwrap_err();
    assert!(matches!(err, DiffError::Reconstruction { .. }));
}

#[test]
fn test_apply_identical_is_noop() {
    let diff = TextDiff::diff("same\n", "same\n");

    assert_eq!(diff.apply("anything at all").unwrap(), "anything at all");
}
