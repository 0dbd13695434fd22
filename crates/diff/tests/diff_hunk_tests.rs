use pretty_assertions::assert_eq;
use text_diff::{build_hunks, DiffHunkRange, DiffHunkStatus, EditOp};

fn equal(old: std::ops::Range<usize>, new: std::ops::Range<usize>) -> EditOp {
    EditOp::Equal { old, new }
}

#[test]
fn test_diff_hunk_added() {
    let hunks = build_hunks(&[EditOp::Insert { new: 0..3 }], 3);

    assert_eq!(hunks.len(), 1);
    let hunk = &hunks[0];
    assert_eq!(hunk.status, DiffHunkStatus::Added);
    assert_eq!(hunk.old_range, DiffHunkRange::new(0, 0));
    assert_eq!(hunk.new_range, DiffHunkRange::new(0, 3));
    assert_eq!(hunk.added_lines(), 3);
    assert_eq!(hunk.header(), "@@ -0,0 +1,3 @@");
}

#[test]
fn test_diff_hunk_deleted() {
    let ops = vec![equal(0..5, 0..5), EditOp::Delete { old: 5..8 }];
    let hunks = build_hunks(&ops, 2);

    assert_eq!(hunks.len(), 1);
    let hunk = &hunks[0];
    assert_eq!(hunk.status, DiffHunkStatus::Deleted);
    assert_eq!(hunk.old_range, DiffHunkRange::new(3, 5));
    assert_eq!(hunk.new_range, DiffHunkRange::new(3, 2));
    assert_eq!(hunk.deleted_lines(), 3);
    assert_eq!(hunk.unchanged_lines(), 2);
    assert_eq!(hunk.header(), "@@ -4,5 +4,2 @@");
}

#[test]
fn test_diff_hunk_modified() {
    let ops = vec![
        equal(0..5, 0..5),
        EditOp::Delete { old: 5..8 },
        EditOp::Insert { new: 5..9 },
        equal(8..10, 9..11),
    ];
    let hunks = build_hunks(&ops, 0);

    assert_eq!(hunks.len(), 1);
    let hunk = &hunks[0];
    assert_eq!(hunk.status, DiffHunkStatus::Modified);
    assert_eq!(hunk.old_range, DiffHunkRange::new(5, 3));
    assert_eq!(hunk.new_range, DiffHunkRange::new(5, 4));
    assert!(hunk.has_changes());
    // Lines stay empty until the hunk is bound to tokens
    assert!(hunk.lines.is_empty());
}

#[test]
fn test_no_changes_no_hunks() {
    assert!(build_hunks(&[], 3).is_empty());
    assert!(build_hunks(&[equal(0..10, 0..10)], 3).is_empty());
}

#[test]
fn test_close_changes_share_a_hunk() {
    // Four unchanged tokens between the changes fit in 2 * context
    let ops = vec![
        EditOp::Delete { old: 0..1 },
        equal(1..5, 0..4),
        EditOp::Insert { new: 4..5 },
    ];
    let hunks = build_hunks(&ops, 2);

    assert_eq!(hunks.len(), 1);
    assert_eq!(hunks[0].old_range, DiffHunkRange::new(0, 5));
    assert_eq!(hunks[0].new_range, DiffHunkRange::new(0, 5));
}

#[test]
fn test_distant_changes_split() {
    // Five unchanged tokens exceed 2 * context
    let ops = vec![
        EditOp::Delete { old: 0..1 },
        equal(1..6, 0..5),
        EditOp::Insert { new: 5..6 },
    ];
    let hunks = build_hunks(&ops, 2);

    assert_eq!(hunks.len(), 2);
    assert_eq!(hunks[0].old_range, DiffHunkRange::new(0, 3));
    assert_eq!(hunks[0].new_range, DiffHunkRange::new(0, 2));
    assert_eq!(hunks[1].old_range, DiffHunkRange::new(4, 2));
    assert_eq!(hunks[1].new_range, DiffHunkRange::new(3, 3));
}

#[test]
fn test_zero_context_splits_every_run() {
    let ops = vec![
        EditOp::Delete { old: 0..1 },
        equal(1..2, 0..1),
        EditOp::Insert { new: 1..2 },
    ];
    let hunks = build_hunks(&ops, 0);

    assert_eq!(hunks.len(), 2);
    assert_eq!(hunks[0].ops, vec![EditOp::Delete { old: 0..1 }]);
    assert_eq!(hunks[1].ops, vec![EditOp::Insert { new: 1..2 }]);
    assert_eq!(hunks[1].header(), "@@ -2,0 +2,1 @@");
}

#[test]
fn test_hunk_ops_are_coalesced() {
    let ops = vec![
        EditOp::Insert { new: 0..1 },
        EditOp::Delete { old: 0..1 },
        EditOp::Delete { old: 1..2 },
        EditOp::Insert { new: 1..2 },
    ];
    let hunks = build_hunks(&ops, 3);

    assert_eq!(
        hunks[0].ops,
        vec![EditOp::Delete { old: 0..2 }, EditOp::Insert { new: 0..2 }]
    );
}

#[test]
#[should_panic(expected = "inconsistent edit script")]
fn test_inconsistent_script_panics() {
    let ops = vec![equal(0..2, 0..3)];
    build_hunks(&ops, 3);
}
