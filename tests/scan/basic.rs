//! Scan snapshots: ordering, coverage, and deterministic run ids.

use ownmode::logging::TS_ZERO;
use ownmode::policy::Policy;
use ownmode::types::{EntryKind, OctalMode, ScanInput, TargetRoot};
use ownmode::Reconciler;
use serde_json::Value;

use crate::common::{with_temp_root, TestAudit, TestEmitter};

fn input_for(root: &std::path::Path) -> ScanInput {
    ScanInput::new(TargetRoot::new(root).unwrap())
}

#[test]
fn scan_lists_root_and_descendants_sorted() {
    let td = with_temp_root();
    let root = td.path();
    std::fs::create_dir_all(root.join("b/nested")).unwrap();
    std::fs::create_dir(root.join("a_empty")).unwrap();
    std::fs::write(root.join("b/file.txt"), b"x").unwrap();
    std::fs::write(root.join("top.txt"), b"x").unwrap();
    std::os::unix::fs::symlink("top.txt", root.join("link")).unwrap();

    let api = Reconciler::new(
        TestEmitter::default(),
        TestAudit::default(),
        Policy::default(),
    );
    let report = api.scan(&input_for(root)).unwrap();

    let paths: Vec<_> = report.entries.iter().map(|e| e.path.clone()).collect();
    assert_eq!(report.entries.len(), 7);
    assert_eq!(paths[0], root, "root itself is first in sorted order");
    assert!(paths.contains(&root.join("a_empty")), "empty dirs are entries");
    assert!(paths.contains(&root.join("b/nested")));
    assert!(paths.contains(&root.join("link")));
    assert!(report.failures.is_empty());
    assert!(
        paths.windows(2).all(|w| w[0] < w[1]),
        "strictly ascending paths"
    );

    let link = report
        .entries
        .iter()
        .find(|e| e.path == root.join("link"))
        .unwrap();
    assert_eq!(link.kind, EntryKind::Symlink);
    let dir = report
        .entries
        .iter()
        .find(|e| e.path == root.join("a_empty"))
        .unwrap();
    assert_eq!(dir.kind, EntryKind::Dir);
}

#[test]
fn scan_facts_carry_minimal_envelope() {
    let td = with_temp_root();
    let root = td.path();
    std::fs::write(root.join("one.txt"), b"x").unwrap();

    let facts = TestEmitter::default();
    let api = Reconciler::new(facts.clone(), TestAudit::default(), Policy::default());
    let report = api.scan(&input_for(root)).unwrap();

    let rows = facts.stage_facts("scan");
    assert_eq!(rows.len(), 2, "one fact per entry");
    for row in &rows {
        assert_eq!(row.get("schema_version"), Some(&Value::from(1)));
        assert_eq!(row.get("ts"), Some(&Value::from(TS_ZERO)));
        assert_eq!(
            row.get("run_id"),
            Some(&Value::from(report.run_id.to_string()))
        );
        assert_eq!(row.get("dry_run"), Some(&Value::from(true)));
        assert!(row
            .get("path")
            .and_then(Value::as_str)
            .is_some_and(|p| !p.is_empty()));
        assert!(row.get("mode").is_some());
        assert!(row.get("entry_id").is_some());
    }
}

#[test]
fn run_ids_are_stable_for_identical_inputs() {
    let td = with_temp_root();
    let root = td.path();
    std::fs::write(root.join("one.txt"), b"x").unwrap();

    let api = Reconciler::new(
        TestEmitter::default(),
        TestAudit::default(),
        Policy::default(),
    );
    let first = api.scan(&input_for(root)).unwrap();
    std::fs::write(root.join("two.txt"), b"x").unwrap();
    let second = api.scan(&input_for(root)).unwrap();
    assert_eq!(
        first.run_id, second.run_id,
        "tree contents do not shape the run id"
    );

    let custom = Reconciler::new(
        TestEmitter::default(),
        TestAudit::default(),
        Policy::with_modes(OctalMode::from_raw(0o2775), OctalMode::from_raw(0o664)),
    );
    let third = custom.scan(&input_for(root)).unwrap();
    assert_ne!(first.run_id, third.run_id, "desired modes shape the run id");
}
