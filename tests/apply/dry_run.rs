//! Dry-run mutates nothing and emits deterministic facts.

use ownmode::logging::TS_ZERO;
use ownmode::policy::Policy;
use ownmode::types::{ApplyMode, ScanInput, TargetRoot};
use ownmode::Reconciler;
use serde_json::Value;

use crate::common::{mode_of, set_mode, with_temp_root, TestAudit, TestEmitter};

#[test]
fn dry_run_leaves_the_tree_alone() {
    let td = with_temp_root();
    let root = td.path();
    set_mode(root, 0o700);
    let file = root.join("notes.txt");
    std::fs::write(&file, b"x").unwrap();
    set_mode(&file, 0o600);

    let facts = TestEmitter::default();
    let api = Reconciler::new(facts.clone(), TestAudit::default(), Policy::default());
    let input = ScanInput::new(TargetRoot::new(root).unwrap());
    let (_, report) = api.reconcile(&input, ApplyMode::DryRun).unwrap();

    assert_eq!(mode_of(root), 0o700, "no mutation in dry-run");
    assert_eq!(mode_of(&file), 0o600);
    assert_eq!(report.changed, 2, "both entries would change");
    assert!(report.outcomes.iter().all(|o| o.applied));

    for (_, _, _, fields) in facts.events.lock().unwrap().iter() {
        assert_eq!(fields.get("ts"), Some(&Value::from(TS_ZERO)));
        assert_eq!(fields.get("dry_run"), Some(&Value::from(true)));
        assert!(fields.get("duration_ms").is_none(), "timings are redacted");
    }
}

#[test]
fn dry_runs_repeat_byte_identical() {
    let td = with_temp_root();
    let root = td.path();
    set_mode(root, 0o700);
    std::fs::create_dir(root.join("sub")).unwrap();
    std::fs::write(root.join("sub/file.txt"), b"x").unwrap();
    set_mode(&root.join("sub/file.txt"), 0o600);

    let input = ScanInput::new(TargetRoot::new(root).unwrap());
    let run = |facts: TestEmitter| {
        let api = Reconciler::new(facts, TestAudit::default(), Policy::default());
        api.reconcile(&input, ApplyMode::DryRun).unwrap();
    };

    let first = TestEmitter::default();
    run(first.clone());
    let second = TestEmitter::default();
    run(second.clone());

    let a = first.events.lock().unwrap().clone();
    let b = second.events.lock().unwrap().clone();
    assert_eq!(a, b, "identical trees emit identical dry-run facts");
    assert!(!a.is_empty());
}
