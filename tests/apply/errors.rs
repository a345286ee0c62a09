//! Per-entry chmod failures are isolated; the run continues.

use ownmode::adapters::UidSource;
use ownmode::api::errors::ApiError;
use ownmode::policy::Policy;
use ownmode::types::errors::{Error, ErrorKind};
use ownmode::types::{ApplyMode, ScanInput, TargetRoot};
use ownmode::Reconciler;
use serde_json::Value;

use crate::common::{mode_of, set_mode, with_temp_root, TestAudit, TestEmitter};

#[test]
fn vanished_entries_fail_alone() {
    let td = with_temp_root();
    let root = td.path();
    set_mode(root, 0o2771);
    let a = root.join("a.txt");
    let b = root.join("b.txt");
    std::fs::write(&a, b"x").unwrap();
    std::fs::write(&b, b"x").unwrap();
    set_mode(&a, 0o600);
    set_mode(&b, 0o600);

    let facts = TestEmitter::default();
    let api = Reconciler::new(facts.clone(), TestAudit::default(), Policy::default());
    let input = ScanInput::new(TargetRoot::new(root).unwrap());
    let scan = api.scan(&input).unwrap();

    // The snapshot is now stale for b.txt.
    std::fs::remove_file(&b).unwrap();
    let report = api.apply(&scan, ApplyMode::Commit).unwrap();

    assert_eq!(report.failed, 1);
    assert_eq!(report.changed, 1, "the sibling still converges");
    assert_eq!(mode_of(&a), 0o664);
    assert_eq!(report.errors.len(), 1);
    assert!(report.errors[0].contains("chmod"));

    let bad = report.outcomes.iter().find(|o| o.path == b).unwrap();
    assert!(!bad.applied);
    assert!(bad.error.is_some());

    let results = facts.stage_facts("apply.result");
    assert!(results.iter().any(|f| {
        f.get("decision") == Some(&Value::from("failure"))
            && f.get("error_id") == Some(&Value::from("E_APPLY"))
    }));

    let summary = &facts.stage_facts("apply.summary")[0];
    assert_eq!(summary.get("decision"), Some(&Value::from("failure")));
    assert_eq!(summary.get("exit_code"), Some(&Value::from(30)));
    let ids = summary.get("error_ids").and_then(Value::as_array).unwrap();
    assert!(ids.contains(&Value::from("E_APPLY")));
}

struct FailingUid;

impl UidSource for FailingUid {
    fn effective_uid(&self) -> ownmode::types::errors::Result<u32> {
        Err(Error {
            kind: ErrorKind::Io,
            msg: "no uid database".into(),
        })
    }
}

#[test]
fn uid_resolution_failure_aborts_the_run() {
    let td = with_temp_root();
    let root = td.path();
    let file = root.join("keep.txt");
    std::fs::write(&file, b"x").unwrap();
    set_mode(&file, 0o600);

    let facts = TestEmitter::default();
    let api = Reconciler::new(facts.clone(), TestAudit::default(), Policy::default())
        .with_uid_source(Box::new(FailingUid));
    let input = ScanInput::new(TargetRoot::new(root).unwrap());
    let scan = api.scan(&input).unwrap();
    let err = api.apply(&scan, ApplyMode::Commit).unwrap_err();

    assert!(matches!(err, ApiError::FilesystemError(_)));
    assert_eq!(mode_of(&file), 0o600, "nothing was applied");

    let attempts = facts.stage_facts("apply.attempt");
    assert_eq!(attempts.len(), 1);
    assert_eq!(attempts[0].get("decision"), Some(&Value::from("failure")));
    assert_eq!(attempts[0].get("error_id"), Some(&Value::from("E_GENERIC")));
}
