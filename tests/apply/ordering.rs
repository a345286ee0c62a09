//! Directories are re-moded after their contents, deepest first.

use std::path::Path;

use ownmode::policy::Policy;
use ownmode::types::{ApplyMode, OctalMode, ScanInput, TargetRoot};
use ownmode::Reconciler;

use crate::common::{mode_of, set_mode, with_temp_root, TestAudit, TestEmitter};

#[test]
fn dir_outcomes_follow_their_descendants() {
    let td = with_temp_root();
    let root = td.path();
    std::fs::create_dir_all(root.join("a/b/c")).unwrap();
    std::fs::write(root.join("top.txt"), b"x").unwrap();
    std::fs::write(root.join("a/b/c/deep.txt"), b"x").unwrap();
    for dir in [
        root.to_path_buf(),
        root.join("a"),
        root.join("a/b"),
        root.join("a/b/c"),
    ] {
        set_mode(&dir, 0o755);
    }

    let api = Reconciler::new(
        TestEmitter::default(),
        TestAudit::default(),
        Policy::default(),
    );
    let input = ScanInput::new(TargetRoot::new(root).unwrap());
    let (_, report) = api.reconcile(&input, ApplyMode::Commit).unwrap();
    assert_eq!(report.failed, 0);

    let pos = |p: &Path| {
        report
            .outcomes
            .iter()
            .position(|o| o.path == p)
            .unwrap_or_else(|| panic!("no outcome for {}", p.display()))
    };
    assert!(pos(&root.join("a/b/c")) > pos(&root.join("a/b/c/deep.txt")));
    assert!(pos(&root.join("a/b")) > pos(&root.join("a/b/c")));
    assert!(pos(&root.join("a")) > pos(&root.join("a/b")));
    assert!(pos(root) > pos(&root.join("a")));
    assert!(
        pos(&root.join("top.txt")) < pos(&root.join("a/b/c")),
        "files come before every directory"
    );
}

#[test]
fn restrictive_dir_modes_do_not_lock_out_the_run() {
    let td = with_temp_root();
    let root = td.path();
    std::fs::create_dir_all(root.join("a/b")).unwrap();
    std::fs::write(root.join("a/b/deep.txt"), b"x").unwrap();
    set_mode(root, 0o755);
    set_mode(&root.join("a"), 0o755);
    set_mode(&root.join("a/b"), 0o755);
    set_mode(&root.join("a/b/deep.txt"), 0o600);

    // A dir target without search permission would strand descendants if
    // parents were re-moded first.
    let policy = Policy::with_modes(OctalMode::from_raw(0o600), OctalMode::from_raw(0o640));
    let api = Reconciler::new(TestEmitter::default(), TestAudit::default(), policy);
    let input = ScanInput::new(TargetRoot::new(root).unwrap());
    let (_, report) = api.reconcile(&input, ApplyMode::Commit).unwrap();

    assert_eq!(report.failed, 0, "no lockout when children go first");
    assert_eq!(report.changed, 4);
    assert!(report
        .outcomes
        .iter()
        .all(|o| o.applied && o.error.is_none()));
    assert_eq!(mode_of(root), 0o600);

    // Reopen the tree top-down so the tempdir can clean up.
    set_mode(root, 0o700);
    set_mode(&root.join("a"), 0o700);
    set_mode(&root.join("a/b"), 0o700);
    assert_eq!(mode_of(&root.join("a/b/deep.txt")), 0o640);
}
