//! Apply stage: reconciles scanned entries to their desired modes.
//!
//! Side-effects:
//! - Emits facts for `apply.attempt` and `apply.result`, plus a run-level
//!   option echo and a final `apply.summary`.
//! - In Commit mode, issues `chmod(2)` on owned files and directories whose
//!   mode differs from policy. Dry-run performs no mutation.
//! - Never re-modes symlinks and never touches entries owned by other uids.
//!
//! Ordering: files are reconciled in path order first, then directories
//! deepest-first, so a directory mode that drops search permission cannot
//! cut off entries below it.

use std::time::Instant;

use log::Level;
use serde_json::json;

use crate::api::errors::{
    exit_code_for, exit_code_for_id_str, id_str, infer_summary_error_ids, ApiError, ErrorId,
};
use crate::api::Reconciler;
use crate::logging::audit::{AuditCtx, AuditMode};
use crate::logging::{ts_for_mode, AuditSink, FactsEmitter, StageLogger};
use crate::types::ids::entry_id;
use crate::types::{ApplyMode, ApplyReport, Entry, EntryKind, EntryOutcome, ScanReport};

pub(super) fn run<E: FactsEmitter, A: AuditSink>(
    api: &Reconciler<E, A>,
    report: &ScanReport,
    mode: ApplyMode,
) -> Result<ApplyReport, ApiError> {
    let t0 = Instant::now();
    let dry = matches!(mode, ApplyMode::DryRun);
    let rid = report.run_id;
    let tctx = AuditCtx::new(
        &api.facts as &dyn FactsEmitter,
        rid.to_string(),
        ts_for_mode(&mode),
        AuditMode {
            dry_run: dry,
            redact: dry,
        },
    );
    let slog = StageLogger::new(&tctx);

    api.audit.log(Level::Info, "apply: starting");

    // One uid per run: every ownership decision below sees the same answer.
    let run_uid = match api.uid.effective_uid() {
        Ok(uid) => uid,
        Err(e) => {
            api.audit
                .log(Level::Error, &format!("apply: uid resolution failed: {e}"));
            slog.apply_attempt()
                .field("error", json!(e.to_string()))
                .field("error_id", json!(id_str(ErrorId::E_GENERIC)))
                .field("exit_code", json!(exit_code_for(ErrorId::E_GENERIC)))
                .emit_failure();
            return Err(e.into());
        }
    };

    // Run-level attempt: echo the options that shape this run.
    slog.apply_attempt()
        .path(report.root.display().to_string())
        .merge(json!({
            "run_uid": run_uid,
            "mode_dirs": api.policy.modes.dirs.to_string(),
            "mode_files": api.policy.modes.files.to_string(),
            "entry_count": report.entries.len(),
        }))
        .emit_success();

    // Files first in path order, then directories deepest-first.
    let mut files: Vec<(usize, &Entry)> = Vec::new();
    let mut dirs: Vec<(usize, &Entry)> = Vec::new();
    for (idx, entry) in report.entries.iter().enumerate() {
        if !entry.is_reconcilable() {
            continue;
        }
        if entry.kind == EntryKind::Dir {
            dirs.push((idx, entry));
        } else {
            files.push((idx, entry));
        }
    }
    dirs.reverse();

    let mut outcomes: Vec<EntryOutcome> = Vec::new();
    let mut errors: Vec<String> = Vec::new();
    let (mut changed, mut unchanged, mut failed) = (0usize, 0usize, 0usize);

    for (idx, entry) in files.into_iter().chain(dirs) {
        if !entry.owned_by(run_uid) {
            if api.policy.reporting.log_unowned {
                api.audit.log(
                    Level::Debug,
                    &format!("skip (uid {}): {}", entry.uid, entry.path.display()),
                );
            }
            continue;
        }
        let desired = match entry.kind {
            EntryKind::Dir => api.policy.modes.dirs,
            _ => api.policy.modes.files,
        };
        let eid = entry_id(&rid, entry, idx).to_string();
        let path_str = entry.path.display().to_string();

        if entry.mode == desired {
            unchanged += 1;
            if api.policy.reporting.log_unchanged {
                api.audit
                    .log(Level::Debug, &format!("already {desired} {path_str}"));
            }
            slog.apply_result()
                .entry(eid)
                .path(path_str)
                .merge(json!({
                    "before_mode": entry.mode.to_string(),
                    "after_mode": desired.to_string(),
                    "applied": false,
                }))
                .emit_success();
            outcomes.push(EntryOutcome {
                path: entry.path.clone(),
                kind: entry.kind,
                previous_mode: entry.mode,
                desired_mode: desired,
                applied: false,
                error: None,
            });
            continue;
        }

        slog.apply_attempt()
            .entry(eid.clone())
            .path(path_str.clone())
            .merge(json!({
                "before_mode": entry.mode.to_string(),
                "planned_mode": desired.to_string(),
            }))
            .emit_success();

        let result = if dry {
            Ok(())
        } else {
            crate::fs::chmod::apply_mode(&entry.path, desired)
        };
        match result {
            Ok(()) => {
                changed += 1;
                let suffix = if dry { " (dry-run)" } else { "" };
                api.audit.log(
                    Level::Info,
                    &format!("{} -> {desired} {path_str}{suffix}", entry.mode),
                );
                slog.apply_result()
                    .entry(eid)
                    .path(path_str)
                    .merge(json!({
                        "before_mode": entry.mode.to_string(),
                        "after_mode": desired.to_string(),
                        "applied": true,
                    }))
                    .emit_success();
                outcomes.push(EntryOutcome {
                    path: entry.path.clone(),
                    kind: entry.kind,
                    previous_mode: entry.mode,
                    desired_mode: desired,
                    applied: true,
                    error: None,
                });
            }
            Err(e) => {
                // Per-entry isolation: record and keep going.
                failed += 1;
                let msg = format!("chmod {path_str}: {e}");
                api.audit.log(Level::Error, &format!("apply: {msg}"));
                errors.push(msg.clone());
                slog.apply_result()
                    .entry(eid)
                    .path(path_str)
                    .merge(json!({
                        "before_mode": entry.mode.to_string(),
                        "planned_mode": desired.to_string(),
                        "error": e.to_string(),
                        "error_id": id_str(ErrorId::E_APPLY),
                        "exit_code": exit_code_for(ErrorId::E_APPLY),
                    }))
                    .emit_failure();
                outcomes.push(EntryOutcome {
                    path: entry.path.clone(),
                    kind: entry.kind,
                    previous_mode: entry.mode,
                    desired_mode: desired,
                    applied: false,
                    error: Some(msg),
                });
            }
        }
    }

    let duration_ms = u64::try_from(t0.elapsed().as_millis()).unwrap_or(u64::MAX);
    let summary = slog.apply_summary().merge(json!({
        "changed": changed,
        "unchanged": unchanged,
        "failed": failed,
        "duration_ms": duration_ms,
    }));
    if errors.is_empty() {
        summary.emit_success();
    } else {
        let ids = infer_summary_error_ids(&errors);
        let exit = ids
            .first()
            .and_then(|id| exit_code_for_id_str(id))
            .unwrap_or(exit_code_for(ErrorId::E_GENERIC));
        summary
            .merge(json!({
                "errors": errors,
                "error_ids": ids,
                "exit_code": exit,
            }))
            .emit_failure();
    }
    api.audit.log(Level::Info, "apply: finished");

    Ok(ApplyReport {
        run_id: rid,
        outcomes,
        changed,
        unchanged,
        failed,
        duration_ms,
        errors,
    })
}
