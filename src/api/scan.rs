//! Scan stage: enumerate, merge supplementary files, sort, emit facts.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use log::Level;
use serde_json::json;

use crate::fs::meta::stat_entry;
use crate::fs::walk::walk_tree;
use crate::logging::audit::{AuditCtx, AuditMode};
use crate::logging::{FactsEmitter, StageLogger, TS_ZERO};
use crate::types::ids::{entry_id, run_id};
use crate::types::root::is_plain_absolute;
use crate::types::{Entry, ScanInput, ScanReport};

use super::errors::{error_id_for, exit_code_for, id_str, ApiError};
use super::Reconciler;

/// Enumerate the root tree plus supplementary files, sort deterministically,
/// and emit per-entry scan facts.
pub(super) fn run<E: FactsEmitter, A: crate::logging::AuditSink>(
    api: &Reconciler<E, A>,
    input: &ScanInput,
) -> Result<ScanReport, ApiError> {
    for extra in &input.extra_files {
        if !is_plain_absolute(extra) {
            return Err(ApiError::InvalidInput(format!(
                "extra file must be an absolute path without . or .. components: {}",
                extra.display()
            )));
        }
    }

    let rid = run_id(input, api.policy.modes.dirs, api.policy.modes.files);
    api.audit
        .log(Level::Info, &format!("scan: starting at {}", input.root));

    // Scan facts are dry-run shaped: zero timestamps, redacted.
    let tctx = AuditCtx::new(
        &api.facts as &dyn FactsEmitter,
        rid.to_string(),
        TS_ZERO.to_string(),
        AuditMode {
            dry_run: true,
            redact: true,
        },
    );
    let slog = StageLogger::new(&tctx);

    let walk = match walk_tree(&input.root) {
        Ok(walk) => walk,
        Err(e) => {
            let msg = format!("{}: {e}", input.root.as_path().display());
            api.audit
                .log(Level::Error, &format!("scan: enumeration failed: {msg}"));
            let err = ApiError::Enumeration(msg);
            let id = error_id_for(&err);
            slog.scan()
                .path(input.root.to_string())
                .field("error", json!(e.to_string()))
                .field("error_id", json!(id_str(id)))
                .field("exit_code", json!(exit_code_for(id)))
                .emit_failure();
            return Err(err);
        }
    };

    let mut entries = walk.entries;
    let mut failures = walk.failures;

    // Supplementary files live outside the walked tree; each one pulls in its
    // directory chain up to (but never including) the root's own ancestry.
    let mut known: BTreeSet<PathBuf> = entries.iter().map(|e| e.path.clone()).collect();
    for extra in &input.extra_files {
        if input.root.contains(extra) {
            // The walk already covered it.
            continue;
        }
        if input.root.is_strict_ancestor(extra) {
            failures.push(format!(
                "extra {} is an ancestor of the root and was not scanned",
                extra.display()
            ));
            continue;
        }
        match stat_entry(extra) {
            Ok(entry) => {
                if known.insert(entry.path.clone()) {
                    entries.push(entry);
                }
            }
            Err(e) => {
                failures.push(format!("stat {}: {e}", extra.display()));
                continue;
            }
        }
        push_ancestors(input, extra, &mut known, &mut entries, &mut failures);
    }

    entries.sort_by(|a, b| a.path.cmp(&b.path));

    for (idx, entry) in entries.iter().enumerate() {
        let eid = entry_id(&rid, entry, idx).to_string();
        slog.scan()
            .entry(eid)
            .path(entry.path.display().to_string())
            .field("kind", json!(entry.kind.as_str()))
            .field("uid", json!(entry.uid))
            .field("mode", json!(entry.mode.to_string()))
            .emit_success();
    }
    for note in &failures {
        slog.scan().field("note", json!(note)).emit_warn();
        api.audit.log(Level::Warn, &format!("scan: {note}"));
    }

    api.audit.log(
        Level::Info,
        &format!(
            "scan: {} entries, {} failures",
            entries.len(),
            failures.len()
        ),
    );
    Ok(ScanReport {
        run_id: rid,
        root: input.root.as_path().to_path_buf(),
        entries,
        failures,
    })
}

/// Walk the parent chain of `extra` upward, recording each directory until
/// the chain meets the root's own ancestry.
fn push_ancestors(
    input: &ScanInput,
    extra: &Path,
    known: &mut BTreeSet<PathBuf>,
    entries: &mut Vec<Entry>,
    failures: &mut Vec<String>,
) {
    let mut cursor = extra.parent();
    while let Some(dir) = cursor {
        if input.root.contains(dir) || input.root.is_strict_ancestor(dir) {
            break;
        }
        if known.insert(dir.to_path_buf()) {
            match stat_entry(dir) {
                Ok(entry) => entries.push(entry),
                Err(e) => failures.push(format!("stat {}: {e}", dir.display())),
            }
        }
        cursor = dir.parent();
    }
}
