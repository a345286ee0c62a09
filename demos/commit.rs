use log::Level;

use ownmode::api::errors::{
    error_id_for, exit_code_for, exit_code_for_id_str, infer_summary_error_ids,
};
use ownmode::logging::{AuditSink, DiscardSink};
use ownmode::policy::Policy;
use ownmode::types::{ApplyMode, OctalMode, ScanInput, TargetRoot};
use ownmode::Reconciler;

/// Prints audit lines with their level.
struct StderrAudit;

impl AuditSink for StderrAudit {
    fn log(&self, level: Level, msg: &str) {
        eprintln!("[{level}] {msg}");
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let td = tempfile::tempdir()?;
    let root = td.path().join("drop");
    std::fs::create_dir_all(root.join("incoming"))?;
    std::fs::write(root.join("incoming/upload.bin"), b"blob")?;

    let dirs: OctalMode = "2775".parse()?;
    let files: OctalMode = "0644".parse()?;
    let api = Reconciler::new(
        DiscardSink::default(),
        StderrAudit,
        Policy::with_modes(dirs, files),
    );

    let input = ScanInput::new(TargetRoot::new(&root)?);
    let (_, report) = match api.reconcile(&input, ApplyMode::Commit) {
        Ok(run) => run,
        Err(e) => {
            eprintln!("fatal: {e}");
            std::process::exit(exit_code_for(error_id_for(&e)));
        }
    };

    for outcome in &report.outcomes {
        let state = if outcome.error.is_some() {
            "failed"
        } else if outcome.applied {
            "changed"
        } else {
            "ok"
        };
        println!(
            "{state:>8}  {} -> {}  {}",
            outcome.previous_mode,
            outcome.desired_mode,
            outcome.path.display()
        );
    }
    println!(
        "changed={} unchanged={} failed={} in {}ms",
        report.changed, report.unchanged, report.failed, report.duration_ms
    );

    if !report.errors.is_empty() {
        let ids = infer_summary_error_ids(&report.errors);
        let code = ids
            .first()
            .and_then(|id| exit_code_for_id_str(id))
            .unwrap_or(1);
        std::process::exit(code);
    }
    Ok(())
}
