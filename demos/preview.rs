use log::Level;
use serde_json::Value;

use ownmode::logging::{AuditSink, FactsEmitter};
use ownmode::policy::Policy;
use ownmode::types::{ApplyMode, ScanInput, TargetRoot};
use ownmode::Reconciler;

/// Prints every fact as one JSON line.
struct StdoutFacts;

impl FactsEmitter for StdoutFacts {
    fn emit(&self, _subsystem: &str, _event: &str, _decision: &str, fields: Value) {
        println!("{fields}");
    }
}

/// Prints audit lines with their level.
struct StderrAudit;

impl AuditSink for StderrAudit {
    fn log(&self, level: Level, msg: &str) {
        eprintln!("[{level}] {msg}");
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let td = tempfile::tempdir()?;
    let root = td.path().join("shared");
    std::fs::create_dir_all(root.join("reports"))?;
    std::fs::write(root.join("reports/q3.txt"), b"draft")?;
    std::fs::write(root.join("readme.txt"), b"hello")?;

    let api = Reconciler::new(StdoutFacts, StderrAudit, Policy::default());
    let input = ScanInput::new(TargetRoot::new(&root)?);

    // Dry-run: facts show what would change, nothing is touched.
    let (scan, report) = api.reconcile(&input, ApplyMode::DryRun)?;
    eprintln!(
        "previewed {} entries: {} would change, {} already converged",
        scan.entries.len(),
        report.changed,
        report.unchanged
    );
    Ok(())
}
