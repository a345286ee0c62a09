use log::Level;
use serde_json::Value;

/// Structured fact consumer. One JSON object per scan/apply event.
pub trait FactsEmitter {
    fn emit(&self, subsystem: &str, event: &str, decision: &str, fields: Value);
}

/// Human-readable audit line consumer.
pub trait AuditSink {
    fn log(&self, level: Level, msg: &str);
}

/// Default sink that drops everything. Callers wire real sinks in
/// when they want facts or audit lines persisted.
#[derive(Default)]
pub struct DiscardSink;

impl FactsEmitter for DiscardSink {
    fn emit(&self, _subsystem: &str, _event: &str, _decision: &str, _fields: Value) {}
}

impl AuditSink for DiscardSink {
    fn log(&self, _level: Level, _msg: &str) {}
}
