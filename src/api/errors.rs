use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("enumeration failed: {0}")]
    Enumeration(String),
    #[error("filesystem error: {0}")]
    FilesystemError(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl From<crate::types::errors::Error> for ApiError {
    fn from(e: crate::types::errors::Error) -> Self {
        use crate::types::errors::ErrorKind::{InvalidMode, InvalidPath, Io};
        match e.kind {
            InvalidPath | InvalidMode => ApiError::InvalidInput(e.msg),
            Io => ApiError::FilesystemError(e.msg),
        }
    }
}

/// Map a fatal `ApiError` to its stable `ErrorId` for telemetry and for
/// the embedding layer's exit code.
#[must_use]
pub const fn error_id_for(e: &ApiError) -> ErrorId {
    match e {
        ApiError::Enumeration(_) => ErrorId::E_ENUMERATION,
        ApiError::InvalidInput(_) => ErrorId::E_INPUT,
        ApiError::FilesystemError(_) => ErrorId::E_GENERIC,
    }
}

/// Best-effort mapping from apply-stage error strings to a chain of stable
/// summary error IDs. Always ends with a generic classification.
#[must_use]
pub fn infer_summary_error_ids(errors: &[String]) -> Vec<&'static str> {
    let mut out: Vec<&'static str> = Vec::new();
    let joined = errors.join("; ").to_lowercase();
    if joined.contains("walk") || joined.contains("enumerat") {
        out.push(id_str(ErrorId::E_ENUMERATION));
    }
    if joined.contains("stat") {
        out.push(id_str(ErrorId::E_STAT));
    }
    if joined.contains("chmod") {
        out.push(id_str(ErrorId::E_APPLY));
    }
    if joined.contains("invalid") {
        out.push(id_str(ErrorId::E_INPUT));
    }
    // Ensure E_GENERIC is present last for routing when other specifics exist
    out.push(id_str(ErrorId::E_GENERIC));
    // Deduplicate while preserving order
    let mut seen = std::collections::HashSet::new();
    out.into_iter().filter(|id| seen.insert(*id)).collect()
}

// Stable identifiers, kept in SCREAMING_SNAKE_CASE to match emitted IDs.
#[allow(non_camel_case_types)]
#[derive(Clone, Copy, Debug)]
pub enum ErrorId {
    E_ENUMERATION,
    E_STAT,
    E_APPLY,
    E_INPUT,
    E_GENERIC,
}

#[must_use]
pub const fn id_str(id: ErrorId) -> &'static str {
    match id {
        ErrorId::E_ENUMERATION => "E_ENUMERATION",
        ErrorId::E_STAT => "E_STAT",
        ErrorId::E_APPLY => "E_APPLY",
        ErrorId::E_INPUT => "E_INPUT",
        ErrorId::E_GENERIC => "E_GENERIC",
    }
}

#[must_use]
pub const fn exit_code_for(id: ErrorId) -> i32 {
    match id {
        ErrorId::E_ENUMERATION => 10,
        ErrorId::E_STAT => 20,
        ErrorId::E_APPLY => 30,
        ErrorId::E_INPUT => 40,
        ErrorId::E_GENERIC => 1,
    }
}

#[must_use]
pub fn exit_code_for_id_str(s: &str) -> Option<i32> {
    match s {
        "E_ENUMERATION" => Some(10),
        "E_STAT" => Some(20),
        "E_APPLY" => Some(30),
        "E_INPUT" => Some(40),
        _ => None,
    }
}
