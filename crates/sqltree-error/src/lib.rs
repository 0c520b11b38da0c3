use std::io;

use thiserror::Error;

/// Primary error type for sqltree operations.
///
/// The core is pure over already-built trees, so only a handful of things can
/// go wrong: a constructor was handed an empty required list, a rendering sink
/// failed, external keyword text did not match a known value, or an internal
/// consistency check tripped. The last one is a defect in the caller or in
/// this crate and is kept distinct from the user-facing cases.
#[derive(Error, Debug)]
pub enum AstError {
    // === Construction ===
    /// A list the grammar requires to be non-empty was empty.
    #[error("{kind} list must not be empty")]
    EmptyList { kind: &'static str },

    // === Rendering ===
    /// The output sink reported a write fault.
    #[error("render failed after {written} bytes: {source}")]
    Render {
        written: usize,
        #[source]
        source: io::Error,
    },

    // === External input ===
    /// A file-format keyword did not name a known format.
    #[error("unknown file format: '{keyword}'")]
    UnknownFileFormat { keyword: String },

    /// A configuration value was rejected by validation.
    #[error("invalid configuration: {detail}")]
    InvalidConfig { detail: String },

    // === Internal ===
    /// A closed-variant or ordering invariant did not hold.
    #[error("internal inconsistency: {detail}")]
    InternalInconsistency { detail: String },
}

impl AstError {
    /// Create an empty-list error for the named list kind.
    pub fn empty_list(kind: &'static str) -> Self {
        Self::EmptyList { kind }
    }

    /// Create a render error carrying the number of bytes committed before the fault.
    pub fn render(written: usize, source: io::Error) -> Self {
        Self::Render { written, source }
    }

    /// Create an internal-inconsistency error.
    pub fn internal(detail: impl Into<String>) -> Self {
        Self::InternalInconsistency {
            detail: detail.into(),
        }
    }

    /// Create an invalid-configuration error.
    pub fn invalid_config(detail: impl Into<String>) -> Self {
        Self::InvalidConfig {
            detail: detail.into(),
        }
    }

    /// Whether this error indicates a programming defect rather than bad input
    /// or a failing sink.
    pub const fn is_defect(&self) -> bool {
        matches!(self, Self::InternalInconsistency { .. })
    }

    /// Whether the caller can likely fix this without code changes.
    pub const fn is_user_recoverable(&self) -> bool {
        matches!(
            self,
            Self::Render { .. } | Self::UnknownFileFormat { .. } | Self::InvalidConfig { .. }
        )
    }

    /// Bytes committed to the sink before a render failure, if this is one.
    pub const fn written_bytes(&self) -> Option<usize> {
        match self {
            Self::Render { written, .. } => Some(*written),
            _ => None,
        }
    }
}

/// Result type alias using `AstError`.
pub type Result<T> = std::result::Result<T, AstError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn error_display_empty_list() {
        let err = AstError::empty_list("projection");
        assert_eq!(err.to_string(), "projection list must not be empty");
    }

    #[test]
    fn error_display_render() {
        let err = AstError::render(12, io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed"));
        assert_eq!(err.to_string(), "render failed after 12 bytes: pipe closed");
        assert_eq!(err.written_bytes(), Some(12));
        assert!(err.source().is_some());
    }

    #[test]
    fn error_display_unknown_format() {
        let err = AstError::UnknownFileFormat {
            keyword: "XLSX".to_owned(),
        };
        assert_eq!(err.to_string(), "unknown file format: 'XLSX'");
    }

    #[test]
    fn defects_are_not_user_recoverable() {
        let err = AstError::internal("comment attached to sentinel");
        assert!(err.is_defect());
        assert!(!err.is_user_recoverable());
        assert_eq!(err.written_bytes(), None);
        assert_eq!(
            err.to_string(),
            "internal inconsistency: comment attached to sentinel"
        );
    }

    #[test]
    fn user_recoverable() {
        assert!(AstError::invalid_config("gap").is_user_recoverable());
        assert!(AstError::render(0, io::ErrorKind::WriteZero.into()).is_user_recoverable());
        assert!(!AstError::empty_list("rows").is_user_recoverable());
        assert!(!AstError::empty_list("rows").is_defect());
    }
}
