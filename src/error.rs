//! Error taxonomy shared by the scoring engine, source clients and tool service

use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum AlphaError {
    /// A raw record had no usable name; only that record is skipped
    MissingIdentity { source: String },
    /// A named lookup target is absent from the current candidate set
    NotFound {
        query: String,
        suggestions: Vec<String>,
    },
    /// One upstream source failed or stayed rate limited
    SourceUnavailable { source: String, reason: String },
    /// Every contributing source failed at once
    ScanFailed { failures: Vec<AlphaError> },
    /// A tool argument was missing or malformed
    InvalidParameter(String),
}

impl AlphaError {
    pub fn source_unavailable(source: &str, reason: impl Into<String>) -> Self {
        AlphaError::SourceUnavailable {
            source: source.to_string(),
            reason: reason.into(),
        }
    }

    pub fn not_found(query: &str, suggestions: &[&str]) -> Self {
        AlphaError::NotFound {
            query: query.to_string(),
            suggestions: suggestions.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// True for the "nothing could be fetched" outcome of a multi-source scan
    pub fn is_scan_failure(&self) -> bool {
        matches!(self, AlphaError::ScanFailed { .. })
    }
}

impl fmt::Display for AlphaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlphaError::MissingIdentity { source } => {
                write!(f, "{} record is missing a name", source)
            }
            AlphaError::NotFound { query, suggestions } => {
                write!(f, "'{}' not found in current data", query)?;
                if !suggestions.is_empty() {
                    write!(f, " ({})", suggestions.join("; "))?;
                }
                Ok(())
            }
            AlphaError::SourceUnavailable { source, reason } => {
                write!(f, "{} unavailable: {}", source, reason)
            }
            AlphaError::ScanFailed { failures } => {
                let reasons: Vec<String> = failures.iter().map(|e| e.to_string()).collect();
                write!(f, "scan failed, no source responded: {}", reasons.join("; "))
            }
            AlphaError::InvalidParameter(msg) => write!(f, "invalid parameter: {}", msg),
        }
    }
}

impl std::error::Error for AlphaError {}

impl From<serde_json::Error> for AlphaError {
    fn from(err: serde_json::Error) -> Self {
        AlphaError::InvalidParameter(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_lists_suggestions() {
        let err = AlphaError::not_found("foo", &["Check project name spelling"]);
        assert_eq!(
            err.to_string(),
            "'foo' not found in current data (Check project name spelling)"
        );
    }

    #[test]
    fn test_scan_failed_joins_reasons() {
        let err = AlphaError::ScanFailed {
            failures: vec![
                AlphaError::source_unavailable("moni", "HTTP 500"),
                AlphaError::source_unavailable("coingecko", "request timed out"),
            ],
        };
        assert!(err.is_scan_failure());
        let text = err.to_string();
        assert!(text.contains("moni unavailable: HTTP 500"));
        assert!(text.contains("coingecko unavailable: request timed out"));
    }
}
