//! Error types for pacrelay-core.

use miette::Diagnostic;
use pacrelay_config::error::ConfigError;
use pacrelay_dl::error::DownloadError;
use thiserror::Error;

/// Errors that abort a repository generation.
///
/// Per-asset problems (unmatched names, malformed versions) never surface
/// here; the classifier skips those assets.
#[derive(Error, Diagnostic, Debug)]
pub enum RepoError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to fetch upstream releases: {0}")]
    #[diagnostic(
        code(pacrelay::upstream),
        help("Check the configured project and your GitHub token")
    )]
    UpstreamFetch(#[source] DownloadError),

    #[error("Archive member name is {len} bytes, the limit is {max}: {name}")]
    #[diagnostic(
        code(pacrelay::name_too_long),
        help("Shorten the package name or version")
    )]
    NameTooLong { name: String, len: usize, max: usize },

    #[error("Value {value} does not fit the {field} header field")]
    #[diagnostic(code(pacrelay::field_overflow))]
    FieldOverflow { field: &'static str, value: u64 },

    #[error("Invalid package pattern: {0}")]
    #[diagnostic(
        code(pacrelay::pattern),
        help("Package and variant names are matched literally; check for unusual characters")
    )]
    Pattern(#[from] regex::Error),

    #[error("Error while {action}")]
    #[diagnostic(code(pacrelay::io))]
    IoError {
        action: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    #[diagnostic(code(pacrelay::time))]
    SystemTimeError(#[from] std::time::SystemTimeError),

    #[error("{0}")]
    #[diagnostic(code(pacrelay::error))]
    Custom(String),
}

impl From<DownloadError> for RepoError {
    fn from(err: DownloadError) -> Self {
        Self::UpstreamFetch(err)
    }
}

pub trait ErrorContext<T> {
    fn with_context<C>(self, context: C) -> Result<T, RepoError>
    where
        C: FnOnce() -> String;
}

impl<T> ErrorContext<T> for std::io::Result<T> {
    fn with_context<C>(self, context: C) -> Result<T, RepoError>
    where
        C: FnOnce() -> String,
    {
        self.map_err(|err| {
            RepoError::IoError {
                action: context(),
                source: err,
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = RepoError::NameTooLong {
            name: "x".repeat(101),
            len: 101,
            max: 100,
        };
        assert!(err.to_string().starts_with("Archive member name is 101 bytes"));

        let err = RepoError::FieldOverflow {
            field: "size",
            value: u64::MAX,
        };
        assert!(err.to_string().contains("size header field"));
    }

    #[test]
    fn test_download_error_becomes_upstream_fetch() {
        let err: RepoError = DownloadError::InvalidResponse.into();
        assert!(matches!(err, RepoError::UpstreamFetch(_)));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_io_context() {
        let res: std::io::Result<()> = Err(std::io::Error::other("boom"));
        let err = res.with_context(|| "compressing database".to_string()).unwrap_err();
        assert_eq!(err.to_string(), "Error while compressing database");
    }
}
