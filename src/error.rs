use std::io;
use std::num::ParseIntError;
use std::path::PathBuf;
use std::str::Utf8Error;
use thiserror::Error;

/// Errors raised while loading measurement files or checking that a set of
/// comparison sources can be drawn together.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("failed to read {}", path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{}:{line}: invalid integer {token:?}", path.display())]
    InvalidToken {
        path: PathBuf,
        /// 1-based line number in the file, blank lines included
        line: usize,
        token: String,
        #[source]
        source: ParseIntError,
    },

    #[error("{}:{line}: line is not valid UTF-8", path.display())]
    InvalidUtf8 {
        path: PathBuf,
        line: usize,
        #[source]
        source: Utf8Error,
    },

    #[error(
        "{}:{line}: expected {expected} values per line, found {found}",
        path.display()
    )]
    RaggedRow {
        path: PathBuf,
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("dimension mismatch: '{side}' has {found} operations, expected {expected}")]
    DimensionMismatch {
        side: String,
        expected: usize,
        found: usize,
    },

    #[error("{labels} operation labels given for {operations} operations")]
    LabelCount { labels: usize, operations: usize },

    #[error("nothing to draw: no operation columns")]
    NoOperations,
}
