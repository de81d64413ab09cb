use std::path::PathBuf;

use thiserror::Error;

/// Failure modes of loading and summarizing a trip table.
///
/// Invalid interactive selections never reach this type; the prompt loop
/// rejects them locally and re-prompts.
#[derive(Debug, Error)]
pub enum Error {
    /// Backing CSV file missing or unreadable. Fatal.
    #[error("cannot read dataset {path}: {source}")]
    DataSource {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// A row failed to parse. `line` is 1-based within the CSV file, header
    /// included. Loading is strict: one bad row aborts the whole load.
    #[error("malformed row at line {line}: {message}")]
    Parse { line: u64, message: String },
    /// The selected filters matched zero rows, so there is nothing to
    /// summarize. Reported to the user, not a crash.
    #[error("no trips match the selected filters")]
    EmptyTable,
}

pub type Result<T> = std::result::Result<T, Error>;
