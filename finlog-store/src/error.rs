use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    /// The file or its directory could not be created, read or written
    #[error("{action} {}: {source}", path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("csv error in {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// A complete row whose date, type or amount cannot be read back
    #[error("{}:{line}: bad {field} '{value}': {reason}", path.display())]
    Parse {
        path: PathBuf,
        line: u64,
        field: &'static str,
        value: String,
        reason: String,
    },
}
