use thiserror::Error;

/// Failure of a whole conversion run.
///
/// Every variant carries a human-readable message. The variant only decides which exit code the
/// command line tool reports.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// The input data could not be interpreted (bad date or time, missing column, short line, ...)
    #[error("Invalid input data: {0}")]
    Input(String),

    /// The input file could not be opened or read.
    #[error("Could not read input file: {0}")]
    NoInput(String),

    /// An output file or directory could not be created or written.
    #[error("Could not write output: {0}")]
    Output(String),
}

impl Error {
    /// The `exitcode` constant matching this kind of failure.
    pub fn exit_code(&self) -> exitcode::ExitCode {
        match self {
            Error::Input(_) => exitcode::DATAERR,
            Error::NoInput(_) => exitcode::NOINPUT,
            Error::Output(_) => exitcode::CANTCREAT,
        }
    }
}
