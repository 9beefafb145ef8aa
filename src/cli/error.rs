use miette::Diagnostic;
use thiserror::Error;

use crate::db::DbError;

#[derive(Error, Diagnostic, Debug)]
pub enum CliError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Database(#[from] DbError),

    #[error("Could not determine a database location")]
    #[diagnostic(
        code(workdesk::cli::no_data_dir),
        help("Set HOME or XDG_DATA_HOME, or pass --db /path/to/workdesk.db (or WORKDESK_DB).")
    )]
    NoDataDir,

    #[error("Invalid input: {message}")]
    #[diagnostic(code(workdesk::cli::invalid_input))]
    InvalidInput { message: String },

    #[error("Failed to render output: {message}")]
    #[diagnostic(code(workdesk::cli::output))]
    Output { message: String },
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Output {
            message: e.to_string(),
        }
    }
}

pub type CliResult<T> = Result<T, CliError>;
