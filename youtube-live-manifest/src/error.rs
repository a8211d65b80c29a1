//! Fatal errors that end a run, and the process exit codes they map to.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort the whole run.
///
/// Per-channel failures (a search that errors, a handle that matches nothing) are not
/// represented here; they are logged and the channel is skipped.
#[derive(Error, Debug)]
pub enum RunError {
    #[error("YOUTUBE_API_KEY environment variable is not set")]
    MissingCredential,

    #[error("channel list not found: {}", .0.display())]
    MissingInputFile(PathBuf),

    #[error("failed to read channel list {}", path.display())]
    ReadInput {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write manifest {}", path.display())]
    WriteOutput {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to render manifest")]
    Render(#[source] std::io::Error),

    #[error("failed to set up YouTube API client: {0:#}")]
    HttpClient(eyre::Report),
}

impl RunError {
    /// Process exit code for this error.
    ///
    /// A missing credential and a missing input file have their own codes so that a
    /// scheduler can tell configuration problems apart from everything else.
    pub fn exit_code(&self) -> u8 {
        match self {
            RunError::MissingCredential => 2,
            RunError::MissingInputFile(_) => 3,
            RunError::ReadInput { .. }
            | RunError::WriteOutput { .. }
            | RunError::Render(_)
            | RunError::HttpClient(_) => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_are_distinct_for_preconditions() {
        assert_eq!(RunError::MissingCredential.exit_code(), 2);
        assert_eq!(
            RunError::MissingInputFile(PathBuf::from("channels.txt")).exit_code(),
            3
        );
        assert_eq!(
            RunError::Render(std::io::Error::other("boom")).exit_code(),
            1
        );
    }

    #[test]
    fn missing_input_names_the_path() {
        let err = RunError::MissingInputFile(PathBuf::from("lists/channels.txt"));
        assert_eq!(err.to_string(), "channel list not found: lists/channels.txt");
    }
}
