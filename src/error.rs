use std::path::PathBuf;

/// Failures that end an upload run.
///
/// None of them is recovered locally, except a gateway timeout answered to the
/// upload request, which is turned into polling before it ever becomes an error.
#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    /// The project or the script cannot be found from the given identifiers.
    #[error("{0}")]
    InputResolution(String),

    /// The API rejected the key (HTTP 400 or 403).
    #[error("{0}")]
    Auth(String),

    #[error("504, the Luarmor API gateway timed out")]
    GatewayTimeout,

    #[error("failed to read the script file at {}", .path.display())]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl UploadError {
    pub fn project_not_found() -> Self {
        Self::InputResolution("could not find project. invalid projectId or scriptId?".into())
    }

    pub fn script_not_found() -> Self {
        Self::InputResolution(
            "could not get current script version. this should not happen.".into(),
        )
    }
}
