use serde::Serialize;
use snafu::Snafu;
use std::fmt;
use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    #[snafu(display("Local file not found: {}", path.display()))]
    LocalNotFound { path: PathBuf },

    #[snafu(display("Not a regular file: {}", path.display()))]
    NotAFile { path: PathBuf },

    #[snafu(display("Remote path not found: {path}"))]
    RemoteNotFound { path: String },

    #[snafu(display("{backend} support not installed: rebuild with the `{feature}` feature"))]
    BackendUnavailable {
        backend: &'static str,
        feature: &'static str,
    },

    #[snafu(display("Invalid configuration: {message}"))]
    InvalidConfig { message: String },

    #[snafu(display("Failed to upload '{local_path}' to '{remote_path}': {source}"))]
    UploadFailed {
        local_path: String,
        remote_path: String,
        source: Box<Error>,
    },

    #[snafu(display("Failed to download '{remote_path}' to '{local_path}': {source}"))]
    DownloadFailed {
        remote_path: String,
        local_path: String,
        source: Box<Error>,
    },

    #[snafu(display("Failed to list directory '{path}': {source}"))]
    ListDirectoryFailed { path: String, source: Box<Error> },

    #[snafu(display("Failed to delete '{path}': {source}"))]
    DeleteFailed { path: String, source: Box<Error> },

    #[snafu(display("Failed to create directory '{path}': {source}"))]
    DirectoryCreationFailed { path: String, source: Box<Error> },

    #[snafu(display("OpenDAL error: {source}"))]
    OpenDal { source: opendal::Error },

    #[snafu(display("IO error: {source}"))]
    Io { source: std::io::Error },
}

impl From<opendal::Error> for Error {
    fn from(error: opendal::Error) -> Self {
        Error::OpenDal { source: error }
    }
}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Error::Io { source: error }
    }
}

/// Coarse classification of a failure, stable enough for scripts to branch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Transport or authentication failure reaching the backend.
    Connection,
    /// The local source of an upload is missing.
    NotFound,
    /// The remote object or path is missing.
    RemoteNotFound,
    /// The backend was not compiled into this binary.
    BackendUnavailable,
    /// The request doesn't fit the remote state, e.g. reading a directory
    /// or writing over one.
    InvalidRequest,
    Config,
    Io,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FailureKind::Connection => "connection",
            FailureKind::NotFound => "not_found",
            FailureKind::RemoteNotFound => "remote_not_found",
            FailureKind::BackendUnavailable => "backend_unavailable",
            FailureKind::InvalidRequest => "invalid_request",
            FailureKind::Config => "config",
            FailureKind::Io => "io",
        };
        f.write_str(s)
    }
}

impl Error {
    /// Classify this error, looking through context wrappers to the root cause.
    pub fn kind(&self) -> FailureKind {
        match self {
            Error::LocalNotFound { .. } | Error::NotAFile { .. } => FailureKind::NotFound,
            Error::RemoteNotFound { .. } => FailureKind::RemoteNotFound,
            Error::BackendUnavailable { .. } => FailureKind::BackendUnavailable,
            Error::InvalidConfig { .. } => FailureKind::Config,
            Error::UploadFailed { source, .. }
            | Error::DownloadFailed { source, .. }
            | Error::ListDirectoryFailed { source, .. }
            | Error::DeleteFailed { source, .. }
            | Error::DirectoryCreationFailed { source, .. } => source.kind(),
            Error::OpenDal { source } => match source.kind() {
                opendal::ErrorKind::NotFound => FailureKind::RemoteNotFound,
                opendal::ErrorKind::ConfigInvalid => FailureKind::Config,
                opendal::ErrorKind::IsADirectory
                | opendal::ErrorKind::NotADirectory
                | opendal::ErrorKind::IsSameFile
                | opendal::ErrorKind::AlreadyExists
                | opendal::ErrorKind::ConditionNotMatch
                | opendal::ErrorKind::RangeNotSatisfied
                | opendal::ErrorKind::Unsupported => FailureKind::InvalidRequest,
                _ => FailureKind::Connection,
            },
            Error::Io { .. } => FailureKind::Io,
        }
    }
}
