use thiserror::Error;

#[derive(Error, Debug)]
pub enum FishOpsError {
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid coordinate input: {0}")]
    InvalidCoordinateInput(String),

    #[error("Remote fetch failed: {0}")]
    RemoteFetchFailure(String),

    #[error("Report write failed: {0}")]
    ReportWriteFailure(String),
}

pub type Result<T> = std::result::Result<T, FishOpsError>;
