use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("audio streams are not supported on this platform")]
    Unsupported,
    #[error("{operation} failed: {message} ({code})")]
    AAudio {
        operation: &'static str,
        code: i32,
        message: String,
    },
    #[error("stream opened with unsupported sample format {0}")]
    UnexpectedFormat(i32),
}
