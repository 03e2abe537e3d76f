//! Common error.

use aws_sdk_dynamodb::error::{DisplayErrorContext, SdkError};

/// Common error.
///
/// The request handler does not distinguish these kinds when it answers;
/// every one of them ends up as the same 500 response.
#[derive(Debug)]
pub enum Error {
    InvalidContext(String),
    InvalidConfig(String),
    SerdeJsonError(serde_json::Error),
    AwsSdkError(String),
    StoreError(String),
}

impl std::error::Error for Error {}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::InvalidContext(s) => write!(f, "Invalid context: {}", s),
            Error::InvalidConfig(s) => write!(f, "Invalid config: {}", s),
            Error::SerdeJsonError(e) => write!(f, "serde_json::Error: {}", e),
            Error::AwsSdkError(s) => write!(f, "AWS SDK error: {}", s),
            Error::StoreError(s) => write!(f, "Store error: {}", s),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::SerdeJsonError(e)
    }
}

impl<E, R> From<SdkError<E, R>> for Error
where
    E: std::error::Error + 'static,
    R: std::fmt::Debug + 'static,
{
    fn from(e: SdkError<E, R>) -> Self {
        Error::AwsSdkError(format!("{}", DisplayErrorContext(e)))
    }
}
