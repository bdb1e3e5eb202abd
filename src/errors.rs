/*!
 * Error types for the bisrt application.
 *
 * The segmentation core returns typed errors so callers can tell a broken
 * precondition apart from a failing translation backend. Application code
 * wraps everything into `AppError` or `anyhow::Error`.
 */

use thiserror::Error;

/// Precondition violations inside the segmentation core
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SegmentationError {
    /// The time allocator was asked to split an interval into zero pieces
    #[error("Cannot allocate time windows for zero chunks")]
    ZeroChunkCount,

    /// A character budget of zero can never be satisfied
    #[error("Maximum characters per chunk must be positive")]
    ZeroMaxChars,
}

/// Errors that can occur when working with provider APIs
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),
}

/// Errors raised by a translation backend
#[derive(Error, Debug)]
pub enum TranslationError {
    /// Error from the provider API
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// The backend answered but produced no usable text
    #[error("Translation of '{0}' came back empty")]
    EmptyTranslation(String),

    /// The backend could not be driven (runtime gone, task cancelled)
    #[error("Translation runtime error: {0}")]
    Runtime(String),
}

/// Failure of a full assembler pass.
///
/// `Translate` carries the callback's error exactly as it was returned.
#[derive(Error, Debug)]
pub enum AssembleError<E> {
    /// Bad input to the segmentation core
    #[error("Segmentation error: {0}")]
    Segmentation(#[from] SegmentationError),

    /// The translate callback failed; remaining chunks were not processed
    #[error("Translate callback failed: {0}")]
    Translate(E),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Invalid or inconsistent configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error from segmentation
    #[error("Segmentation error: {0}")]
    Segmentation(#[from] SegmentationError),

    /// Error from translation
    #[error("Translation error: {0}")]
    Translation(#[from] TranslationError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<AssembleError<TranslationError>> for AppError {
    fn from(error: AssembleError<TranslationError>) -> Self {
        match error {
            AssembleError::Segmentation(e) => Self::Segmentation(e),
            AssembleError::Translate(e) => Self::Translation(e),
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
