use thiserror::Error;

/// Convenience result type for reader and interpolation operations.
pub type InterpolationResult<T> = Result<T, InterpolationError>;

/// Error type returned by the row readers and the interpolator.
///
/// A single enum is shared by every layer so errors from the field splitter or the
/// underlying stream reach the caller unchanged.
#[derive(Debug, Error)]
pub enum InterpolationError {
    /// Underlying I/O error (e.g. file not found, seek failure).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed row (unequal field count, invalid UTF-8) or an I/O error seen by the CSV parser.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// A JSON configuration document could not be decoded.
    #[error("config error: {0}")]
    Config(#[from] serde_json::Error),

    /// A component was constructed with settings it cannot work with.
    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    /// The requested row (or window) does not exist.
    ///
    /// For [`crate::interpolation::StreamingInterpolator`] this is the normal end of the stream.
    #[error("end of input")]
    EndOfInput,
}

impl InterpolationError {
    /// Returns `true` for [`InterpolationError::EndOfInput`].
    pub fn is_end_of_input(&self) -> bool {
        matches!(self, Self::EndOfInput)
    }

    pub(crate) fn invalid_configuration(message: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            message: message.into(),
        }
    }
}
