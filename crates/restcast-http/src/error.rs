//! Error types for the HTTP collaborators.

use thiserror::Error;

/// Errors raised while building URIs, encoding bodies or assembling responses.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum HttpError {
	/// JSON encoding failed.
	#[error("JSON error: {0}")]
	Json(#[from] serde_json::Error),

	/// Writing the encoded body failed.
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),

	/// A request URL could not be parsed.
	#[error("Invalid URL: {0}")]
	InvalidUrl(#[from] url::ParseError),

	/// A header value contained characters HTTP does not allow.
	#[error("Invalid header value: {0}")]
	InvalidHeader(String),

	/// A streamed element failed to produce its value.
	#[error("Stream error: {0}")]
	Stream(String),
}

/// Result type alias for HTTP collaborator operations.
pub type Result<T> = std::result::Result<T, HttpError>;
