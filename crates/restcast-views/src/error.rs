//! Endpoint errors

use restcast_http::HttpError;
use restcast_serializers::SerializerError;
use thiserror::Error;

/// Errors raised while building an endpoint response
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum EndpointError {
	/// The endpoint cannot tell what to serialize.
	#[error("Improperly configured: {0}")]
	ImproperlyConfigured(String),

	/// The query string asks for something malformed.
	#[error("Invalid query: {0}")]
	InvalidQuery(String),

	#[error(transparent)]
	Serializer(#[from] SerializerError),

	#[error(transparent)]
	Http(#[from] HttpError),
}

pub type Result<T> = std::result::Result<T, EndpointError>;
