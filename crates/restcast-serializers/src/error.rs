//! Error types for the serializer engine.

use restcast_orm::AttributeError;
use thiserror::Error;

/// Errors raised while configuring or running a serialization.
///
/// A related object that does not exist is not an error: the engine renders
/// it as `null`. Everything else propagates to the caller unchanged.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum SerializerError {
	/// The field specification or options are malformed.
	#[error("Improperly configured: {0}")]
	Configuration(String),

	/// A record has no attribute of the requested name.
	#[error(transparent)]
	Attribute(#[from] AttributeError),

	/// A computed field, fixup hook or filter predicate failed.
	#[error("{message}")]
	Hook { message: String },

	/// A flatten fixup was applied to a key that is absent or not a mapping.
	#[error("Cannot flatten '{key}': {message}")]
	Fixup { key: String, message: String },

	/// A serializer was asked for output after its source had been consumed
	/// by an earlier, failed computation.
	#[error("serializer source was already consumed")]
	SourceConsumed,

	/// JSON conversion failed.
	#[error("JSON error: {0}")]
	Json(#[from] serde_json::Error),
}

impl SerializerError {
	/// Error raised from inside a user-supplied callable
	///
	/// # Examples
	///
	/// ```
	/// use restcast_serializers::SerializerError;
	///
	/// let err = SerializerError::hook("age requires a birth date");
	/// assert_eq!(err.to_string(), "age requires a birth date");
	/// ```
	pub fn hook(message: impl Into<String>) -> Self {
		SerializerError::Hook {
			message: message.into(),
		}
	}

	pub fn configuration(message: impl Into<String>) -> Self {
		SerializerError::Configuration(message.into())
	}
}

/// Result type alias for serializer operations.
pub type Result<T> = std::result::Result<T, SerializerError>;
