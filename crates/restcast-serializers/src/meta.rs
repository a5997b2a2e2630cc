//! Class-level serializer defaults

use crate::descriptor::FieldSpec;
use crate::options::{Filter, Fixup};

/// Defaults for a family of serializers
///
/// Options passed to [`Serializer::new`](crate::Serializer::new) take
/// precedence; an option left unset or empty falls back to the value returned
/// here.
///
/// # Examples
///
/// ```
/// use restcast_serializers::{FieldSpec, SerializerMeta, flatten, Fixup};
///
/// struct PersonSerializerMeta;
///
/// impl SerializerMeta for PersonSerializerMeta {
///     fn fields() -> Option<FieldSpec> {
///         Some(FieldSpec::new().field("id").field("name"))
///     }
///
///     fn exclude() -> Option<Vec<String>> {
///         Some(vec!["password".to_string()])
///     }
///
///     fn fixup() -> Option<Fixup> {
///         Some(flatten("profile"))
///     }
/// }
///
/// assert_eq!(PersonSerializerMeta::fields().unwrap().len(), 2);
/// ```
pub trait SerializerMeta {
	/// Field list replacing the model's local fields
	fn fields() -> Option<FieldSpec> {
		None
	}

	/// Descriptors appended to the field list
	fn include() -> Option<FieldSpec> {
		None
	}

	/// Named fields removed from the field list
	fn exclude() -> Option<Vec<String>> {
		None
	}

	/// Hook applied to every serialized record
	fn fixup() -> Option<Fixup> {
		None
	}

	/// Predicate applied to collection members
	fn filter() -> Option<Filter> {
		None
	}
}

/// Serializer defaults that change nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultMeta;

impl SerializerMeta for DefaultMeta {}
