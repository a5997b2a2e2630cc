//! Ready-made fixup hooks

use crate::error::SerializerError;
use crate::options::Fixup;
use serde_json::Value;

/// Fixup that pulls a nested mapping up into its parent
///
/// Every key of the sub-mapping stored under `key` is copied into the parent,
/// overwriting keys that already exist there, and `key` itself is removed.
/// Fails when `key` is absent or does not hold a mapping.
///
/// # Examples
///
/// ```
/// # use restcast_orm::{Attribute, AttributeError, FieldValue, ModelMeta, Record};
/// # use std::sync::LazyLock;
/// # static ANY: LazyLock<ModelMeta> = LazyLock::new(|| ModelMeta::new("app", "Any"));
/// # struct Any;
/// # impl Record for Any {
/// #     fn meta(&self) -> &ModelMeta { &ANY }
/// #     fn pk(&self) -> FieldValue { FieldValue::Int(1) }
/// #     fn attribute(&self, name: &str) -> Result<Attribute<'_>, AttributeError> {
/// #         Err(AttributeError::missing(self.meta(), name))
/// #     }
/// # }
/// use restcast_serializers::flatten;
/// use serde_json::json;
///
/// let data = json!({"meta": {"x": 1, "y": 2}, "z": 3});
/// let Some(data) = data.as_object().cloned() else { unreachable!() };
///
/// let flat = flatten("meta").apply(&Any, data).unwrap();
/// assert_eq!(serde_json::Value::Object(flat), json!({"z": 3, "x": 1, "y": 2}));
/// ```
pub fn flatten(key: impl Into<String>) -> Fixup {
	let key = key.into();
	Fixup::new(move |_, mut data| {
		let nested = data.shift_remove(&key).ok_or_else(|| SerializerError::Fixup {
			key: key.clone(),
			message: "key is not present".to_string(),
		})?;
		let Value::Object(nested) = nested else {
			return Err(SerializerError::Fixup {
				key: key.clone(),
				message: format!("expected a mapping, found {}", nested),
			});
		};
		data.extend(nested);
		Ok(data)
	})
}
