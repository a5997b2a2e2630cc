//! Field descriptors and field specifications
//!
//! A [`FieldSpec`] is the ordered list of descriptors that decides which keys
//! appear in a serialized record and how each value is produced.

use crate::error::{Result, SerializerError};
use crate::options::SerializeOptions;
use restcast_orm::Record;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Callable producing the value of a computed field
#[derive(Clone)]
pub struct ComputedFn(Arc<dyn Fn(&dyn Record) -> Result<Value> + Send + Sync>);

impl ComputedFn {
	pub fn new<F>(f: F) -> Self
	where
		F: Fn(&dyn Record) -> Result<Value> + Send + Sync + 'static,
	{
		Self(Arc::new(f))
	}

	pub fn call(&self, record: &dyn Record) -> Result<Value> {
		(self.0)(record)
	}
}

impl fmt::Debug for ComputedFn {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("ComputedFn(..)")
	}
}

/// One entry of a field specification
#[derive(Debug, Clone)]
pub enum FieldDescriptor {
	/// Read the attribute of that name
	Named(String),
	/// Store the callable's result under the key
	Computed(String, ComputedFn),
	/// Serialize the attribute of that name recursively with its own options
	Nested(String, Box<SerializeOptions>),
}

impl FieldDescriptor {
	/// Output key the descriptor writes to
	pub fn key(&self) -> &str {
		match self {
			FieldDescriptor::Named(name) => name,
			FieldDescriptor::Computed(key, _) | FieldDescriptor::Nested(key, _) => key,
		}
	}

	/// Name of a plain named descriptor
	pub fn name(&self) -> Option<&str> {
		match self {
			FieldDescriptor::Named(name) => Some(name),
			_ => None,
		}
	}

	fn validate(&self) -> Result<()> {
		if self.key().is_empty() {
			return Err(SerializerError::configuration(
				"field descriptors need a non-empty key",
			));
		}
		if let FieldDescriptor::Nested(key, options) = self {
			options.validate().map_err(|e| match e {
				SerializerError::Configuration(message) => {
					SerializerError::Configuration(format!("in nested field '{}': {}", key, message))
				}
				other => other,
			})?;
		}
		Ok(())
	}
}

impl From<&str> for FieldDescriptor {
	fn from(name: &str) -> Self {
		FieldDescriptor::Named(name.to_string())
	}
}

impl From<String> for FieldDescriptor {
	fn from(name: String) -> Self {
		FieldDescriptor::Named(name)
	}
}

/// Ordered list of field descriptors
///
/// Output keys follow the order of the descriptors. A key produced twice is
/// written twice: the later value wins but the key stays where it was first
/// inserted.
///
/// # Examples
///
/// ```
/// use restcast_serializers::{FieldSpec, SerializeOptions};
/// use serde_json::json;
///
/// let spec = FieldSpec::new()
///     .field("name")
///     .computed("greeting", |record| Ok(json!(format!("hello {}", record.display()))))
///     .nested("jobs", SerializeOptions::new().with_fields(["title"]));
///
/// let keys: Vec<_> = spec.iter().map(|d| d.key()).collect();
/// assert_eq!(keys, vec!["name", "greeting", "jobs"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct FieldSpec(Vec<FieldDescriptor>);

impl FieldSpec {
	pub fn new() -> Self {
		Self::default()
	}

	/// Append a named field
	pub fn field(mut self, name: impl Into<String>) -> Self {
		self.0.push(FieldDescriptor::Named(name.into()));
		self
	}

	/// Append a computed field
	pub fn computed<F>(mut self, key: impl Into<String>, f: F) -> Self
	where
		F: Fn(&dyn Record) -> Result<Value> + Send + Sync + 'static,
	{
		self.0
			.push(FieldDescriptor::Computed(key.into(), ComputedFn::new(f)));
		self
	}

	/// Append a nested field
	pub fn nested(mut self, key: impl Into<String>, options: SerializeOptions) -> Self {
		self.0
			.push(FieldDescriptor::Nested(key.into(), Box::new(options)));
		self
	}

	pub fn push(&mut self, descriptor: FieldDescriptor) {
		self.0.push(descriptor);
	}

	pub fn iter(&self) -> std::slice::Iter<'_, FieldDescriptor> {
		self.0.iter()
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Check every descriptor, recursing into nested options
	pub fn validate(&self) -> Result<()> {
		self.0.iter().try_for_each(FieldDescriptor::validate)
	}

	/// Parse a field specification from its JSON description
	///
	/// Accepts an array whose entries are field names or single-key objects
	/// mapping a nested key to its options, or a comma-separated string of
	/// names.
	///
	/// # Examples
	///
	/// ```
	/// use restcast_serializers::{FieldDescriptor, FieldSpec};
	/// use serde_json::json;
	///
	/// let spec = FieldSpec::from_value(&json!(["name", {"jobs": {"fields": ["title"]}}])).unwrap();
	/// assert_eq!(spec.len(), 2);
	/// assert!(matches!(spec.iter().nth(1), Some(FieldDescriptor::Nested(key, _)) if key == "jobs"));
	///
	/// assert!(FieldSpec::from_value(&json!([1])).is_err());
	/// ```
	pub fn from_value(value: &Value) -> Result<Self> {
		match value {
			Value::String(list) => Ok(parse_field_list(list).into_iter().collect()),
			Value::Array(items) => items.iter().map(descriptor_from_value).collect(),
			other => Err(SerializerError::Configuration(format!(
				"a field specification must be an array or a string, not {}",
				other
			))),
		}
	}
}

fn descriptor_from_value(value: &Value) -> Result<FieldDescriptor> {
	match value {
		Value::String(name) => Ok(FieldDescriptor::Named(name.clone())),
		Value::Object(entry) if entry.len() == 1 => {
			let (key, options) = entry.iter().next().ok_or_else(|| {
				SerializerError::configuration("nested field descriptions need one key")
			})?;
			Ok(FieldDescriptor::Nested(
				key.clone(),
				Box::new(SerializeOptions::from_value(options)?),
			))
		}
		other => Err(SerializerError::Configuration(format!(
			"invalid field description: {}",
			other
		))),
	}
}

impl<D: Into<FieldDescriptor>> FromIterator<D> for FieldSpec {
	fn from_iter<T: IntoIterator<Item = D>>(iter: T) -> Self {
		Self(iter.into_iter().map(Into::into).collect())
	}
}

impl<D: Into<FieldDescriptor>> From<Vec<D>> for FieldSpec {
	fn from(descriptors: Vec<D>) -> Self {
		descriptors.into_iter().collect()
	}
}

impl<D: Into<FieldDescriptor>, const N: usize> From<[D; N]> for FieldSpec {
	fn from(descriptors: [D; N]) -> Self {
		descriptors.into_iter().collect()
	}
}

impl<'a> IntoIterator for &'a FieldSpec {
	type Item = &'a FieldDescriptor;
	type IntoIter = std::slice::Iter<'a, FieldDescriptor>;

	fn into_iter(self) -> Self::IntoIter {
		self.0.iter()
	}
}

/// Split a comma-separated list of field names, as sent in query strings
///
/// # Examples
///
/// ```
/// use restcast_serializers::parse_field_list;
///
/// assert_eq!(parse_field_list(" id, name,,email "), vec!["id", "name", "email"]);
/// assert!(parse_field_list("").is_empty());
/// ```
pub fn parse_field_list(list: &str) -> Vec<String> {
	list.split(',')
		.map(str::trim)
		.filter(|name| !name.is_empty())
		.map(str::to_string)
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serde_json::json;

	#[rstest]
	fn test_from_value_accepts_comma_string() {
		let spec = FieldSpec::from_value(&json!("b, a ,c")).unwrap();
		let names: Vec<_> = spec.iter().filter_map(FieldDescriptor::name).collect();
		assert_eq!(names, vec!["b", "a", "c"]);
	}

	#[rstest]
	#[case(json!({"fields": ["a"]}))]
	#[case(json!(3))]
	#[case(json!([{"a": {}, "b": {}}]))]
	#[case(json!([{"jobs": {"bogus": true}}]))]
	fn test_from_value_rejects_invalid_descriptions(#[case] value: Value) {
		let err = FieldSpec::from_value(&value).unwrap_err();
		assert!(matches!(err, SerializerError::Configuration(_)));
	}

	#[rstest]
	fn test_validate_reports_nested_empty_key() {
		let spec = FieldSpec::new().nested(
			"jobs",
			SerializeOptions::new().with_fields(FieldSpec::new().field("")),
		);
		let err = spec.validate().unwrap_err();
		assert!(err.to_string().contains("in nested field 'jobs'"));
	}

	#[rstest]
	fn test_descriptor_keys() {
		let spec: FieldSpec = vec!["a", "b"].into();
		let spec = spec.computed("c", |_| Ok(Value::Null));
		assert_eq!(spec.iter().map(FieldDescriptor::key).collect::<Vec<_>>(), ["a", "b", "c"]);
		assert_eq!(spec.iter().nth(2).and_then(FieldDescriptor::name), None);
	}
}
