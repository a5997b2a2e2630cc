//! Per-call serialization options

use crate::descriptor::{FieldSpec, parse_field_list};
use crate::error::{Result, SerializerError};
use crate::source::Source;
use restcast_http::RequestContext;
use restcast_orm::Record;
use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;

type FixupFn = dyn Fn(&dyn Record, Map<String, Value>) -> Result<Map<String, Value>> + Send + Sync;
type FilterFn = dyn Fn(&Source<'_>) -> Result<bool> + Send + Sync;

/// Post-processing hook run on each serialized record
///
/// Receives the record and its output mapping and returns the mapping to use
/// instead. The hook may read the record but should only change the mapping.
#[derive(Clone)]
pub struct Fixup(Arc<FixupFn>);

impl Fixup {
	pub fn new<F>(f: F) -> Self
	where
		F: Fn(&dyn Record, Map<String, Value>) -> Result<Map<String, Value>> + Send + Sync + 'static,
	{
		Self(Arc::new(f))
	}

	pub fn apply(&self, record: &dyn Record, data: Map<String, Value>) -> Result<Map<String, Value>> {
		(self.0)(record, data)
	}
}

impl fmt::Debug for Fixup {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("Fixup(..)")
	}
}

/// Predicate deciding which collection members get serialized
#[derive(Clone)]
pub struct Filter(Arc<FilterFn>);

impl Filter {
	pub fn new<F>(f: F) -> Self
	where
		F: Fn(&Source<'_>) -> Result<bool> + Send + Sync + 'static,
	{
		Self(Arc::new(f))
	}

	/// Predicate over records; members that are not records are kept
	///
	/// # Examples
	///
	/// ```
	/// use restcast_orm::FieldValue;
	/// use restcast_serializers::{Filter, Source};
	/// use serde_json::json;
	///
	/// let odd_pk = Filter::records(|record| Ok(matches!(record.pk(), FieldValue::Int(n) if n % 2 == 1)));
	/// assert!(odd_pk.keep(&Source::from(json!("not a record"))).unwrap());
	/// ```
	pub fn records<F>(f: F) -> Self
	where
		F: Fn(&dyn Record) -> Result<bool> + Send + Sync + 'static,
	{
		Self::new(move |source| match source {
			Source::Record(record) => f(*record),
			_ => Ok(true),
		})
	}

	/// Whether `source` should be serialized
	pub fn keep(&self, source: &Source<'_>) -> Result<bool> {
		(self.0)(source)
	}
}

impl fmt::Debug for Filter {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("Filter(..)")
	}
}

/// Options for one serialization
///
/// | option    | effect                                                         |
/// |-----------|----------------------------------------------------------------|
/// | `fields`  | replaces the default field list (all local model fields)       |
/// | `include` | descriptors appended to the field list                         |
/// | `exclude` | named fields removed from the field list                       |
/// | `fixup`   | hook applied to each serialized record                         |
/// | `request` | request context used to make file URLs absolute                |
/// | `media_url` | base URL for file fields holding a bare stored name          |
/// | `filter`  | predicate applied to collection members before serializing    |
///
/// # Examples
///
/// ```
/// use restcast_serializers::SerializeOptions;
///
/// let options = SerializeOptions::new()
///     .with_exclude(["password"])
///     .with_include(["full_name"]);
///
/// assert!(options.fields.is_none());
/// assert_eq!(options.exclude.as_deref(), Some(&["password".to_string()][..]));
/// ```
#[derive(Debug, Clone, Default)]
pub struct SerializeOptions {
	pub fields: Option<FieldSpec>,
	pub include: Option<FieldSpec>,
	pub exclude: Option<Vec<String>>,
	pub fixup: Option<Fixup>,
	pub request: Option<RequestContext>,
	pub media_url: Option<String>,
	pub filter: Option<Filter>,
}

impl SerializeOptions {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_fields(mut self, fields: impl Into<FieldSpec>) -> Self {
		self.fields = Some(fields.into());
		self
	}

	pub fn with_include(mut self, include: impl Into<FieldSpec>) -> Self {
		self.include = Some(include.into());
		self
	}

	pub fn with_exclude<I, S>(mut self, exclude: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.exclude = Some(exclude.into_iter().map(Into::into).collect());
		self
	}

	pub fn with_fixup(mut self, fixup: Fixup) -> Self {
		self.fixup = Some(fixup);
		self
	}

	pub fn with_request(mut self, request: RequestContext) -> Self {
		self.request = Some(request);
		self
	}

	/// Serve stored file names from `media_url` instead of the default
	pub fn with_media_url(mut self, media_url: impl Into<String>) -> Self {
		self.media_url = Some(media_url.into());
		self
	}

	pub fn with_filter(mut self, filter: Filter) -> Self {
		self.filter = Some(filter);
		self
	}

	/// Check the field specifications, recursing into nested ones
	pub fn validate(&self) -> Result<()> {
		for spec in [&self.fields, &self.include].into_iter().flatten() {
			spec.validate()?;
		}
		Ok(())
	}

	/// Parse options from their JSON description
	///
	/// Only `fields`, `include` and `exclude` can be described in JSON; any
	/// other key is rejected.
	///
	/// # Examples
	///
	/// ```
	/// use restcast_serializers::SerializeOptions;
	/// use serde_json::json;
	///
	/// let options = SerializeOptions::from_value(&json!({
	///     "fields": ["title", "from", "to"],
	///     "exclude": "to",
	/// }))
	/// .unwrap();
	/// assert_eq!(options.fields.unwrap().len(), 3);
	/// assert_eq!(options.exclude, Some(vec!["to".to_string()]));
	///
	/// assert!(SerializeOptions::from_value(&json!({"order_by": "title"})).is_err());
	/// ```
	pub fn from_value(value: &Value) -> Result<Self> {
		let Value::Object(entries) = value else {
			return Err(SerializerError::Configuration(format!(
				"serialization options must be an object, not {}",
				value
			)));
		};

		let mut options = Self::new();
		for (key, value) in entries {
			match key.as_str() {
				"fields" => options.fields = Some(FieldSpec::from_value(value)?),
				"include" => options.include = Some(FieldSpec::from_value(value)?),
				"exclude" => options.exclude = Some(names_from_value(value)?),
				other => {
					return Err(SerializerError::Configuration(format!(
						"unknown serialization option '{}'",
						other
					)));
				}
			}
		}
		Ok(options)
	}
}

fn names_from_value(value: &Value) -> Result<Vec<String>> {
	match value {
		Value::String(list) => Ok(parse_field_list(list)),
		Value::Array(items) => items
			.iter()
			.map(|item| {
				item.as_str().map(str::to_string).ok_or_else(|| {
					SerializerError::Configuration(format!("excluded names must be strings, not {}", item))
				})
			})
			.collect(),
		other => Err(SerializerError::Configuration(format!(
			"exclude must be an array or a string, not {}",
			other
		))),
	}
}
