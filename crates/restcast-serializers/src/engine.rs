//! Recursive serialization of records into primitive trees
//!
//! [`serialize`] dispatches on the [`Source`] variant and recurses through
//! collections and mappings; [`serialize_model`] turns one record into an
//! insertion-ordered mapping according to its field list.

use crate::descriptor::{ComputedFn, FieldDescriptor};
use crate::error::{Result, SerializerError};
use crate::options::SerializeOptions;
use crate::source::Source;
use restcast_orm::{Attribute, AttributeError, FieldFile, FieldMeta, FieldValue, ModelMeta, Record};
use serde_json::{Map, Value};
use tracing::{trace, warn};

/// Serialize a source into a primitive tree
///
/// - records become objects (see [`serialize_model`])
/// - relation managers and collections become arrays, keeping the members
///   the filter accepts, in iteration order
/// - mappings keep their keys and recurse into their values
/// - scalars are returned unchanged
///
/// The same options apply at every level of the recursion.
///
/// # Examples
///
/// ```
/// use restcast_serializers::{SerializeOptions, Source, serialize};
/// use serde_json::json;
///
/// let data = serialize(Source::scalar("plain"), &SerializeOptions::new()).unwrap();
/// assert_eq!(data, json!("plain"));
/// ```
pub fn serialize(source: Source<'_>, options: &SerializeOptions) -> Result<Value> {
	match source {
		Source::Record(record) => serialize_model(record, options).map(Value::Object),
		Source::Manager(manager) => {
			trace!(model = manager.related_model(), "serializing related records");
			serialize_members(manager.all().map(Source::Record), options)
		}
		Source::Collection(members) => serialize_members(members, options),
		Source::Mapping(entries) => entries
			.into_iter()
			.map(|(key, value)| Ok((key, serialize(value, options)?)))
			.collect::<Result<Map<_, _>>>()
			.map(Value::Object),
		Source::Scalar(value) => Ok(value),
	}
}

fn serialize_members<'a>(
	members: impl Iterator<Item = Source<'a>>,
	options: &SerializeOptions,
) -> Result<Value> {
	let mut out = Vec::new();
	for member in members {
		if keep(&member, options)? {
			out.push(serialize(member, options)?);
		}
	}
	Ok(Value::Array(out))
}

fn keep(member: &Source<'_>, options: &SerializeOptions) -> Result<bool> {
	match &options.filter {
		Some(filter) => filter.keep(member),
		None => Ok(true),
	}
}

/// Serialize a collection one element at a time
///
/// Collections and relation managers yield one item per member that passes
/// the filter, pulling members from the source only as items are requested.
/// Any other source yields a single item.
pub fn serialize_stream<'a>(
	source: Source<'a>,
	options: SerializeOptions,
) -> Box<dyn Iterator<Item = Result<Value>> + 'a> {
	match source {
		Source::Collection(members) => Box::new(stream_members(members, options)),
		Source::Manager(manager) => {
			Box::new(stream_members(manager.all().map(Source::Record), options))
		}
		other => Box::new(std::iter::once(serialize(other, &options))),
	}
}

fn stream_members<'a>(
	members: impl Iterator<Item = Source<'a>> + 'a,
	options: SerializeOptions,
) -> impl Iterator<Item = Result<Value>> + 'a {
	members.filter_map(move |member| match keep(&member, &options) {
		Ok(true) => Some(serialize(member, &options)),
		Ok(false) => None,
		Err(e) => Some(Err(e)),
	})
}

enum Entry<'s> {
	Name(&'s str),
	Computed(&'s str, &'s ComputedFn),
	Nested(&'s str, &'s SerializeOptions),
}

impl<'s> From<&'s FieldDescriptor> for Entry<'s> {
	fn from(descriptor: &'s FieldDescriptor) -> Self {
		match descriptor {
			FieldDescriptor::Named(name) => Entry::Name(name),
			FieldDescriptor::Computed(key, computed) => Entry::Computed(key, computed),
			FieldDescriptor::Nested(key, options) => Entry::Nested(key, options),
		}
	}
}

fn field_list<'s>(meta: &'s ModelMeta, options: &'s SerializeOptions) -> Vec<Entry<'s>> {
	let mut entries: Vec<Entry<'s>> = match &options.fields {
		None => meta.local_field_names().map(Entry::Name).collect(),
		Some(fields) => fields.iter().map(Entry::from).collect(),
	};

	// Only plain names can be excluded
	if let Some(exclude) = &options.exclude {
		entries.retain(|entry| match entry {
			Entry::Name(name) => !exclude.iter().any(|excluded| excluded == name),
			_ => true,
		});
	}

	if let Some(include) = &options.include {
		entries.extend(include.iter().map(Entry::from));
	}

	entries
}

/// Serialize one record into a mapping
///
/// The field list is the model's local fields unless `fields` is given.
/// Named fields listed in `exclude` are dropped from it and the `include`
/// descriptors are appended. Keys appear in field-list order; a key written
/// twice keeps its first position and its last value.
///
/// Named fields are read through the model field's storage name when the
/// model declares one. File fields produce their URL (absolute when a
/// request is given), geometries their GeoJSON, JSON fields their document
/// unchanged, to-many relations the list of related primary keys, related
/// records their display string and other values their wire primitive.
/// A related object that does not exist produces `null`.
///
/// After all fields are resolved the fixup hook, if any, gets the final say.
pub fn serialize_model(record: &dyn Record, options: &SerializeOptions) -> Result<Map<String, Value>> {
	let meta = record.meta();
	trace!(model = meta.model_name(), "serializing record");

	let mut data = Map::new();
	for entry in field_list(meta, options) {
		match entry {
			Entry::Name(name) => {
				let value = resolve_named(record, meta, name, options)?;
				data.insert(name.to_string(), value);
			}
			Entry::Computed(key, computed) => {
				data.insert(key.to_string(), computed.call(record)?);
			}
			Entry::Nested(key, nested) => {
				let value = match read_attribute(record, key)? {
					Some(attribute) => serialize(Source::from(attribute), nested)?,
					None => Value::Null,
				};
				data.insert(key.to_string(), value);
			}
		}
	}

	match &options.fixup {
		Some(fixup) => fixup.apply(record, data),
		None => Ok(data),
	}
}

/// Read an attribute, mapping a missing related object to `None`
fn read_attribute<'r>(record: &'r dyn Record, name: &str) -> Result<Option<Attribute<'r>>> {
	match record.attribute(name) {
		Ok(attribute) => Ok(Some(attribute)),
		Err(AttributeError::RelatedObjectDoesNotExist { model, attribute }) => {
			warn!(%model, %attribute, "related object does not exist, serializing as null");
			Ok(None)
		}
		Err(e) => Err(e.into()),
	}
}

fn resolve_named(
	record: &dyn Record,
	meta: &ModelMeta,
	name: &str,
	options: &SerializeOptions,
) -> Result<Value> {
	let field = meta.get_field(name);
	let attribute = read_attribute(record, field.map_or(name, FieldMeta::attname))?;

	if field.is_some_and(FieldMeta::is_file) {
		return file_url(meta, name, attribute, options);
	}

	let value = match attribute {
		None => Value::Null,
		Some(Attribute::Value(FieldValue::Geometry(geometry))) => geometry.to_geojson(),
		Some(Attribute::Value(value)) if field.is_some_and(FieldMeta::is_json) => value.into_json(),
		Some(Attribute::Many(manager)) => {
			Value::Array(manager.all().map(|related| related.pk().to_wire()).collect())
		}
		Some(Attribute::Value(value)) => value.to_wire(),
		Some(Attribute::Related(related)) => Value::String(related.display()),
	};
	Ok(value)
}

fn file_url(
	meta: &ModelMeta,
	name: &str,
	attribute: Option<Attribute<'_>>,
	options: &SerializeOptions,
) -> Result<Value> {
	let url = match attribute {
		None | Some(Attribute::Value(FieldValue::Null)) => None,
		Some(Attribute::Value(FieldValue::File(file))) => file.url(),
		Some(Attribute::Value(FieldValue::Text(stored))) => {
			let file = FieldFile::new(stored);
			match &options.media_url {
				Some(media_url) => file.with_base_url(media_url.as_str()).url(),
				None => file.url(),
			}
		}
		Some(other) => {
			return Err(SerializerError::Configuration(format!(
				"{}.{} is a file field but holds {:?}",
				meta.model_name(),
				name,
				other
			)));
		}
	};

	Ok(match (url, options.request.as_ref()) {
		(Some(url), Some(request)) => Value::String(request.build_absolute_uri(Some(&url))),
		(Some(url), None) => Value::String(url),
		(None, _) => Value::Null,
	})
}
