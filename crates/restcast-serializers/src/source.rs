//! What the engine can serialize

use indexmap::IndexMap;
use restcast_orm::{Attribute, Record, RelationManager};
use serde_json::Value;
use std::fmt;

/// Input of a serialization
///
/// Host collections are adapted into one of these variants before they reach
/// the engine, which then dispatches on the variant alone.
pub enum Source<'a> {
	/// A single record
	Record(&'a dyn Record),
	/// A to-many relation, iterated once
	Manager(&'a dyn RelationManager),
	/// Any sequence of sources, iterated once in order
	Collection(Box<dyn Iterator<Item = Source<'a>> + 'a>),
	/// Keyed sources; keys and their order are kept
	Mapping(IndexMap<String, Source<'a>>),
	/// An already primitive value, returned unchanged
	Scalar(Value),
}

impl<'a> Source<'a> {
	pub fn record(record: &'a dyn Record) -> Self {
		Source::Record(record)
	}

	pub fn manager(manager: &'a dyn RelationManager) -> Self {
		Source::Manager(manager)
	}

	/// A lazily iterated collection of records
	///
	/// # Examples
	///
	/// ```
	/// # use restcast_orm::{Attribute, AttributeError, FieldKind, FieldMeta, FieldValue, ModelMeta, Record};
	/// # use std::sync::LazyLock;
	/// # static NOTE: LazyLock<ModelMeta> = LazyLock::new(|| {
	/// #     ModelMeta::new("notes", "Note").with_field(FieldMeta::new("id", FieldKind::Auto))
	/// # });
	/// # struct Note(i64);
	/// # impl Record for Note {
	/// #     fn meta(&self) -> &ModelMeta { &NOTE }
	/// #     fn pk(&self) -> FieldValue { FieldValue::Int(self.0) }
	/// #     fn attribute(&self, name: &str) -> Result<Attribute<'_>, AttributeError> {
	/// #         match name {
	/// #             "id" => Ok(Attribute::Value(self.pk())),
	/// #             _ => Err(AttributeError::missing(self.meta(), name)),
	/// #         }
	/// #     }
	/// # }
	/// use restcast_serializers::{SerializeOptions, Source, serialize};
	/// use serde_json::json;
	///
	/// let notes = vec![Note(1), Note(2)];
	/// let data = serialize(Source::records(&notes), &SerializeOptions::new()).unwrap();
	/// assert_eq!(data, json!([{"id": 1}, {"id": 2}]));
	/// ```
	pub fn records<I, R>(records: I) -> Self
	where
		I: IntoIterator<Item = &'a R>,
		I::IntoIter: 'a,
		R: Record + 'a,
	{
		Source::Collection(Box::new(
			records.into_iter().map(|record| Source::Record(record as &dyn Record)),
		))
	}

	/// A lazily iterated collection of arbitrary sources
	pub fn collection<I>(items: I) -> Self
	where
		I: IntoIterator<Item = Source<'a>>,
		I::IntoIter: 'a,
	{
		Source::Collection(Box::new(items.into_iter()))
	}

	/// Keyed sources, in insertion order
	pub fn mapping<K, I>(entries: I) -> Self
	where
		K: Into<String>,
		I: IntoIterator<Item = (K, Source<'a>)>,
	{
		Source::Mapping(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
	}

	pub fn scalar(value: impl Into<Value>) -> Self {
		Source::Scalar(value.into())
	}
}

impl<'a> From<&'a dyn Record> for Source<'a> {
	fn from(record: &'a dyn Record) -> Self {
		Source::Record(record)
	}
}

impl<'a> From<&'a dyn RelationManager> for Source<'a> {
	fn from(manager: &'a dyn RelationManager) -> Self {
		Source::Manager(manager)
	}
}

impl From<Value> for Source<'_> {
	fn from(value: Value) -> Self {
		Source::Scalar(value)
	}
}

impl<'a> From<Attribute<'a>> for Source<'a> {
	fn from(attribute: Attribute<'a>) -> Self {
		match attribute {
			Attribute::Value(value) => Source::Scalar(value.to_wire()),
			Attribute::Related(record) => Source::Record(record),
			Attribute::Many(manager) => Source::Manager(manager),
		}
	}
}

impl fmt::Debug for Source<'_> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Source::Record(record) => f.debug_tuple("Record").field(&record.display()).finish(),
			Source::Manager(manager) => f
				.debug_tuple("Manager")
				.field(&manager.related_model())
				.finish(),
			Source::Collection(_) => f.write_str("Collection(..)"),
			Source::Mapping(map) => f.debug_tuple("Mapping").field(map).finish(),
			Source::Scalar(value) => f.debug_tuple("Scalar").field(value).finish(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use restcast_orm::FieldValue;
	use rstest::rstest;
	use serde_json::json;

	#[rstest]
	fn test_value_attribute_becomes_wire_scalar() {
		let source = Source::from(Attribute::Value(FieldValue::Int(5)));
		assert!(matches!(source, Source::Scalar(ref v) if *v == json!(5)));
	}

	#[rstest]
	fn test_mapping_keeps_order() {
		let source = Source::mapping([("z", Source::scalar(1)), ("a", Source::scalar(2))]);
		let Source::Mapping(map) = source else {
			panic!("expected a mapping");
		};
		assert_eq!(map.keys().collect::<Vec<_>>(), ["z", "a"]);
	}

	#[rstest]
	fn test_debug_output() {
		let source = Source::collection(vec![Source::scalar("x")]);
		assert_eq!(format!("{:?}", source), "Collection(..)");
		assert_eq!(format!("{:?}", Source::scalar(true)), "Scalar(Bool(true))");
	}
}
