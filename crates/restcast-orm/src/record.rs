//! The record abstraction

use crate::meta::ModelMeta;
use crate::value::FieldValue;
use std::fmt;
use thiserror::Error;

/// Errors raised while reading a record attribute
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AttributeError {
	/// The record has no attribute of that name
	#[error("'{model}' object has no attribute '{attribute}'")]
	Missing { model: String, attribute: String },

	/// A to-one relation points at a row that does not exist
	#[error("{model} has no {attribute}")]
	RelatedObjectDoesNotExist { model: String, attribute: String },
}

impl AttributeError {
	pub fn missing(meta: &ModelMeta, attribute: impl Into<String>) -> Self {
		AttributeError::Missing {
			model: meta.model_name().to_string(),
			attribute: attribute.into(),
		}
	}

	pub fn does_not_exist(meta: &ModelMeta, attribute: impl Into<String>) -> Self {
		AttributeError::RelatedObjectDoesNotExist {
			model: meta.model_name().to_string(),
			attribute: attribute.into(),
		}
	}
}

/// What reading an attribute yields
pub enum Attribute<'a> {
	/// A plain value
	Value(FieldValue),
	/// A single related record
	Related(&'a dyn Record),
	/// A to-many relation
	Many(&'a dyn RelationManager),
}

impl fmt::Debug for Attribute<'_> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Attribute::Value(v) => f.debug_tuple("Value").field(v).finish(),
			Attribute::Related(r) => f.debug_tuple("Related").field(&r.display()).finish(),
			Attribute::Many(m) => f.debug_tuple("Many").field(&m.related_model()).finish(),
		}
	}
}

impl From<FieldValue> for Attribute<'_> {
	fn from(value: FieldValue) -> Self {
		Attribute::Value(value)
	}
}

/// A single persistent object
///
/// Attributes are looked up by name. For fields declared in [`Record::meta`],
/// the name passed is the field's storage name (`author_id` for a foreign key
/// named `author`); anything else (properties, related objects reached
/// through the relation name, reverse relations) is looked up by its plain
/// name.
pub trait Record {
	/// Field table of the record's model
	fn meta(&self) -> &ModelMeta;

	/// Primary key value
	fn pk(&self) -> FieldValue;

	/// Read an attribute by name
	fn attribute(&self, name: &str) -> Result<Attribute<'_>, AttributeError>;

	/// Human readable form, used when a related record is rendered inline
	fn display(&self) -> String {
		format!("{} object ({})", self.meta().model_name(), self.pk())
	}
}

/// A lazy handle over a to-many relation
pub trait RelationManager {
	/// Name of the model on the other side
	fn related_model(&self) -> &str;

	/// Iterate the related records in order
	fn all(&self) -> Box<dyn Iterator<Item = &dyn Record> + '_>;

	/// Primary keys of the related records, in order
	fn pks(&self) -> Vec<FieldValue> {
		self.all().map(|record| record.pk()).collect()
	}
}

/// Owned set of related records
///
/// # Examples
///
/// ```
/// # use restcast_orm::{Attribute, AttributeError, FieldKind, FieldMeta, FieldValue, ModelMeta, Record};
/// use restcast_orm::{RelatedSet, RelationManager};
/// # use std::sync::LazyLock;
/// # static TAG: LazyLock<ModelMeta> = LazyLock::new(|| {
/// #     ModelMeta::new("blog", "Tag").with_field(FieldMeta::new("id", FieldKind::Auto))
/// # });
/// # struct Tag(i64);
/// # impl Record for Tag {
/// #     fn meta(&self) -> &ModelMeta { &TAG }
/// #     fn pk(&self) -> FieldValue { FieldValue::Int(self.0) }
/// #     fn attribute(&self, name: &str) -> Result<Attribute<'_>, AttributeError> {
/// #         Err(AttributeError::missing(self.meta(), name))
/// #     }
/// # }
///
/// let tags = RelatedSet::new("Tag", vec![Tag(3), Tag(1)]);
/// assert_eq!(tags.pks(), vec![FieldValue::Int(3), FieldValue::Int(1)]);
/// ```
#[derive(Debug, Clone)]
pub struct RelatedSet<T> {
	related_model: String,
	items: Vec<T>,
}

impl<T> RelatedSet<T> {
	pub fn new(related_model: impl Into<String>, items: Vec<T>) -> Self {
		Self {
			related_model: related_model.into(),
			items,
		}
	}

	pub fn len(&self) -> usize {
		self.items.len()
	}

	pub fn is_empty(&self) -> bool {
		self.items.is_empty()
	}

	pub fn items(&self) -> &[T] {
		&self.items
	}

	pub fn push(&mut self, item: T) {
		self.items.push(item);
	}
}

impl<T: Record> RelationManager for RelatedSet<T> {
	fn related_model(&self) -> &str {
		&self.related_model
	}

	fn all(&self) -> Box<dyn Iterator<Item = &dyn Record> + '_> {
		Box::new(self.items.iter().map(|item| item as &dyn Record))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::meta::{FieldKind, FieldMeta};
	use rstest::{fixture, rstest};
	use std::sync::LazyLock;

	static JOB: LazyLock<ModelMeta> = LazyLock::new(|| {
		ModelMeta::new("people", "Job")
			.with_field(FieldMeta::new("id", FieldKind::Auto).primary_key())
			.with_field(FieldMeta::new("title", FieldKind::Char))
			.with_field(FieldMeta::foreign_key("company", "Company").nullable())
	});

	struct Job {
		id: i64,
		title: &'static str,
	}

	impl Record for Job {
		fn meta(&self) -> &ModelMeta {
			&JOB
		}

		fn pk(&self) -> FieldValue {
			self.id.into()
		}

		fn attribute(&self, name: &str) -> Result<Attribute<'_>, AttributeError> {
			match name {
				"id" => Ok(self.pk().into()),
				"title" => Ok(FieldValue::from(self.title).into()),
				"company_id" => Ok(FieldValue::Null.into()),
				"company" => Err(AttributeError::does_not_exist(self.meta(), name)),
				_ => Err(AttributeError::missing(self.meta(), name)),
			}
		}
	}

	#[fixture]
	fn jobs() -> RelatedSet<Job> {
		RelatedSet::new(
			"Job",
			vec![
				Job { id: 4, title: "Engineer" },
				Job { id: 2, title: "Manager" },
			],
		)
	}

	#[rstest]
	fn test_default_display() {
		let job = Job { id: 9, title: "Clerk" };
		assert_eq!(job.display(), "Job object (9)");
	}

	#[rstest]
	fn test_related_set_iterates_in_order(jobs: RelatedSet<Job>) {
		let titles: Vec<_> = jobs
			.all()
			.map(|r| match r.attribute("title") {
				Ok(Attribute::Value(v)) => v.to_string(),
				other => panic!("unexpected {:?}", other),
			})
			.collect();
		assert_eq!(titles, vec!["Engineer", "Manager"]);
		assert_eq!(jobs.pks(), vec![FieldValue::Int(4), FieldValue::Int(2)]);
		assert_eq!(jobs.related_model(), "Job");
	}

	#[rstest]
	fn test_attribute_errors() {
		let job = Job { id: 1, title: "Clerk" };
		let missing = job.attribute("salary").unwrap_err();
		assert_eq!(missing.to_string(), "'Job' object has no attribute 'salary'");

		let gone = job.attribute("company").unwrap_err();
		assert!(matches!(gone, AttributeError::RelatedObjectDoesNotExist { .. }));
		assert_eq!(gone.to_string(), "Job has no company");
	}
}
