//! Sample models used across the restcast test suites
//!
//! A small library schema (authors, publishers, books and tags) and a people
//! schema (persons, their jobs and passports) covering every field kind the
//! serializer engine treats specially.

use chrono::NaiveDate;
use restcast_orm::{
	Attribute, AttributeError, FieldFile, FieldKind, FieldMeta, FieldValue, Geometry, ModelMeta,
	Record, RelatedSet,
};
use rust_decimal::Decimal;
use serde_json::Value;
use std::sync::LazyLock;

pub static AUTHOR: LazyLock<ModelMeta> = LazyLock::new(|| {
	ModelMeta::new("library", "Author")
		.with_field(FieldMeta::new("id", FieldKind::Auto).primary_key())
		.with_field(FieldMeta::new("name", FieldKind::Char))
		.with_field(FieldMeta::new("birth_date", FieldKind::Date))
});

pub static PUBLISHER: LazyLock<ModelMeta> = LazyLock::new(|| {
	ModelMeta::new("library", "Publisher")
		.with_field(FieldMeta::new("id", FieldKind::Auto).primary_key())
		.with_field(FieldMeta::new("name", FieldKind::Char))
		.with_field(FieldMeta::new("logo", FieldKind::Image))
		.with_field(FieldMeta::new("headquarters", FieldKind::Geometry).nullable())
		.with_field(FieldMeta::new("settings", FieldKind::Json))
});

pub static TAG: LazyLock<ModelMeta> = LazyLock::new(|| {
	ModelMeta::new("library", "Tag")
		.with_field(FieldMeta::new("id", FieldKind::Auto).primary_key())
		.with_field(FieldMeta::new("name", FieldKind::Char))
});

pub static BOOK: LazyLock<ModelMeta> = LazyLock::new(|| {
	ModelMeta::new("library", "Book")
		.with_field(FieldMeta::new("id", FieldKind::Auto).primary_key())
		.with_field(FieldMeta::foreign_key("author", "Author"))
		.with_field(FieldMeta::foreign_key("publisher", "Publisher").nullable())
		.with_field(FieldMeta::new("title", FieldKind::Char))
		.with_field(FieldMeta::new("price", FieldKind::Decimal))
		.with_field(FieldMeta::new("published", FieldKind::Date))
		.with_field(FieldMeta::new("cover", FieldKind::File).nullable())
		.with_field(FieldMeta::many_to_many("tags", "Tag"))
});

pub static PERSON: LazyLock<ModelMeta> = LazyLock::new(|| {
	ModelMeta::new("people", "Person")
		.with_field(FieldMeta::new("id", FieldKind::Auto).primary_key())
		.with_field(FieldMeta::new("name", FieldKind::Char))
		.with_field(FieldMeta::new("dob", FieldKind::Date))
		.with_field(FieldMeta::new("photo", FieldKind::Image))
		.with_field(FieldMeta::new("home", FieldKind::Geometry))
		.with_field(FieldMeta::new("profile", FieldKind::Json))
});

pub static JOB: LazyLock<ModelMeta> = LazyLock::new(|| {
	ModelMeta::new("people", "Job")
		.with_field(FieldMeta::new("id", FieldKind::Auto).primary_key())
		.with_field(FieldMeta::foreign_key("person", "Person"))
		.with_field(FieldMeta::new("title", FieldKind::Char))
		.with_field(FieldMeta::new("from", FieldKind::Date))
		.with_field(FieldMeta::new("to", FieldKind::Date).nullable())
});

pub static PASSPORT: LazyLock<ModelMeta> = LazyLock::new(|| {
	ModelMeta::new("people", "Passport")
		.with_field(FieldMeta::new("id", FieldKind::Auto).primary_key())
		.with_field(FieldMeta::one_to_one("person", "Person"))
		.with_field(FieldMeta::new("number", FieldKind::Char))
});

#[derive(Debug, Clone)]
pub struct Author {
	pub id: i64,
	pub name: String,
	pub birth_date: NaiveDate,
}

impl Record for Author {
	fn meta(&self) -> &ModelMeta {
		&AUTHOR
	}

	fn pk(&self) -> FieldValue {
		self.id.into()
	}

	fn attribute(&self, name: &str) -> Result<Attribute<'_>, AttributeError> {
		let value: FieldValue = match name {
			"id" => self.id.into(),
			"name" => self.name.as_str().into(),
			"birth_date" => self.birth_date.into(),
			// Property
			"initials" => self
				.name
				.split_whitespace()
				.filter_map(|part| part.chars().next())
				.collect::<String>()
				.into(),
			_ => return Err(AttributeError::missing(self.meta(), name)),
		};
		Ok(Attribute::Value(value))
	}

	fn display(&self) -> String {
		self.name.clone()
	}
}

#[derive(Debug, Clone)]
pub struct Publisher {
	pub id: i64,
	pub name: String,
	pub logo: FieldFile,
	pub headquarters: Option<Geometry>,
	pub settings: Value,
}

impl Record for Publisher {
	fn meta(&self) -> &ModelMeta {
		&PUBLISHER
	}

	fn pk(&self) -> FieldValue {
		self.id.into()
	}

	fn attribute(&self, name: &str) -> Result<Attribute<'_>, AttributeError> {
		let value: FieldValue = match name {
			"id" => self.id.into(),
			"name" => self.name.as_str().into(),
			"logo" => self.logo.clone().into(),
			"headquarters" => self.headquarters.clone().into(),
			"settings" => FieldValue::Json(self.settings.clone()),
			_ => return Err(AttributeError::missing(self.meta(), name)),
		};
		Ok(Attribute::Value(value))
	}
}

#[derive(Debug, Clone)]
pub struct Tag {
	pub id: i64,
	pub name: String,
}

impl Record for Tag {
	fn meta(&self) -> &ModelMeta {
		&TAG
	}

	fn pk(&self) -> FieldValue {
		self.id.into()
	}

	fn attribute(&self, name: &str) -> Result<Attribute<'_>, AttributeError> {
		match name {
			"id" => Ok(Attribute::Value(self.id.into())),
			"name" => Ok(Attribute::Value(self.name.as_str().into())),
			_ => Err(AttributeError::missing(self.meta(), name)),
		}
	}
}

/// A book
///
/// `author` is `None` when the author row was deleted while `author_id`
/// still points at it.
#[derive(Debug, Clone)]
pub struct Book {
	pub id: i64,
	pub title: String,
	pub author_id: i64,
	pub author: Option<Author>,
	pub publisher_id: Option<i64>,
	pub publisher: Option<Publisher>,
	pub price: Decimal,
	pub published: NaiveDate,
	/// Stored file name, empty when no cover was uploaded
	pub cover: Option<String>,
	pub tags: RelatedSet<Tag>,
}

impl Record for Book {
	fn meta(&self) -> &ModelMeta {
		&BOOK
	}

	fn pk(&self) -> FieldValue {
		self.id.into()
	}

	fn attribute(&self, name: &str) -> Result<Attribute<'_>, AttributeError> {
		let value: FieldValue = match name {
			"id" => self.id.into(),
			"title" => self.title.as_str().into(),
			"author_id" => self.author_id.into(),
			"publisher_id" => self.publisher_id.into(),
			"price" => self.price.into(),
			"published" => self.published.into(),
			"cover" => self.cover.as_deref().into(),
			"author" => {
				return match &self.author {
					Some(author) => Ok(Attribute::Related(author)),
					None => Err(AttributeError::does_not_exist(self.meta(), name)),
				};
			}
			"publisher" => {
				return match (&self.publisher, self.publisher_id) {
					(Some(publisher), _) => Ok(Attribute::Related(publisher)),
					(None, None) => Ok(Attribute::Value(FieldValue::Null)),
					(None, Some(_)) => Err(AttributeError::does_not_exist(self.meta(), name)),
				};
			}
			"tags" => return Ok(Attribute::Many(&self.tags)),
			_ => return Err(AttributeError::missing(self.meta(), name)),
		};
		Ok(Attribute::Value(value))
	}

	fn display(&self) -> String {
		self.title.clone()
	}
}

#[derive(Debug, Clone)]
pub struct Job {
	pub id: i64,
	pub person_id: i64,
	pub title: String,
	pub from: NaiveDate,
	pub to: Option<NaiveDate>,
}

impl Record for Job {
	fn meta(&self) -> &ModelMeta {
		&JOB
	}

	fn pk(&self) -> FieldValue {
		self.id.into()
	}

	fn attribute(&self, name: &str) -> Result<Attribute<'_>, AttributeError> {
		let value: FieldValue = match name {
			"id" => self.id.into(),
			"person_id" => self.person_id.into(),
			"title" => self.title.as_str().into(),
			"from" => self.from.into(),
			"to" => self.to.into(),
			_ => return Err(AttributeError::missing(self.meta(), name)),
		};
		Ok(Attribute::Value(value))
	}
}

#[derive(Debug, Clone)]
pub struct Passport {
	pub id: i64,
	pub person_id: i64,
	pub number: String,
}

impl Record for Passport {
	fn meta(&self) -> &ModelMeta {
		&PASSPORT
	}

	fn pk(&self) -> FieldValue {
		self.id.into()
	}

	fn attribute(&self, name: &str) -> Result<Attribute<'_>, AttributeError> {
		match name {
			"id" => Ok(Attribute::Value(self.id.into())),
			"person_id" => Ok(Attribute::Value(self.person_id.into())),
			"number" => Ok(Attribute::Value(self.number.as_str().into())),
			_ => Err(AttributeError::missing(self.meta(), name)),
		}
	}
}

/// A person
///
/// `jobs` and `passport` are reverse relations, reachable as attributes but
/// not declared as local fields.
#[derive(Debug, Clone)]
pub struct Person {
	pub id: i64,
	pub name: String,
	pub dob: NaiveDate,
	pub photo: FieldFile,
	pub home: Geometry,
	pub profile: Value,
	pub jobs: RelatedSet<Job>,
	pub passport: Option<Passport>,
}

impl Record for Person {
	fn meta(&self) -> &ModelMeta {
		&PERSON
	}

	fn pk(&self) -> FieldValue {
		self.id.into()
	}

	fn attribute(&self, name: &str) -> Result<Attribute<'_>, AttributeError> {
		let value: FieldValue = match name {
			"id" => self.id.into(),
			"name" => self.name.as_str().into(),
			"dob" => self.dob.into(),
			"photo" => self.photo.clone().into(),
			"home" => self.home.clone().into(),
			"profile" => FieldValue::Json(self.profile.clone()),
			"jobs" => return Ok(Attribute::Many(&self.jobs)),
			"passport" => {
				return match &self.passport {
					Some(passport) => Ok(Attribute::Related(passport)),
					None => Err(AttributeError::does_not_exist(self.meta(), name)),
				};
			}
			_ => return Err(AttributeError::missing(self.meta(), name)),
		};
		Ok(Attribute::Value(value))
	}
}
