//! Per-model field metadata tables
//!
//! Each model describes its fields once, in declaration order. The serializer
//! engine consults this table by name to pick a coercion instead of inspecting
//! values at runtime.
//!
//! Tables are usually built lazily in a `static`:
//!
//! ```
//! use restcast_orm::{FieldKind, FieldMeta, ModelMeta};
//! use std::sync::LazyLock;
//!
//! static BOOK: LazyLock<ModelMeta> = LazyLock::new(|| {
//!     ModelMeta::new("library", "Book")
//!         .with_field(FieldMeta::new("id", FieldKind::Auto).primary_key())
//!         .with_field(FieldMeta::foreign_key("author", "Author"))
//!         .with_field(FieldMeta::new("title", FieldKind::Char))
//!         .with_field(FieldMeta::many_to_many("tags", "Tag"))
//! });
//!
//! let names: Vec<_> = BOOK.local_field_names().collect();
//! assert_eq!(names, vec!["id", "author", "title"]);
//! assert_eq!(BOOK.get_field("author").unwrap().attname(), "author_id");
//! ```

/// Storage kind of a model field
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
	/// Auto-incrementing integer primary key
	Auto,
	Integer,
	Float,
	Decimal,
	Boolean,
	Char,
	Text,
	Date,
	Time,
	DateTime,
	Uuid,
	/// Uploaded file reference
	File,
	/// Uploaded image reference (a file field)
	Image,
	/// Spatial column
	Geometry,
	/// Raw JSON document column
	Json,
	/// Many-to-one relation stored as `<name>_id`
	ForeignKey,
	/// One-to-one relation stored as `<name>_id`
	OneToOne,
	/// Many-to-many relation, stored in a join table
	ManyToMany,
}

impl FieldKind {
	/// Whether the field is a relation to another model
	pub fn is_relation(self) -> bool {
		matches!(
			self,
			FieldKind::ForeignKey | FieldKind::OneToOne | FieldKind::ManyToMany
		)
	}

	/// Whether the value lives in a column of the model's own table
	pub fn is_concrete(self) -> bool {
		self != FieldKind::ManyToMany
	}
}

/// Metadata for one field of a model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMeta {
	name: String,
	attname: String,
	kind: FieldKind,
	nullable: bool,
	primary_key: bool,
	related_model: Option<String>,
}

impl FieldMeta {
	/// Create metadata for a field of the given kind
	///
	/// The storage attribute name is derived from the kind: single-valued
	/// relations are read through `<name>_id`, everything else through the
	/// field name itself.
	///
	/// # Examples
	///
	/// ```
	/// use restcast_orm::{FieldKind, FieldMeta};
	///
	/// let field = FieldMeta::new("title", FieldKind::Char);
	/// assert_eq!(field.name(), "title");
	/// assert_eq!(field.attname(), "title");
	/// assert!(!field.is_nullable());
	/// ```
	pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
		let name = name.into();
		let attname = match kind {
			FieldKind::ForeignKey | FieldKind::OneToOne => format!("{}_id", name),
			_ => name.clone(),
		};
		Self {
			name,
			attname,
			kind,
			nullable: false,
			primary_key: false,
			related_model: None,
		}
	}

	/// Many-to-one relation to `related_model`
	pub fn foreign_key(name: impl Into<String>, related_model: impl Into<String>) -> Self {
		Self::new(name, FieldKind::ForeignKey).related_to(related_model)
	}

	/// One-to-one relation to `related_model`
	pub fn one_to_one(name: impl Into<String>, related_model: impl Into<String>) -> Self {
		Self::new(name, FieldKind::OneToOne).related_to(related_model)
	}

	/// Many-to-many relation to `related_model`
	pub fn many_to_many(name: impl Into<String>, related_model: impl Into<String>) -> Self {
		Self::new(name, FieldKind::ManyToMany).related_to(related_model)
	}

	/// Allow NULL values
	pub fn nullable(mut self) -> Self {
		self.nullable = true;
		self
	}

	/// Mark as the model's primary key
	pub fn primary_key(mut self) -> Self {
		self.primary_key = true;
		self
	}

	/// Set the model this field points at
	pub fn related_to(mut self, related_model: impl Into<String>) -> Self {
		self.related_model = Some(related_model.into());
		self
	}

	/// Override the storage attribute name
	///
	/// # Examples
	///
	/// ```
	/// use restcast_orm::FieldMeta;
	///
	/// let field = FieldMeta::foreign_key("owner", "User").with_attname("owner_pk");
	/// assert_eq!(field.attname(), "owner_pk");
	/// ```
	pub fn with_attname(mut self, attname: impl Into<String>) -> Self {
		self.attname = attname.into();
		self
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	/// Attribute name the value is read through
	pub fn attname(&self) -> &str {
		&self.attname
	}

	pub fn kind(&self) -> FieldKind {
		self.kind
	}

	pub fn is_nullable(&self) -> bool {
		self.nullable
	}

	pub fn is_primary_key(&self) -> bool {
		self.primary_key
	}

	pub fn related_model(&self) -> Option<&str> {
		self.related_model.as_deref()
	}

	/// Whether the field stores a file reference
	pub fn is_file(&self) -> bool {
		matches!(self.kind, FieldKind::File | FieldKind::Image)
	}

	/// Whether the field stores a raw JSON document
	pub fn is_json(&self) -> bool {
		self.kind == FieldKind::Json
	}

	/// Whether the field is declared directly on the model's table
	pub fn is_local(&self) -> bool {
		self.kind.is_concrete()
	}
}

/// Field metadata table for one model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelMeta {
	app_label: String,
	model_name: String,
	fields: Vec<FieldMeta>,
}

impl ModelMeta {
	/// Create an empty table
	///
	/// # Examples
	///
	/// ```
	/// use restcast_orm::ModelMeta;
	///
	/// let meta = ModelMeta::new("library", "Author");
	/// assert_eq!(meta.label(), "library.Author");
	/// assert_eq!(meta.fields().count(), 0);
	/// ```
	pub fn new(app_label: impl Into<String>, model_name: impl Into<String>) -> Self {
		Self {
			app_label: app_label.into(),
			model_name: model_name.into(),
			fields: Vec::new(),
		}
	}

	/// Append a field, keeping declaration order
	///
	/// Declaring the same name twice replaces the earlier entry in place.
	pub fn with_field(mut self, field: FieldMeta) -> Self {
		match self.fields.iter_mut().find(|f| f.name == field.name) {
			Some(existing) => *existing = field,
			None => self.fields.push(field),
		}
		self
	}

	pub fn app_label(&self) -> &str {
		&self.app_label
	}

	pub fn model_name(&self) -> &str {
		&self.model_name
	}

	/// `app_label.ModelName`
	pub fn label(&self) -> String {
		format!("{}.{}", self.app_label, self.model_name)
	}

	/// Look up a field by name
	pub fn get_field(&self, name: &str) -> Option<&FieldMeta> {
		self.fields.iter().find(|f| f.name == name)
	}

	/// All declared fields, in declaration order
	pub fn fields(&self) -> impl Iterator<Item = &FieldMeta> {
		self.fields.iter()
	}

	/// Fields stored in the model's own table, in declaration order
	pub fn local_fields(&self) -> impl Iterator<Item = &FieldMeta> {
		self.fields.iter().filter(|f| f.is_local())
	}

	/// Names of the local fields; the default serialization field list
	pub fn local_field_names(&self) -> impl Iterator<Item = &str> {
		self.local_fields().map(FieldMeta::name)
	}

	/// The primary key field, if one is declared
	pub fn pk_field(&self) -> Option<&FieldMeta> {
		self.fields.iter().find(|f| f.primary_key)
	}
}
