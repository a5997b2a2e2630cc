//! # restcast-orm
//!
//! The record layer that the restcast serializer engine reads from.
//!
//! A persistence layer plugs into restcast by implementing [`Record`] for its
//! model types and describing each model once with a [`ModelMeta`] table. The
//! engine never introspects types at runtime: every coercion decision is made
//! by looking the field up in that table.
//!
//! ## Overview
//!
//! - **[`Record`]**: a single persistent object with named attributes
//! - **[`RelationManager`]**: a lazy handle over a to-many relationship
//! - **[`ModelMeta`] / [`FieldMeta`]**: the explicit field-metadata table
//! - **[`FieldValue`]**: the closed set of values an attribute can hold
//!
//! ## Examples
//!
//! ```
//! use restcast_orm::{Attribute, AttributeError, FieldKind, FieldMeta, FieldValue, ModelMeta, Record};
//! use std::sync::LazyLock;
//!
//! static PUBLISHER: LazyLock<ModelMeta> = LazyLock::new(|| {
//!     ModelMeta::new("library", "Publisher")
//!         .with_field(FieldMeta::new("id", FieldKind::Auto).primary_key())
//!         .with_field(FieldMeta::new("name", FieldKind::Char))
//! });
//!
//! struct Publisher {
//!     id: i64,
//!     name: String,
//! }
//!
//! impl Record for Publisher {
//!     fn meta(&self) -> &ModelMeta {
//!         &PUBLISHER
//!     }
//!
//!     fn pk(&self) -> FieldValue {
//!         FieldValue::Int(self.id)
//!     }
//!
//!     fn attribute(&self, name: &str) -> Result<Attribute<'_>, AttributeError> {
//!         match name {
//!             "id" => Ok(Attribute::Value(self.id.into())),
//!             "name" => Ok(Attribute::Value(self.name.as_str().into())),
//!             _ => Err(AttributeError::missing(self.meta(), name)),
//!         }
//!     }
//! }
//!
//! let publisher = Publisher { id: 1, name: "Acme".to_string() };
//! assert_eq!(publisher.display(), "Publisher object (1)");
//! ```

pub mod file;
pub mod geometry;
pub mod meta;
pub mod record;
pub mod value;

pub use file::FieldFile;
pub use geometry::{Coord, Geometry, Shape};
pub use meta::{FieldKind, FieldMeta, ModelMeta};
pub use record::{Attribute, AttributeError, Record, RelatedSet, RelationManager};
pub use value::FieldValue;
