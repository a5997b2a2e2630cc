//! # restcast-serializers
//!
//! Turns records, relations and collections of them into JSON primitive
//! trees: objects, arrays and scalars, with object keys in field order.
//!
//! ## Overview
//!
//! - **[`serialize`]**: recursive dispatch over a [`Source`]
//! - **[`serialize_model`]**: one record to one mapping
//! - **[`FieldSpec`]**: named, computed and nested field descriptors
//! - **[`SerializeOptions`]**: `fields`, `include`, `exclude`, `fixup`,
//!   `request` and `filter` for one call
//! - **[`Serializer`]**: a source bound to its options, with cached output
//! - **[`flatten`]**: fixup merging a nested mapping into its parent
//!
//! ## Example
//!
//! ```
//! use restcast_serializers::{SerializeOptions, Source, serialize};
//! use serde_json::json;
//!
//! // Mappings and collections are walked recursively; scalars pass through
//! let source = Source::mapping([
//!     ("total", Source::scalar(2)),
//!     ("items", Source::collection(vec![Source::scalar("a"), Source::scalar("b")])),
//! ]);
//! let data = serialize(source, &SerializeOptions::new()).unwrap();
//!
//! assert_eq!(data, json!({"total": 2, "items": ["a", "b"]}));
//! ```

pub mod descriptor;
pub mod engine;
pub mod error;
pub mod fixup;
pub mod meta;
pub mod options;
pub mod serializer;
pub mod source;

pub use descriptor::{ComputedFn, FieldDescriptor, FieldSpec, parse_field_list};
pub use engine::{serialize, serialize_model, serialize_stream};
pub use error::{Result, SerializerError};
pub use fixup::flatten;
pub use meta::{DefaultMeta, SerializerMeta};
pub use options::{Filter, Fixup, SerializeOptions};
pub use serializer::Serializer;
pub use source::Source;
