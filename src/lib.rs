//! # restcast
//!
//! A REST API toolkit that turns ORM records into JSON primitive trees,
//! inspired by Django REST helpers.
//!
//! Records describe their fields through a [`ModelMeta`] table. The
//! serializer engine walks records, relations, collections and mappings and
//! produces objects whose keys follow the requested field order. Endpoints
//! wrap the output in the `{"data": ...}` response envelope.
//!
//! ## Feature Flags
//!
//! - `minimal` - Record layer, serializer engine and response envelopes
//! - `conf` - Settings and logging setup
//! - `views` - Generic endpoints (implies `conf`)
//! - `full` (default) - Everything
//!
//! ## Quick Example
//!
//! ```
//! use restcast::prelude::*;
//! use serde_json::json;
//!
//! let source = Source::mapping([
//!     ("count", Source::scalar(1)),
//!     ("items", Source::collection(vec![Source::scalar("a")])),
//! ]);
//! let data = serialize(source, &SerializeOptions::new()).unwrap();
//!
//! assert_eq!(data, json!({"count": 1, "items": ["a"]}));
//! ```

#[cfg(feature = "conf")]
pub mod conf;
#[cfg(feature = "views")]
pub mod views;

pub use restcast_http as http;
pub use restcast_orm as orm;
pub use restcast_serializers as serializers;

// Re-export the record layer
pub use restcast_orm::{
	Attribute, AttributeError, FieldFile, FieldKind, FieldMeta, FieldValue, Geometry, ModelMeta,
	Record, RelatedSet, RelationManager,
};

// Re-export the serializer engine
pub use restcast_serializers::{
	FieldSpec, Filter, Fixup, SerializeOptions, Serializer, SerializerError, SerializerMeta, Source,
	flatten, serialize, serialize_model, serialize_stream,
};

// Re-export response envelopes
pub use restcast_http::{ApiResponse, PageInfo, RequestContext, StreamingJsonEncoder};

#[cfg(feature = "conf")]
pub use restcast_conf::{ApiSettings, LoggingSettings, SettingsError, init_logging};

#[cfg(feature = "views")]
pub use restcast_views::{EndpointError, GenericEndpoint, SerializingEndpoint};

/// Commonly used types
pub mod prelude {
	pub use crate::{
		ApiResponse, Attribute, AttributeError, FieldKind, FieldMeta, FieldSpec, FieldValue,
		ModelMeta, PageInfo, Record, RelatedSet, RequestContext, SerializeOptions, Serializer,
		SerializerError, SerializerMeta, Source, flatten, serialize,
	};

	#[cfg(feature = "conf")]
	pub use crate::{ApiSettings, init_logging};

	#[cfg(feature = "views")]
	pub use crate::{EndpointError, GenericEndpoint, SerializingEndpoint};
}
