//! # restcast-http
//!
//! The HTTP-facing collaborators of the restcast serializer engine: the
//! request context used to build absolute URIs, the streaming JSON encoder
//! and the JSON response envelopes.
//!
//! Transport and routing are not handled here. An [`ApiResponse`] is a status,
//! a header map and a JSON body that any server integration can send.

pub mod context;
pub mod encoders;
pub mod error;
pub mod response;

pub use context::RequestContext;
pub use encoders::{LazyList, LazyMap, StreamingJsonEncoder, TryLazyList};
pub use error::{HttpError, Result};
pub use response::{ApiResponse, PageInfo, data_envelope, list_envelope};
