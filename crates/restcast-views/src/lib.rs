//! # restcast-views
//!
//! Endpoint glue between the serializer engine and API responses.
//!
//! - **[`SerializingEndpoint`]**: list, detail, created and streamed list
//!   responses, plus error responses in the standard envelope
//! - **[`GenericEndpoint`]**: an endpoint configured with builders
//! - **[`overrides_from_query`]**: `fields`, `include` and `exclude` taken
//!   from a query string
//!
//! Routing, pagination and persistence stay with the host application: the
//! endpoint receives records and page info and hands back [`ApiResponse`]s.
//!
//! [`ApiResponse`]: restcast_http::ApiResponse

pub mod endpoint;
pub mod error;
pub mod query;

pub use endpoint::{GenericEndpoint, SerializingEndpoint};
pub use error::{EndpointError, Result};
pub use query::overrides_from_query;
