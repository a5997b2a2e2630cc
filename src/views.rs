//! Views module.
//!
//! Generic endpoints that turn serialized records into API responses.
//!
//! # Examples
//!
//! ```rust,no_run
//! use restcast::views::{GenericEndpoint, SerializingEndpoint};
//!
//! let endpoint = GenericEndpoint::new("BookList")
//!     .with_query("fields=id,title")
//!     .unwrap();
//! # let _ = endpoint.name();
//! ```

pub use restcast_views::*;
