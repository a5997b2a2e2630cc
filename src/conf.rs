//! Settings module.
//!
//! # Examples
//!
//! ```rust,no_run
//! use restcast::conf::{ApiSettings, init_logging};
//!
//! let settings = ApiSettings::from_env().unwrap();
//! settings.validate().unwrap();
//! init_logging(&settings.logging);
//! ```

pub use restcast_conf::*;
