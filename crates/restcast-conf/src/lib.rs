//! # restcast-conf
//!
//! Settings for restcast applications and the logging setup that goes with
//! them.
//!
//! ## Example
//!
//! ```
//! use restcast_conf::{ApiSettings, LogFormat};
//!
//! let settings: ApiSettings = toml::from_str(r#"
//! debug = true
//! media_url = "https://cdn.example.com/"
//!
//! [logging]
//! format = "json"
//! "#).unwrap();
//!
//! assert!(settings.debug);
//! assert_eq!(settings.logging.format, LogFormat::Json);
//! assert_eq!(settings.logging.level, "info");
//! settings.validate().unwrap();
//! ```

pub mod logging;
pub mod settings;

pub use logging::init_logging;
pub use settings::{ApiSettings, ENV_PREFIX, LogFormat, LoggingSettings, SettingsError};
