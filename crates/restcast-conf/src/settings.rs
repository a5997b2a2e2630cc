//! API settings
//!
//! Settings can be built in code, loaded from `RESTCAST_*` environment
//! variables or read from a `.toml`/`.json` file. Every field has a default,
//! so a file only needs to name the values it changes.

use restcast_orm::FieldFile;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::debug;
use tracing_subscriber::EnvFilter;

pub const ENV_PREFIX: &str = "RESTCAST_";

/// Settings shared by the serializers and endpoints
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiSettings {
	/// Debug mode; error responses carry a traceback
	pub debug: bool,

	/// Stream list responses element by element instead of building them
	pub streaming: bool,

	/// Base URL prepended to stored file names
	pub media_url: String,

	/// Indent rendered JSON
	pub json_pretty: bool,

	pub logging: LoggingSettings,
}

impl Default for ApiSettings {
	fn default() -> Self {
		Self {
			debug: false,
			streaming: false,
			media_url: restcast_orm::file::DEFAULT_MEDIA_URL.to_string(),
			json_pretty: false,
			logging: LoggingSettings::default(),
		}
	}
}

impl ApiSettings {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_debug(mut self, debug: bool) -> Self {
		self.debug = debug;
		self
	}

	pub fn with_streaming(mut self, streaming: bool) -> Self {
		self.streaming = streaming;
		self
	}

	pub fn with_media_url(mut self, media_url: impl Into<String>) -> Self {
		self.media_url = media_url.into();
		self
	}

	pub fn with_json_pretty(mut self, json_pretty: bool) -> Self {
		self.json_pretty = json_pretty;
		self
	}

	pub fn with_logging(mut self, logging: LoggingSettings) -> Self {
		self.logging = logging;
		self
	}

	/// Check values that deserialize fine but cannot be used
	///
	/// # Examples
	///
	/// ```
	/// use restcast_conf::ApiSettings;
	///
	/// assert!(ApiSettings::default().validate().is_ok());
	/// assert!(ApiSettings::default().with_media_url("/media").validate().is_err());
	/// ```
	pub fn validate(&self) -> Result<(), SettingsError> {
		if self.media_url.is_empty() {
			return Err(SettingsError::ValidationError(
				"MEDIA_URL must not be empty".to_string(),
			));
		}

		if !self.media_url.ends_with('/') {
			return Err(SettingsError::ValidationError(format!(
				"MEDIA_URL must end with a slash, got '{}'",
				self.media_url
			)));
		}

		self.logging.validate()
	}

	/// Load settings from environment variables
	///
	/// | variable               | setting           |
	/// |------------------------|-------------------|
	/// | `RESTCAST_DEBUG`       | `debug`           |
	/// | `RESTCAST_STREAMING`   | `streaming`       |
	/// | `RESTCAST_MEDIA_URL`   | `media_url`       |
	/// | `RESTCAST_JSON_PRETTY` | `json_pretty`     |
	/// | `RESTCAST_LOG_LEVEL`   | `logging.level`   |
	/// | `RESTCAST_LOG_FORMAT`  | `logging.format`  |
	///
	/// Unset variables keep their default.
	pub fn from_env() -> Result<Self, SettingsError> {
		let mut settings = Self::default();

		if let Some(debug) = env_flag("DEBUG")? {
			settings.debug = debug;
		}

		if let Some(streaming) = env_flag("STREAMING")? {
			settings.streaming = streaming;
		}

		if let Some(media_url) = env_var("MEDIA_URL") {
			settings.media_url = media_url;
		}

		if let Some(pretty) = env_flag("JSON_PRETTY")? {
			settings.json_pretty = pretty;
		}

		// Logging
		if let Some(level) = env_var("LOG_LEVEL") {
			settings.logging.level = level;
		}

		if let Some(format) = env_var("LOG_FORMAT") {
			settings.logging.format = format.parse()?;
		}

		debug!(?settings, "loaded settings from environment");
		Ok(settings)
	}

	/// Load settings from a configuration file
	///
	/// The format follows the file extension, `.toml` or `.json`.
	pub fn from_file(path: impl Into<PathBuf>) -> Result<Self, SettingsError> {
		let path = path.into();
		let contents = std::fs::read_to_string(&path).map_err(|e| {
			SettingsError::FileError(format!("Failed to read {}: {}", path.display(), e))
		})?;

		let settings: ApiSettings = match path.extension().and_then(|s| s.to_str()) {
			Some("toml") => toml::from_str(&contents)
				.map_err(|e| SettingsError::ParseError(format!("TOML parse error: {}", e)))?,
			Some("json") => serde_json::from_str(&contents)
				.map_err(|e| SettingsError::ParseError(format!("JSON parse error: {}", e)))?,
			_ => {
				return Err(SettingsError::UnsupportedFormat(
					"Supported formats: .toml, .json".to_string(),
				));
			}
		};

		debug!(path = %path.display(), "loaded settings from file");
		Ok(settings)
	}

	/// A file handle rooted at the configured media URL
	///
	/// # Examples
	///
	/// ```
	/// use restcast_conf::ApiSettings;
	///
	/// let settings = ApiSettings::default().with_media_url("https://cdn.example.com/");
	/// let file = settings.field_file("avatars/ada.png");
	/// assert_eq!(file.url().as_deref(), Some("https://cdn.example.com/avatars/ada.png"));
	/// ```
	pub fn field_file(&self, name: impl Into<String>) -> FieldFile {
		FieldFile::new(name).with_base_url(self.media_url.as_str())
	}
}

/// Logging settings
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
	/// `EnvFilter` directive, e.g. `info` or `restcast_serializers=trace`
	pub level: String,
	pub format: LogFormat,
}

impl Default for LoggingSettings {
	fn default() -> Self {
		Self {
			level: "info".to_string(),
			format: LogFormat::Text,
		}
	}
}

impl LoggingSettings {
	pub fn new(level: impl Into<String>, format: LogFormat) -> Self {
		Self {
			level: level.into(),
			format,
		}
	}

	pub fn validate(&self) -> Result<(), SettingsError> {
		EnvFilter::try_new(&self.level).map_err(|e| {
			SettingsError::ValidationError(format!("invalid log level '{}': {}", self.level, e))
		})?;
		Ok(())
	}
}

/// Output format of the log subscriber
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
	#[default]
	Text,
	Json,
}

impl FromStr for LogFormat {
	type Err = SettingsError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim().to_lowercase().as_str() {
			"text" => Ok(LogFormat::Text),
			"json" => Ok(LogFormat::Json),
			other => Err(SettingsError::ParseError(format!(
				"unknown log format '{}', expected 'text' or 'json'",
				other
			))),
		}
	}
}

impl fmt::Display for LogFormat {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			LogFormat::Text => f.write_str("text"),
			LogFormat::Json => f.write_str("json"),
		}
	}
}

/// Settings error
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
	#[error("File error: {0}")]
	FileError(String),

	#[error("Parse error: {0}")]
	ParseError(String),

	#[error("Validation error: {0}")]
	ValidationError(String),

	#[error("Unsupported format: {0}")]
	UnsupportedFormat(String),
}

fn env_var(name: &str) -> Option<String> {
	std::env::var(format!("{}{}", ENV_PREFIX, name)).ok()
}

fn env_flag(name: &str) -> Result<Option<bool>, SettingsError> {
	let Some(raw) = env_var(name) else {
		return Ok(None);
	};
	match raw.trim().to_lowercase().as_str() {
		"1" | "true" | "yes" | "on" => Ok(Some(true)),
		"0" | "false" | "no" | "off" | "" => Ok(Some(false)),
		_ => Err(SettingsError::ParseError(format!(
			"{}{} must be a boolean, got '{}'",
			ENV_PREFIX, name, raw
		))),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_default_settings() {
		let settings = ApiSettings::default();
		assert!(!settings.debug);
		assert!(!settings.streaming);
		assert_eq!(settings.media_url, "/media/");
		assert_eq!(settings.logging.level, "info");
		assert_eq!(settings.logging.format, LogFormat::Text);
	}

	#[rstest]
	#[case("/media/", true)]
	#[case("https://cdn.example.com/files/", true)]
	#[case("/media", false)]
	#[case("", false)]
	fn test_media_url_validation(#[case] media_url: &str, #[case] valid: bool) {
		let settings = ApiSettings::default().with_media_url(media_url);
		assert_eq!(settings.validate().is_ok(), valid);
	}

	#[rstest]
	fn test_invalid_log_level_is_rejected() {
		let settings = ApiSettings::default()
			.with_logging(LoggingSettings::new("restcast=loud", LogFormat::Text));
		let err = settings.validate().unwrap_err();
		assert!(err.to_string().starts_with("Validation error: invalid log level"));
	}

	#[rstest]
	#[case("text", LogFormat::Text)]
	#[case("JSON", LogFormat::Json)]
	#[case(" json ", LogFormat::Json)]
	fn test_log_format_parsing(#[case] raw: &str, #[case] expected: LogFormat) {
		assert_eq!(raw.parse::<LogFormat>().unwrap(), expected);
	}

	#[rstest]
	fn test_partial_document_keeps_defaults() {
		let settings: ApiSettings = serde_json::from_str(r#"{"debug": true}"#).unwrap();
		assert!(settings.debug);
		assert_eq!(settings.media_url, "/media/");
		assert_eq!(settings.logging, LoggingSettings::default());
	}
}
