//! Logging setup

use crate::settings::{LogFormat, LoggingSettings};
use tracing_subscriber::EnvFilter;

/// Install the global `tracing` subscriber described by `settings`
///
/// `RUST_LOG` takes precedence over `settings.level` when set. An invalid
/// level falls back to `info`.
///
/// Returns `false` when a global subscriber is already installed, in which
/// case nothing changes.
///
/// # Examples
///
/// ```
/// use restcast_conf::{LoggingSettings, init_logging};
///
/// let first = init_logging(&LoggingSettings::default());
/// assert!(!init_logging(&LoggingSettings::default()));
/// # let _ = first;
/// ```
pub fn init_logging(settings: &LoggingSettings) -> bool {
	let filter = EnvFilter::try_from_default_env()
		.or_else(|_| EnvFilter::try_new(&settings.level))
		.unwrap_or_else(|_| EnvFilter::new("info"));

	let builder = tracing_subscriber::fmt().with_env_filter(filter);
	let installed = match settings.format {
		LogFormat::Text => builder.try_init(),
		LogFormat::Json => builder.json().try_init(),
	};

	match installed {
		Ok(()) => {
			tracing::debug!(level = %settings.level, format = %settings.format, "logging initialized");
			true
		}
		Err(_) => false,
	}
}
