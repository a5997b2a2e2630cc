//! Stored file references

use std::fmt;

/// Default base URL of the file storage
pub const DEFAULT_MEDIA_URL: &str = "/media/";

/// Value held by a file or image field
///
/// A file reference is just the name the storage backend knows it by plus the
/// base URL the storage serves it from. An empty name means no file is set.
///
/// # Examples
///
/// ```
/// use restcast_orm::FieldFile;
///
/// let file = FieldFile::new("avatars/ada.png");
/// assert_eq!(file.url().as_deref(), Some("/media/avatars/ada.png"));
///
/// let unset = FieldFile::new("");
/// assert!(!unset.is_set());
/// assert_eq!(unset.url(), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldFile {
	name: String,
	base_url: String,
}

impl FieldFile {
	/// Create a reference served from [`DEFAULT_MEDIA_URL`]
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			base_url: DEFAULT_MEDIA_URL.to_string(),
		}
	}

	/// Serve the file from another base URL
	///
	/// # Examples
	///
	/// ```
	/// use restcast_orm::FieldFile;
	///
	/// let file = FieldFile::new("report.pdf").with_base_url("https://cdn.example.com/files");
	/// assert_eq!(file.url().as_deref(), Some("https://cdn.example.com/files/report.pdf"));
	/// ```
	pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
		self.base_url = base_url.into();
		self
	}

	/// Name of the file inside the storage
	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn base_url(&self) -> &str {
		&self.base_url
	}

	/// Whether a file is attached
	pub fn is_set(&self) -> bool {
		!self.name.is_empty()
	}

	/// URL the file is served at, relative to the site unless the base URL
	/// is absolute
	pub fn url(&self) -> Option<String> {
		if !self.is_set() {
			return None;
		}
		let base = self.base_url.trim_end_matches('/');
		let name = self.name.trim_start_matches('/');
		Some(format!("{}/{}", base, name))
	}
}

impl fmt::Display for FieldFile {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.name)
	}
}
