//! The part of an inbound request the serializer needs

use crate::error::Result;
use url::Url;

/// Scheme, host and path of the request being answered
///
/// Only used to turn relative file URLs into absolute ones.
///
/// # Examples
///
/// ```
/// use restcast_http::RequestContext;
///
/// let request = RequestContext::new("https", "example.com").with_path("/api/users");
///
/// assert_eq!(request.build_absolute_uri(None), "https://example.com/api/users");
/// assert_eq!(
///     request.build_absolute_uri(Some("/media/a.png")),
///     "https://example.com/media/a.png"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
	scheme: String,
	host: String,
	path: String,
}

impl RequestContext {
	pub fn new(scheme: impl Into<String>, host: impl Into<String>) -> Self {
		Self {
			scheme: scheme.into(),
			host: host.into(),
			path: "/".to_string(),
		}
	}

	/// Set the request path
	pub fn with_path(mut self, path: impl Into<String>) -> Self {
		let path = path.into();
		self.path = if path.starts_with('/') {
			path
		} else {
			format!("/{}", path)
		};
		self
	}

	/// Build a context from the full request URL
	///
	/// # Examples
	///
	/// ```
	/// use restcast_http::RequestContext;
	///
	/// let request = RequestContext::from_url("http://localhost:8000/books/?page=2").unwrap();
	/// assert_eq!(request.host(), "localhost:8000");
	/// assert_eq!(request.path(), "/books/");
	/// ```
	pub fn from_url(url: &str) -> Result<Self> {
		let parsed = Url::parse(url)?;
		let mut host = parsed.host_str().unwrap_or("localhost").to_string();
		if let Some(port) = parsed.port() {
			host = format!("{}:{}", host, port);
		}
		Ok(Self::new(parsed.scheme(), host).with_path(parsed.path()))
	}

	pub fn scheme(&self) -> &str {
		&self.scheme
	}

	pub fn host(&self) -> &str {
		&self.host
	}

	pub fn path(&self) -> &str {
		&self.path
	}

	/// Turn `location` into an absolute URI
	///
	/// With no location the request's own URI is returned. Absolute locations
	/// come back unchanged, `/`-rooted ones are joined to the scheme and host,
	/// and relative ones are resolved against the request path.
	pub fn build_absolute_uri(&self, location: Option<&str>) -> String {
		let current = format!("{}://{}{}", self.scheme, self.host, self.path);
		let Some(location) = location else {
			return current;
		};

		if Url::parse(location).is_ok_and(|u| u.has_host()) {
			return location.to_string();
		}

		match Url::parse(&current).and_then(|base| base.join(location)) {
			Ok(joined) => joined.to_string(),
			Err(error) => {
				tracing::debug!(%error, location, "falling back to plain URI concatenation");
				if location.starts_with('/') {
					format!("{}://{}{}", self.scheme, self.host, location)
				} else {
					format!("{}/{}", current.trim_end_matches('/'), location)
				}
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case(None, "https://api.test/v1/books/")]
	#[case(Some("/media/covers/1.png"), "https://api.test/media/covers/1.png")]
	#[case(Some("covers/1.png"), "https://api.test/v1/books/covers/1.png")]
	#[case(Some("https://cdn.test/a.png"), "https://cdn.test/a.png")]
	#[case(Some("//cdn.test/a.png"), "https://cdn.test/a.png")]
	fn test_build_absolute_uri(#[case] location: Option<&str>, #[case] expected: &str) {
		let request = RequestContext::new("https", "api.test").with_path("/v1/books/");
		assert_eq!(request.build_absolute_uri(location), expected);
	}

	#[rstest]
	fn test_path_is_rooted() {
		let request = RequestContext::new("http", "h").with_path("x/y");
		assert_eq!(request.path(), "/x/y");
	}

	#[rstest]
	fn test_from_url_rejects_garbage() {
		assert!(RequestContext::from_url("not a url").is_err());
	}
}
