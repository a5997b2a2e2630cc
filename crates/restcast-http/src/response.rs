//! JSON response envelopes
//!
//! Successful payloads are wrapped as `{"data": ...}`; list payloads may carry
//! page information next to `data`. Errors use one envelope for every status:
//!
//! ```json
//! {"errors": {"detail": [{"message": "Resource not found"}]}}
//! ```

use crate::encoders::StreamingJsonEncoder;
use crate::error::{HttpError, Result};
use http::header::{ALLOW, CONTENT_TYPE, HeaderMap, HeaderValue};
use http::{Method, StatusCode};
use serde::Serialize;
use serde_json::{Map, Value, json};

const APPLICATION_JSON: &str = "application/json";

/// Pagination details attached to list responses
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageInfo {
	/// Current page number, starting at 1
	pub page: u64,
	/// Total number of objects across all pages
	pub count: u64,
	/// Number of pages
	pub pages: u64,
	pub has_next_page: bool,
	pub has_previous_page: bool,
}

impl PageInfo {
	/// Page info for `page` of a result set of `count` objects
	///
	/// An empty result set still has one (empty) page.
	///
	/// # Examples
	///
	/// ```
	/// use restcast_http::PageInfo;
	///
	/// let info = PageInfo::new(2, 45, 20);
	/// assert_eq!(info.pages, 3);
	/// assert!(info.has_next_page);
	/// assert!(info.has_previous_page);
	/// ```
	pub fn new(page: u64, count: u64, page_size: u64) -> Self {
		let page_size = page_size.max(1);
		let pages = count.div_ceil(page_size).max(1);
		Self {
			page,
			count,
			pages,
			has_next_page: page < pages,
			has_previous_page: page > 1,
		}
	}
}

/// A JSON response ready to hand to the transport
#[derive(Debug, Clone)]
pub struct ApiResponse {
	pub status: StatusCode,
	pub headers: HeaderMap,
	pub body: Option<Value>,
}

impl ApiResponse {
	/// Create a response with the given status and JSON body
	///
	/// # Examples
	///
	/// ```
	/// use restcast_http::ApiResponse;
	/// use http::StatusCode;
	/// use serde_json::json;
	///
	/// let response = ApiResponse::json(StatusCode::ACCEPTED, json!({"queued": true}));
	/// assert_eq!(response.status, StatusCode::ACCEPTED);
	/// assert_eq!(response.headers["content-type"], "application/json");
	/// ```
	pub fn json(status: StatusCode, body: Value) -> Self {
		let mut headers = HeaderMap::new();
		headers.insert(CONTENT_TYPE, HeaderValue::from_static(APPLICATION_JSON));
		Self {
			status,
			headers,
			body: Some(body),
		}
	}

	/// HTTP 200 OK
	pub fn ok(body: Value) -> Self {
		Self::json(StatusCode::OK, body)
	}

	/// HTTP 201 Created
	pub fn created(body: Value) -> Self {
		Self::json(StatusCode::CREATED, body)
	}

	/// HTTP 204 No Content, without a body
	pub fn no_content() -> Self {
		Self {
			status: StatusCode::NO_CONTENT,
			headers: HeaderMap::new(),
			body: None,
		}
	}

	/// Error response with the standard envelope
	///
	/// A missing or plain-text reason is wrapped into the error envelope; any
	/// other JSON value is sent as the body unchanged.
	///
	/// # Examples
	///
	/// ```
	/// use restcast_http::ApiResponse;
	/// use http::StatusCode;
	/// use serde_json::json;
	///
	/// let response = ApiResponse::error(StatusCode::NOT_FOUND, "Resource not found");
	/// assert_eq!(
	///     response.body,
	///     Some(json!({"errors": {"detail": [{"message": "Resource not found"}]}}))
	/// );
	///
	/// let custom = ApiResponse::error(StatusCode::BAD_REQUEST, json!({"errors": {"title": ["required"]}}));
	/// assert_eq!(custom.body, Some(json!({"errors": {"title": ["required"]}})));
	/// ```
	pub fn error(status: StatusCode, reason: impl Into<Value>) -> Self {
		let body = match reason.into() {
			message @ (Value::Null | Value::String(_)) => error_envelope(message),
			structured => structured,
		};
		Self::json(status, body)
	}

	/// HTTP 400 Bad Request
	pub fn bad_request(reason: impl Into<Value>) -> Self {
		Self::error(StatusCode::BAD_REQUEST, reason)
	}

	/// HTTP 401 Unauthorized
	pub fn unauthorized(reason: impl Into<Value>) -> Self {
		Self::error(StatusCode::UNAUTHORIZED, reason)
	}

	/// HTTP 403 Forbidden
	pub fn forbidden(reason: impl Into<Value>) -> Self {
		Self::error(StatusCode::FORBIDDEN, reason)
	}

	/// HTTP 404 Not Found
	pub fn not_found(reason: impl Into<Value>) -> Self {
		Self::error(StatusCode::NOT_FOUND, reason)
	}

	/// HTTP 409 Conflict
	pub fn conflict(reason: impl Into<Value>) -> Self {
		Self::error(StatusCode::CONFLICT, reason)
	}

	/// HTTP 500 Internal Server Error
	pub fn internal_server_error(reason: impl Into<Value>) -> Self {
		Self::error(StatusCode::INTERNAL_SERVER_ERROR, reason)
	}

	/// HTTP 405 Method Not Allowed, listing the permitted methods in `Allow`
	///
	/// # Examples
	///
	/// ```
	/// use restcast_http::ApiResponse;
	/// use http::Method;
	///
	/// let response = ApiResponse::method_not_allowed(&Method::DELETE, &[Method::GET, Method::POST]).unwrap();
	/// assert_eq!(response.headers["allow"], "GET, POST");
	/// assert_eq!(
	///     response.body.unwrap()["errors"]["detail"][0]["message"],
	///     "Method \"DELETE\" not allowed"
	/// );
	/// ```
	pub fn method_not_allowed(method: &Method, permitted: &[Method]) -> Result<Self> {
		let message = format!("Method \"{}\" not allowed", method);
		let mut response = Self::json(
			StatusCode::METHOD_NOT_ALLOWED,
			error_envelope(Value::String(message)),
		);
		let allow = permitted
			.iter()
			.map(Method::as_str)
			.collect::<Vec<_>>()
			.join(", ");
		let allow =
			HeaderValue::from_str(&allow).map_err(|e| HttpError::InvalidHeader(e.to_string()))?;
		response.headers.insert(ALLOW, allow);
		Ok(response)
	}

	/// Attach a debugging traceback under `meta.traceback`
	///
	/// Only object bodies get one. The traceback lists the error followed by
	/// its chain of sources.
	pub fn with_traceback(mut self, error: &(dyn std::error::Error + 'static)) -> Self {
		if let Some(Value::Object(body)) = self.body.as_mut() {
			let mut lines = vec![error.to_string()];
			let mut source = error.source();
			while let Some(cause) = source {
				lines.push(format!("Caused by: {}", cause));
				source = cause.source();
			}
			body.insert("meta".to_string(), json!({ "traceback": lines.join("\n") }));
		}
		self
	}

	/// Add or replace a header
	pub fn with_header(mut self, name: http::header::HeaderName, value: &str) -> Result<Self> {
		let value =
			HeaderValue::from_str(value).map_err(|e| HttpError::InvalidHeader(e.to_string()))?;
		self.headers.insert(name, value);
		Ok(self)
	}

	/// Encode the body; empty for bodiless responses
	pub fn render(&self, encoder: &StreamingJsonEncoder) -> Result<Vec<u8>> {
		match &self.body {
			Some(body) => Ok(encoder.encode(body)?.into_bytes()),
			None => Ok(Vec::new()),
		}
	}
}

fn error_envelope(message: Value) -> Value {
	json!({
		"errors": {
			"detail": [{ "message": message }],
		},
	})
}

/// `{"data": data}`
pub fn data_envelope(data: Value) -> Value {
	json!({ "data": data })
}

/// `{"data": data}` followed by the page info fields, when paginated
///
/// # Examples
///
/// ```
/// use restcast_http::{PageInfo, response::list_envelope};
/// use serde_json::json;
///
/// let body = list_envelope(json!([1, 2]), Some(&PageInfo::new(1, 2, 10)));
/// assert_eq!(
///     body,
///     json!({
///         "data": [1, 2],
///         "page": 1,
///         "count": 2,
///         "pages": 1,
///         "has_next_page": false,
///         "has_previous_page": false,
///     })
/// );
/// ```
pub fn list_envelope(data: Value, page: Option<&PageInfo>) -> Value {
	let mut body = Map::new();
	body.insert("data".to_string(), data);
	if let Some(page) = page {
		body.insert("page".to_string(), page.page.into());
		body.insert("count".to_string(), page.count.into());
		body.insert("pages".to_string(), page.pages.into());
		body.insert("has_next_page".to_string(), page.has_next_page.into());
		body.insert("has_previous_page".to_string(), page.has_previous_page.into());
	}
	Value::Object(body)
}
