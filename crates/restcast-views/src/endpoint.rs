//! Generic endpoints
//!
//! [`SerializingEndpoint`] supplies the serialization and response plumbing
//! shared by list, detail and create endpoints. Implementors only describe
//! what to serialize; [`GenericEndpoint`] is a ready-made implementation
//! configured with builders.

use crate::error::{EndpointError, Result};
use crate::query::overrides_from_query;
use http::StatusCode;
use restcast_conf::ApiSettings;
use restcast_http::{
	ApiResponse, HttpError, PageInfo, RequestContext, StreamingJsonEncoder, TryLazyList, data_envelope,
	list_envelope,
};
use restcast_orm::{ModelMeta, Record};
use restcast_serializers::{
	DefaultMeta, FieldSpec, SerializeOptions, Serializer, SerializerMeta, Source,
};
use serde::Serialize;
use serde_json::Value;
use std::io::Write;
use std::marker::PhantomData;
use tracing::{debug, error};

#[derive(Serialize)]
struct StreamedList<'p, L> {
	data: L,
	#[serde(flatten)]
	page: Option<&'p PageInfo>,
}

/// An endpoint that serializes records into API responses
///
/// Field lists are resolved in order: per-call overrides, then
/// [`fields`](Self::fields), then the defaults of [`Meta`](Self::Meta),
/// then the model's local fields.
pub trait SerializingEndpoint {
	/// Serializer defaults used by this endpoint
	type Meta: SerializerMeta;

	/// Name used in configuration errors
	fn name(&self) -> &str;

	/// Settings in effect
	fn settings(&self) -> &ApiSettings;

	/// Model served by this endpoint
	fn model(&self) -> Option<&ModelMeta> {
		None
	}

	/// Default field list
	fn fields(&self) -> Option<FieldSpec> {
		None
	}

	/// Current request, used to build absolute file URLs
	fn request(&self) -> Option<&RequestContext> {
		None
	}

	/// Overrides taken from the current request
	fn overrides(&self) -> SerializeOptions {
		SerializeOptions::new()
	}

	/// Fail unless a field list or a model is known
	fn check_configuration(&self) -> Result<()> {
		if self.model().is_none()
			&& self.fields().is_none()
			&& <Self::Meta as SerializerMeta>::fields().is_none()
		{
			return Err(EndpointError::ImproperlyConfigured(format!(
				"{} must either define \"model\" or \"fields\"",
				self.name()
			)));
		}
		Ok(())
	}

	/// Bind `source` to a serializer
	///
	/// Empty `fields` in `overrides` fall back to the endpoint's default. The
	/// endpoint's request and configured media URL are used unless
	/// `overrides` carries its own.
	fn serializer<'a>(
		&self,
		source: Source<'a>,
		overrides: SerializeOptions,
	) -> Result<Serializer<'a, Self::Meta>> {
		self.check_configuration()?;
		let mut options = overrides;
		if options.fields.as_ref().is_none_or(FieldSpec::is_empty) {
			options.fields = self.fields();
		}
		if options.request.is_none() {
			options.request = self.request().cloned();
		}
		if options.media_url.is_none() {
			options.media_url = Some(self.settings().media_url.clone());
		}
		Ok(Serializer::new(source, options)?)
	}

	/// Serialize `source` with the endpoint's options plus `overrides`
	fn serialize(&self, source: Source<'_>, overrides: SerializeOptions) -> Result<Value> {
		Ok(self.serializer(source, overrides)?.into_data()?)
	}

	/// `{"data": [...]}`, followed by the page info when given
	fn list_response(&self, source: Source<'_>, page: Option<&PageInfo>) -> Result<ApiResponse> {
		let data = self.serialize(source, self.overrides())?;
		debug!(endpoint = self.name(), paginated = page.is_some(), "list response");
		Ok(ApiResponse::ok(list_envelope(data, page)))
	}

	/// Write a list response to `writer`, serializing one member at a time
	///
	/// Produces the same document as [`list_response`](Self::list_response).
	/// An error while serializing a member leaves `writer` holding a
	/// truncated document.
	fn stream_list<W: Write>(
		&self,
		source: Source<'_>,
		page: Option<&PageInfo>,
		writer: W,
	) -> Result<()>
	where
		Self: Sized,
	{
		let items = self.serializer(source, self.overrides())?.into_stream()?;
		let body = StreamedList {
			data: TryLazyList::new(items),
			page,
		};
		self.encoder().encode_to_writer(writer, &body)?;
		debug!(endpoint = self.name(), "streamed list response");
		Ok(())
	}

	/// Write a list body to `writer`, streaming it when the `streaming`
	/// setting is on
	///
	/// Without streaming the whole body is built before anything is written,
	/// so a failure leaves `writer` untouched.
	fn write_list<W: Write>(
		&self,
		source: Source<'_>,
		page: Option<&PageInfo>,
		mut writer: W,
	) -> Result<()>
	where
		Self: Sized,
	{
		if self.settings().streaming {
			return self.stream_list(source, page, writer);
		}
		let body = self.render(&self.list_response(source, page)?)?;
		writer.write_all(&body).map_err(HttpError::from)?;
		Ok(())
	}

	/// `{"data": {...}}` for one record
	fn detail_response(&self, record: &dyn Record) -> Result<ApiResponse> {
		let data = self.serialize(Source::record(record), self.overrides())?;
		Ok(ApiResponse::ok(data_envelope(data)))
	}

	/// Same body as [`detail_response`](Self::detail_response), with status 201
	fn created_response(&self, record: &dyn Record) -> Result<ApiResponse> {
		let data = self.serialize(Source::record(record), self.overrides())?;
		Ok(ApiResponse::created(data_envelope(data)))
	}

	/// Turn a failure into an error response
	///
	/// Malformed queries are client errors; anything else is a server error
	/// whose message and traceback are only shown in debug mode.
	fn error_response(&self, err: &EndpointError) -> ApiResponse {
		let debug = self.settings().debug;
		let response = match err {
			EndpointError::InvalidQuery(message) => ApiResponse::bad_request(message.as_str()),
			_ => {
				error!(endpoint = self.name(), error = %err, "endpoint failed");
				if debug {
					ApiResponse::internal_server_error(err.to_string())
				} else {
					ApiResponse::internal_server_error(Value::Null)
				}
			}
		};
		if debug && response.status == StatusCode::INTERNAL_SERVER_ERROR {
			response.with_traceback(err)
		} else {
			response
		}
	}

	/// Encoder honoring the `json_pretty` setting
	fn encoder(&self) -> StreamingJsonEncoder {
		StreamingJsonEncoder::new().with_pretty(self.settings().json_pretty)
	}

	/// Encode a response body
	fn render(&self, response: &ApiResponse) -> Result<Vec<u8>> {
		Ok(response.render(&self.encoder())?)
	}
}

/// An endpoint configured with builders
///
/// # Examples
///
/// ```
/// # use restcast_orm::{Attribute, AttributeError, FieldKind, FieldMeta, FieldValue, ModelMeta, Record};
/// # use std::sync::LazyLock;
/// # static NOTE: LazyLock<ModelMeta> = LazyLock::new(|| {
/// #     ModelMeta::new("notes", "Note")
/// #         .with_field(FieldMeta::new("id", FieldKind::Auto).primary_key())
/// #         .with_field(FieldMeta::new("body", FieldKind::Text))
/// # });
/// # struct Note(i64, &'static str);
/// # impl Record for Note {
/// #     fn meta(&self) -> &ModelMeta { &NOTE }
/// #     fn pk(&self) -> FieldValue { FieldValue::Int(self.0) }
/// #     fn attribute(&self, name: &str) -> Result<Attribute<'_>, AttributeError> {
/// #         match name {
/// #             "id" => Ok(Attribute::Value(self.pk())),
/// #             "body" => Ok(Attribute::Value(self.1.into())),
/// #             _ => Err(AttributeError::missing(self.meta(), name)),
/// #         }
/// #     }
/// # }
/// use restcast_serializers::Source;
/// use restcast_views::{GenericEndpoint, SerializingEndpoint};
/// use serde_json::json;
///
/// let endpoint = GenericEndpoint::new("NoteList")
///     .with_model(&NOTE)
///     .with_query("fields=body")
///     .unwrap();
///
/// let notes = [Note(1, "first"), Note(2, "second")];
/// let response = endpoint.list_response(Source::records(&notes), None).unwrap();
///
/// assert_eq!(response.body, Some(json!({"data": [{"body": "first"}, {"body": "second"}]})));
/// ```
#[derive(Debug, Clone)]
pub struct GenericEndpoint<'m, M: SerializerMeta = DefaultMeta> {
	name: String,
	model: Option<&'m ModelMeta>,
	fields: Option<FieldSpec>,
	request: Option<RequestContext>,
	overrides: SerializeOptions,
	settings: ApiSettings,
	_meta: PhantomData<M>,
}

impl<'m> GenericEndpoint<'m> {
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			model: None,
			fields: None,
			request: None,
			overrides: SerializeOptions::new(),
			settings: ApiSettings::default(),
			_meta: PhantomData,
		}
	}
}

impl<'m, M: SerializerMeta> GenericEndpoint<'m, M> {
	/// Switch to the serializer defaults of `N`
	pub fn with_meta<N: SerializerMeta>(self) -> GenericEndpoint<'m, N> {
		GenericEndpoint {
			name: self.name,
			model: self.model,
			fields: self.fields,
			request: self.request,
			overrides: self.overrides,
			settings: self.settings,
			_meta: PhantomData,
		}
	}

	pub fn with_model(mut self, model: &'m ModelMeta) -> Self {
		self.model = Some(model);
		self
	}

	pub fn with_fields(mut self, fields: impl Into<FieldSpec>) -> Self {
		self.fields = Some(fields.into());
		self
	}

	pub fn with_request(mut self, request: RequestContext) -> Self {
		self.request = Some(request);
		self
	}

	pub fn with_settings(mut self, settings: ApiSettings) -> Self {
		self.settings = settings;
		self
	}

	pub fn with_overrides(mut self, overrides: SerializeOptions) -> Self {
		self.overrides = overrides;
		self
	}

	/// Take field overrides from a query string
	///
	/// See [`overrides_from_query`].
	pub fn with_query(self, query: &str) -> Result<Self> {
		let overrides = overrides_from_query(query)?;
		Ok(self.with_overrides(overrides))
	}
}

impl<M: SerializerMeta> SerializingEndpoint for GenericEndpoint<'_, M> {
	type Meta = M;

	fn name(&self) -> &str {
		&self.name
	}

	fn settings(&self) -> &ApiSettings {
		&self.settings
	}

	fn model(&self) -> Option<&ModelMeta> {
		self.model
	}

	fn fields(&self) -> Option<FieldSpec> {
		self.fields.clone()
	}

	fn request(&self) -> Option<&RequestContext> {
		self.request.as_ref()
	}

	fn overrides(&self) -> SerializeOptions {
		self.overrides.clone()
	}
}
