//! Integration tests for generic endpoints

use http::StatusCode;
use restcast_conf::ApiSettings;
use restcast_http::{PageInfo, RequestContext};
use restcast_orm::FieldValue;
use restcast_serializers::{FieldSpec, SerializeOptions, SerializerError, SerializerMeta, Source};
use restcast_test::fixtures::*;
use restcast_test::{BOOK, Book};
use restcast_views::{EndpointError, GenericEndpoint, SerializingEndpoint};
use rstest::*;
use serde_json::{Value, json};

struct TitleOnly;

impl SerializerMeta for TitleOnly {
	fn fields() -> Option<FieldSpec> {
		Some(FieldSpec::from(["title"]))
	}
}

#[fixture]
fn endpoint() -> GenericEndpoint<'static> {
	GenericEndpoint::new("BookEndpoint")
		.with_model(&BOOK)
		.with_fields(["id", "title"])
}

#[rstest]
fn test_list_response_with_page_info(endpoint: GenericEndpoint<'static>, books: Vec<Book>) {
	let page = PageInfo::new(1, 5, 2);
	let response = endpoint
		.list_response(Source::records(&books[..2]), Some(&page))
		.unwrap();

	assert_eq!(response.status, StatusCode::OK);
	assert_eq!(
		response.body,
		Some(json!({
			"data": [{"id": 1, "title": "Alpha"}, {"id": 2, "title": "Beta"}],
			"page": 1,
			"count": 5,
			"pages": 3,
			"has_next_page": true,
			"has_previous_page": false,
		}))
	);
}

#[rstest]
fn test_detail_and_created_responses(endpoint: GenericEndpoint<'static>, book: Book) {
	let detail = endpoint.detail_response(&book).unwrap();
	let created = endpoint.created_response(&book).unwrap();
	let expected = json!({"data": {"id": 1, "title": "Notes on the Analytical Engine"}});

	assert_eq!(detail.status, StatusCode::OK);
	assert_eq!(detail.body, Some(expected.clone()));
	assert_eq!(created.status, StatusCode::CREATED);
	assert_eq!(created.body, Some(expected));
}

#[rstest]
#[case::no_override(SerializeOptions::new(), json!({"id": 1, "title": "Notes on the Analytical Engine"}))]
#[case::empty_override(
	SerializeOptions::new().with_fields(FieldSpec::new()),
	json!({"id": 1, "title": "Notes on the Analytical Engine"})
)]
#[case::explicit_override(SerializeOptions::new().with_fields(["price"]), json!({"price": "19.99"}))]
fn test_endpoint_fields_fill_missing_overrides(
	endpoint: GenericEndpoint<'static>,
	book: Book,
	#[case] overrides: SerializeOptions,
	#[case] expected: Value,
) {
	let data = endpoint.serialize(Source::record(&book), overrides).unwrap();
	assert_eq!(data, expected);
}

#[rstest]
fn test_query_overrides_apply_to_responses(endpoint: GenericEndpoint<'static>, book: Book) {
	let endpoint = endpoint.with_query("fields=title,published&exclude=title").unwrap();
	let response = endpoint.detail_response(&book).unwrap();
	assert_eq!(response.body, Some(json!({"data": {"published": "1843-09-01"}})));
}

#[rstest]
fn test_meta_defaults_serve_without_model(book: Book) {
	let endpoint = GenericEndpoint::new("Titles").with_meta::<TitleOnly>();
	let response = endpoint.detail_response(&book).unwrap();
	assert_eq!(
		response.body,
		Some(json!({"data": {"title": "Notes on the Analytical Engine"}}))
	);
}

#[rstest]
fn test_model_alone_serializes_local_fields(book: Book) {
	let endpoint = GenericEndpoint::new("Books").with_model(&BOOK);
	let data = endpoint
		.serialize(Source::record(&book), SerializeOptions::new())
		.unwrap();
	assert_eq!(data.as_object().map(|map| map.len()), Some(7));
}

#[rstest]
fn test_unconfigured_endpoint_is_rejected(book: Book) {
	let endpoint = GenericEndpoint::new("Broken");
	let err = endpoint.detail_response(&book).unwrap_err();

	assert!(matches!(err, EndpointError::ImproperlyConfigured(_)));
	assert_eq!(
		err.to_string(),
		r#"Improperly configured: Broken must either define "model" or "fields""#
	);

	let response = endpoint.error_response(&err);
	assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
	assert_eq!(
		response.body,
		Some(json!({"errors": {"detail": [{"message": null}]}}))
	);
}

#[rstest]
fn test_request_makes_file_urls_absolute(endpoint: GenericEndpoint<'static>, book: Book) {
	let endpoint = endpoint
		.with_fields(["cover"])
		.with_request(RequestContext::new("https", "api.example.com").with_path("/books/1/"));
	let response = endpoint.detail_response(&book).unwrap();
	assert_eq!(
		response.body,
		Some(json!({"data": {"cover": "https://api.example.com/media/covers/notes.png"}}))
	);
}

#[rstest]
fn test_media_url_setting_serves_stored_names(endpoint: GenericEndpoint<'static>, book: Book) {
	let endpoint = endpoint
		.with_fields(["cover"])
		.with_settings(ApiSettings::default().with_media_url("/uploads/"));
	let response = endpoint.detail_response(&book).unwrap();
	assert_eq!(
		response.body,
		Some(json!({"data": {"cover": "/uploads/covers/notes.png"}}))
	);

	let endpoint = endpoint
		.with_request(RequestContext::new("https", "api.example.com"))
		.with_settings(ApiSettings::default().with_media_url("https://cdn.example.com/files/"));
	let response = endpoint.detail_response(&book).unwrap();
	assert_eq!(
		response.body,
		Some(json!({"data": {"cover": "https://cdn.example.com/files/covers/notes.png"}}))
	);
}

#[rstest]
#[case::buffered(false)]
#[case::streamed(true)]
fn test_write_list_produces_list_document(
	endpoint: GenericEndpoint<'static>,
	books: Vec<Book>,
	#[case] streaming: bool,
) {
	let endpoint = endpoint.with_settings(ApiSettings::default().with_streaming(streaming));
	let page = PageInfo::new(1, 2, 2);

	let mut out = Vec::new();
	endpoint
		.write_list(Source::records(&books[..2]), Some(&page), &mut out)
		.unwrap();

	assert_eq!(
		String::from_utf8(out).unwrap(),
		r#"{"data":[{"id":1,"title":"Alpha"},{"id":2,"title":"Beta"}],"page":1,"count":2,"pages":1,"has_next_page":false,"has_previous_page":false}"#
	);
}

#[rstest]
fn test_write_list_failure_depends_on_streaming(
	endpoint: GenericEndpoint<'static>,
	books: Vec<Book>,
) {
	let endpoint = endpoint.with_overrides(SerializeOptions::new().with_fields(
		FieldSpec::new().field("id").computed("check", |record| match record.pk() {
			FieldValue::Int(2) => Err(SerializerError::hook("record 2 is broken")),
			_ => Ok(json!("ok")),
		}),
	));

	let mut out = Vec::new();
	let err = endpoint
		.write_list(Source::records(&books), None, &mut out)
		.unwrap_err();
	assert!(matches!(err, EndpointError::Serializer(_)));
	assert!(out.is_empty());

	let endpoint = endpoint.with_settings(ApiSettings::default().with_streaming(true));
	let err = endpoint
		.write_list(Source::records(&books), None, &mut out)
		.unwrap_err();
	assert!(matches!(err, EndpointError::Http(_)));
	assert!(String::from_utf8(out).unwrap().starts_with(r#"{"data":[{"id":1,"check":"ok"}"#));
}

#[rstest]
fn test_stream_list_matches_buffered_list(endpoint: GenericEndpoint<'static>, books: Vec<Book>) {
	let page = PageInfo::new(2, 12, 5);
	let buffered = endpoint
		.list_response(Source::records(&books), Some(&page))
		.unwrap();

	let mut out = Vec::new();
	endpoint
		.stream_list(Source::records(&books), Some(&page), &mut out)
		.unwrap();
	let streamed: Value = serde_json::from_slice(&out).unwrap();

	assert_eq!(Some(streamed), buffered.body);
}

#[rstest]
fn test_stream_list_of_nothing(endpoint: GenericEndpoint<'static>) {
	let mut out = Vec::new();
	endpoint
		.stream_list(Source::records(&Vec::<Book>::new()), None, &mut out)
		.unwrap();
	assert_eq!(String::from_utf8(out).unwrap(), r#"{"data":[]}"#);
}

#[rstest]
fn test_stream_list_stops_at_failing_member(endpoint: GenericEndpoint<'static>, books: Vec<Book>) {
	let endpoint = endpoint.with_overrides(SerializeOptions::new().with_fields(
		FieldSpec::new().field("id").computed("check", |record| match record.pk() {
			FieldValue::Int(3) => Err(SerializerError::hook("record 3 is broken")),
			_ => Ok(json!("ok")),
		}),
	));

	let mut out = Vec::new();
	let err = endpoint
		.stream_list(Source::records(&books), None, &mut out)
		.unwrap_err();

	assert!(matches!(err, EndpointError::Http(_)));
	assert!(err.to_string().contains("record 3 is broken"));
	let written = String::from_utf8(out).unwrap();
	assert!(written.starts_with(r#"{"data":[{"id":1,"check":"ok"},{"id":2,"check":"ok"}"#));
}

#[rstest]
fn test_debug_error_response_carries_traceback(book: Book) {
	let endpoint = GenericEndpoint::new("Books")
		.with_model(&BOOK)
		.with_fields(["isbn"])
		.with_settings(ApiSettings::default().with_debug(true));
	let err = endpoint.detail_response(&book).unwrap_err();
	let response = endpoint.error_response(&err);

	assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
	let body = response.body.unwrap();
	assert_eq!(
		body["errors"]["detail"][0]["message"],
		"'Book' object has no attribute 'isbn'"
	);
	assert!(
		body["meta"]["traceback"]
			.as_str()
			.is_some_and(|traceback| traceback.starts_with("'Book' object has no attribute 'isbn'"))
	);
}

#[rstest]
fn test_invalid_query_is_a_client_error(endpoint: GenericEndpoint<'static>) {
	let err = endpoint.clone().with_query("fields=title,not%20a%20field").unwrap_err();
	let response = endpoint.error_response(&err);

	assert_eq!(response.status, StatusCode::BAD_REQUEST);
	assert_eq!(
		response.body,
		Some(json!({"errors": {"detail": [{"message": "'not a field' is not a valid field name in 'fields'"}]}}))
	);
}

#[rstest]
#[case(false, r#"{"data":{"id":1}}"#)]
#[case(true, "{\n  \"data\": {\n    \"id\": 1\n  }\n}")]
fn test_render_follows_pretty_setting(
	endpoint: GenericEndpoint<'static>,
	book: Book,
	#[case] pretty: bool,
	#[case] expected: &str,
) {
	let endpoint = endpoint
		.with_fields(["id"])
		.with_settings(ApiSettings::default().with_json_pretty(pretty));
	let response = endpoint.detail_response(&book).unwrap();
	assert_eq!(endpoint.render(&response).unwrap(), expected.as_bytes());
}
