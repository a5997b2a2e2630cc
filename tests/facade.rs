//! End-to-end tests through the facade crate

use restcast::prelude::*;
use restcast_test::fixtures::*;
use restcast_test::{BOOK, Book, Person, init_test_logging};
use rstest::*;
use serde_json::json;

struct BookCardMeta;

impl SerializerMeta for BookCardMeta {
	fn fields() -> Option<FieldSpec> {
		Some(
			FieldSpec::new()
				.field("id")
				.field("title")
				.nested("author", SerializeOptions::new().with_fields(["name"]))
				.field("tags"),
		)
	}

	fn fixup() -> Option<restcast::Fixup> {
		Some(flatten("author"))
	}
}

#[rstest]
fn test_endpoint_with_meta_and_fixup(book: Book) {
	init_test_logging();
	let endpoint = GenericEndpoint::new("BookCards")
		.with_model(&BOOK)
		.with_meta::<BookCardMeta>();

	let response = endpoint.detail_response(&book).unwrap();

	assert_eq!(
		response.body,
		Some(json!({
			"data": {
				"id": 1,
				"title": "Notes on the Analytical Engine",
				"name": "Ada Lovelace",
				"tags": [3, 1],
			},
		}))
	);
}

#[rstest]
fn test_person_coercions(person: Person) {
	let data = serialize(
		Source::record(&person),
		&SerializeOptions::new()
			.with_request(RequestContext::new("http", "localhost:8000"))
			.with_exclude(["dob", "profile"]),
	)
	.unwrap();

	assert_eq!(
		data,
		json!({
			"id": 1,
			"name": "Grace Hopper",
			"photo": "http://localhost:8000/media/photos/grace.jpg",
			"home": {"type": "Point", "coordinates": [-73.9857, 40.7484]},
		})
	);
}

#[rstest]
fn test_settings_drive_rendering(books: Vec<Book>) {
	let settings = ApiSettings::default().with_json_pretty(false).with_streaming(true);
	let endpoint = GenericEndpoint::new("Books")
		.with_fields(["title"])
		.with_settings(settings);

	let mut out = Vec::new();
	endpoint
		.write_list(Source::records(&books[3..]), Some(&PageInfo::new(2, 5, 3)), &mut out)
		.unwrap();

	assert_eq!(
		String::from_utf8(out).unwrap(),
		r#"{"data":[{"title":"Delta"},{"title":"Epsilon"}],"page":2,"count":5,"pages":2,"has_next_page":false,"has_previous_page":true}"#
	);
}
