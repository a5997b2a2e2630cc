//! Tests for the cached serializer wrapper and class-level defaults

use restcast_serializers::{
	FieldSpec, Filter, Fixup, SerializeOptions, Serializer, SerializerError, SerializerMeta, Source,
	flatten,
};
use restcast_test::fixtures::*;
use restcast_test::{Author, Book, init_test_logging};
use restcast_orm::FieldValue;
use rstest::*;
use serde_json::{Map, Value, json};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

struct BookSummaryMeta;

impl SerializerMeta for BookSummaryMeta {
	fn fields() -> Option<FieldSpec> {
		Some(FieldSpec::new().field("id").field("title"))
	}

	fn include() -> Option<FieldSpec> {
		Some(FieldSpec::new().field("price"))
	}
}

struct AuthorEnvelopeMeta;

impl SerializerMeta for AuthorEnvelopeMeta {
	fn fields() -> Option<FieldSpec> {
		Some(
			FieldSpec::new()
				.field("id")
				.computed("profile", |record| {
					Ok(json!({"label": record.display(), "kind": record.meta().model_name()}))
				}),
		)
	}

	fn fixup() -> Option<Fixup> {
		Some(flatten("profile"))
	}
}

struct EvenOnlyMeta;

impl SerializerMeta for EvenOnlyMeta {
	fn fields() -> Option<FieldSpec> {
		Some(FieldSpec::from(["id"]))
	}

	fn filter() -> Option<Filter> {
		Some(Filter::records(|record| {
			Ok(matches!(record.pk(), FieldValue::Int(n) if n % 2 == 0))
		}))
	}
}

#[rstest]
fn test_data_is_computed_once(book: Book) {
	init_test_logging();
	let calls = Arc::new(AtomicUsize::new(0));
	let counter = Arc::clone(&calls);
	let options = SerializeOptions::new().with_fields(FieldSpec::new().field("id").computed(
		"calls",
		move |_| Ok(json!(counter.fetch_add(1, Ordering::SeqCst) + 1)),
	));

	let serializer: Serializer = Serializer::new(Source::record(&book), options).unwrap();
	let first = serializer.data().unwrap();
	let second = serializer.data().unwrap();

	assert!(std::ptr::eq(first, second));
	assert_eq!(*first, json!({"id": 1, "calls": 1}));
	assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[rstest]
fn test_meta_defaults_apply_without_overrides(book: Book) {
	let serializer =
		Serializer::<BookSummaryMeta>::new(Source::record(&book), SerializeOptions::new()).unwrap();
	assert_eq!(
		*serializer.data().unwrap(),
		json!({"id": 1, "title": "Notes on the Analytical Engine", "price": "19.99"})
	);
}

#[rstest]
fn test_overrides_take_precedence_over_meta(book: Book) {
	let options = SerializeOptions::new().with_fields(["published"]);
	let serializer = Serializer::<BookSummaryMeta>::new(Source::record(&book), options).unwrap();
	assert_eq!(
		*serializer.data().unwrap(),
		json!({"published": "1843-09-01", "price": "19.99"})
	);
}

#[rstest]
#[case::empty_fields(SerializeOptions::new().with_fields(FieldSpec::new()))]
#[case::empty_include(SerializeOptions::new().with_include(FieldSpec::new()))]
#[case::empty_exclude(SerializeOptions::new().with_exclude(Vec::<String>::new()))]
fn test_empty_overrides_fall_back_to_meta(book: Book, #[case] options: SerializeOptions) {
	let serializer = Serializer::<BookSummaryMeta>::new(Source::record(&book), options).unwrap();

	assert_eq!(serializer.options().fields.as_ref().map(FieldSpec::len), Some(2));
	assert_eq!(serializer.options().include.as_ref().map(FieldSpec::len), Some(1));
	assert_eq!(
		*serializer.data().unwrap(),
		json!({"id": 1, "title": "Notes on the Analytical Engine", "price": "19.99"})
	);
}

#[rstest]
fn test_meta_fixup_runs_on_every_record(author: Author) {
	let other = Author {
		id: 2,
		name: "Charles Babbage".to_string(),
		..author.clone()
	};
	let authors = [author, other];
	let serializer =
		Serializer::<AuthorEnvelopeMeta>::new(Source::records(&authors), SerializeOptions::new())
			.unwrap();

	assert_eq!(
		serializer.into_data().unwrap(),
		json!([
			{"id": 1, "label": "Ada Lovelace", "kind": "Author"},
			{"id": 2, "label": "Charles Babbage", "kind": "Author"},
		])
	);
}

#[rstest]
fn test_handle_fixup_without_configured_hook_is_identity(book: Book) {
	let serializer: Serializer =
		Serializer::new(Source::record(&book), SerializeOptions::new()).unwrap();
	let mut data = Map::new();
	data.insert("kept".to_string(), json!(true));

	let out = serializer.handle_fixup().apply(&book, data.clone()).unwrap();
	assert_eq!(out, data);
}

#[rstest]
fn test_handle_fixup_delegates_to_configured_hook(author: Author) {
	let serializer =
		Serializer::<AuthorEnvelopeMeta>::new(Source::record(&author), SerializeOptions::new())
			.unwrap();
	let mut data = Map::new();
	data.insert("profile".to_string(), json!({"label": "x"}));

	let out = serializer.handle_fixup().apply(&author, data).unwrap();
	assert_eq!(Value::Object(out), json!({"label": "x"}));
}

#[rstest]
fn test_meta_filter_applies_to_collections(books: Vec<Book>) {
	let serializer =
		Serializer::<EvenOnlyMeta>::new(Source::records(&books), SerializeOptions::new()).unwrap();
	assert_eq!(serializer.into_data().unwrap(), json!([{"id": 2}, {"id": 4}]));
}

#[rstest]
#[case::empty_key(SerializeOptions::new().with_fields([""]))]
#[case::nested_empty_key(SerializeOptions::new().with_fields(
	FieldSpec::new().nested("author", SerializeOptions::new().with_include([""])),
))]
fn test_malformed_options_fail_at_construction(book: Book, #[case] options: SerializeOptions) {
	let result = Serializer::<BookSummaryMeta>::new(Source::record(&book), options);
	assert!(matches!(result, Err(SerializerError::Configuration(_))));
}

#[rstest]
fn test_failed_computation_consumes_the_source(book: Book) {
	let options = SerializeOptions::new().with_fields(
		FieldSpec::new().computed("broken", |_| Err(SerializerError::hook("no value"))),
	);
	let serializer: Serializer = Serializer::new(Source::record(&book), options).unwrap();

	let first = serializer.data().unwrap_err();
	assert_eq!(first.to_string(), "no value");

	let retry = serializer.data().unwrap_err();
	assert!(matches!(retry, SerializerError::SourceConsumed));
	assert_eq!(retry.to_string(), "serializer source was already consumed");

	let err = serializer.into_stream().err();
	assert!(matches!(err, Some(SerializerError::SourceConsumed)));
}

#[rstest]
fn test_into_stream_yields_members(books: Vec<Book>) {
	let options = SerializeOptions::new().with_fields(["title"]);
	let serializer: Serializer = Serializer::new(Source::records(&books), options).unwrap();

	let titles: Vec<Value> = serializer
		.into_stream()
		.unwrap()
		.map(|item| item.unwrap()["title"].clone())
		.collect();
	assert_eq!(titles, ["Alpha", "Beta", "Gamma", "Delta", "Epsilon"]);
}

#[rstest]
fn test_into_stream_reuses_cached_data(books: Vec<Book>) {
	let serializer =
		Serializer::<EvenOnlyMeta>::new(Source::records(&books), SerializeOptions::new()).unwrap();
	let cached = serializer.data().unwrap().clone();

	let streamed: Vec<Value> = serializer
		.into_stream()
		.unwrap()
		.collect::<Result<_, _>>()
		.unwrap();
	assert_eq!(Value::Array(streamed), cached);
}

#[rstest]
fn test_into_data_on_scalar_source() {
	let serializer: Serializer =
		Serializer::new(Source::scalar("ready"), SerializeOptions::new()).unwrap();
	assert_eq!(serializer.into_data().unwrap(), json!("ready"));
}
