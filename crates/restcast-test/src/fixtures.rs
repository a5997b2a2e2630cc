//! rstest fixtures built from the sample models
//!
//! ```rust,ignore
//! use restcast_test::fixtures::*;
//! use rstest::*;
//!
//! #[rstest]
//! fn test_title(book: Book) {
//!     assert_eq!(book.title, "Notes on the Analytical Engine");
//! }
//! ```

use crate::models::{Author, Book, Job, Passport, Person, Publisher, Tag};
use chrono::NaiveDate;
use restcast_orm::{Coord, FieldFile, Geometry, RelatedSet};
use rstest::fixture;
use rust_decimal::Decimal;
use serde_json::json;

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
	NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

/// Ada Lovelace, author #1
#[fixture]
pub fn author() -> Author {
	Author {
		id: 1,
		name: "Ada Lovelace".to_string(),
		birth_date: date(1815, 12, 10),
	}
}

#[fixture]
pub fn publisher() -> Publisher {
	Publisher {
		id: 1,
		name: "Acme Press".to_string(),
		logo: FieldFile::new("logos/acme.png"),
		headquarters: Some(Geometry::point(Coord::new(-0.1276, 51.5072)).with_srid(4326)),
		settings: json!({"theme": "dark", "featured": [1, 2]}),
	}
}

/// Two tags, deliberately not in primary key order
#[fixture]
pub fn tags() -> RelatedSet<Tag> {
	RelatedSet::new(
		"Tag",
		vec![
			Tag {
				id: 3,
				name: "fiction".to_string(),
			},
			Tag {
				id: 1,
				name: "classic".to_string(),
			},
		],
	)
}

/// Book without relations, cover or tags
pub fn plain_book(id: i64, title: &str) -> Book {
	Book {
		id,
		title: title.to_string(),
		author_id: 1,
		author: None,
		publisher_id: None,
		publisher: None,
		price: Decimal::new(1000 + id, 2),
		published: date(2000, 1, id.clamp(1, 28) as u32),
		cover: None,
		tags: RelatedSet::new("Tag", Vec::new()),
	}
}

/// A fully populated book
#[fixture]
pub fn book(author: Author, publisher: Publisher, tags: RelatedSet<Tag>) -> Book {
	Book {
		author_id: author.id,
		author: Some(author),
		publisher_id: Some(publisher.id),
		publisher: Some(publisher),
		price: Decimal::new(1999, 2),
		published: date(1843, 9, 1),
		cover: Some("covers/notes.png".to_string()),
		tags,
		..plain_book(1, "Notes on the Analytical Engine")
	}
}

/// A book whose author row was deleted
#[fixture]
pub fn orphaned_book() -> Book {
	Book {
		author_id: 99,
		..plain_book(7, "Lost Works")
	}
}

/// Five books, ids 1 to 5
#[fixture]
pub fn books() -> Vec<Book> {
	["Alpha", "Beta", "Gamma", "Delta", "Epsilon"]
		.iter()
		.zip(1..)
		.map(|(title, id)| plain_book(id, title))
		.collect()
}

/// A person with three jobs and no passport
#[fixture]
pub fn person() -> Person {
	let job = |id: i64, title: &str, from: NaiveDate, to: Option<NaiveDate>| Job {
		id,
		person_id: 1,
		title: title.to_string(),
		from,
		to,
	};
	Person {
		id: 1,
		name: "Grace Hopper".to_string(),
		dob: date(1906, 12, 9),
		photo: FieldFile::new("photos/grace.jpg"),
		home: Geometry::point(Coord::new(-73.9857, 40.7484)),
		profile: json!({"languages": ["COBOL", "FLOW-MATIC"], "rank": "Rear Admiral"}),
		jobs: RelatedSet::new(
			"Job",
			vec![
				job(1, "Professor", date(1931, 1, 1), Some(date(1943, 12, 1))),
				job(2, "Programmer", date(1944, 7, 1), Some(date(1949, 6, 1))),
				job(3, "Director", date(1949, 6, 1), None),
			],
		),
		passport: None,
	}
}

/// The same person, with a passport
#[fixture]
pub fn person_with_passport(person: Person) -> Person {
	Person {
		passport: Some(Passport {
			id: 5,
			person_id: person.id,
			number: "X1234567".to_string(),
		}),
		..person
	}
}
