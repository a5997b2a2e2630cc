//! # restcast-test
//!
//! Testing utilities shared by the restcast crates.
//!
//! - **[`models`]**: sample records with their field tables
//! - **[`fixtures`]**: rstest fixtures building populated instances
//! - **[`logging`]**: one-time `tracing` setup for tests

pub mod fixtures;
pub mod logging;
pub mod models;

pub use logging::init_test_logging;
pub use models::{
	AUTHOR, Author, BOOK, Book, JOB, Job, PASSPORT, PERSON, PUBLISHER, Passport, Person, Publisher,
	TAG, Tag,
};
