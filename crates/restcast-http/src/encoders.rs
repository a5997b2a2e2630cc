//! Streaming JSON encoding
//!
//! Large result sets are handed to the encoder as iterators. [`LazyList`] and
//! [`LazyMap`] let such an iterator sit anywhere inside a serializable value
//! and be written out element by element, so the whole sequence never needs
//! to exist in memory at once.

use crate::error::{HttpError, Result};
use serde::ser::{Error as _, SerializeSeq};
use serde::{Serialize, Serializer};
use serde_json::Value;
use std::cell::RefCell;
use std::fmt::Display;
use std::io::Write;
use std::iter::Peekable;

const CONSUMED: &str = "lazy sequence was already serialized";

/// A one-shot JSON array backed by an iterator
///
/// The iterator is consumed by the first serialization; serializing the
/// same value again is an error rather than a silently empty array.
///
/// # Examples
///
/// ```
/// use restcast_http::encoders::LazyList;
///
/// let list = LazyList::new((1..=3).map(|n| n * 10));
/// assert!(!list.is_empty());
/// assert_eq!(serde_json::to_string(&list).unwrap(), "[10,20,30]");
///
/// let empty = LazyList::new(std::iter::empty::<u8>());
/// assert!(empty.is_empty());
/// assert_eq!(serde_json::to_string(&empty).unwrap(), "[]");
/// ```
pub struct LazyList<I: Iterator> {
	source: RefCell<Option<Peekable<I>>>,
}

impl<I: Iterator> LazyList<I> {
	pub fn new(source: impl IntoIterator<IntoIter = I>) -> Self {
		Self {
			source: RefCell::new(Some(source.into_iter().peekable())),
		}
	}

	/// Whether the sequence has no elements left
	///
	/// Peeks at the first element without losing it.
	pub fn is_empty(&self) -> bool {
		match self.source.borrow_mut().as_mut() {
			Some(iter) => iter.peek().is_none(),
			None => true,
		}
	}

	/// Whether the sequence has been serialized already
	pub fn is_consumed(&self) -> bool {
		self.source.borrow().is_none()
	}
}

impl<I> Serialize for LazyList<I>
where
	I: Iterator,
	I::Item: Serialize,
{
	fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
		let iter = self
			.source
			.borrow_mut()
			.take()
			.ok_or_else(|| S::Error::custom(CONSUMED))?;
		serializer.collect_seq(iter)
	}
}

/// A one-shot JSON array over fallible elements
///
/// Stops at the first `Err` and reports it as a serialization error.
pub struct TryLazyList<I: Iterator> {
	inner: LazyList<I>,
}

impl<I: Iterator> TryLazyList<I> {
	pub fn new(source: impl IntoIterator<IntoIter = I>) -> Self {
		Self {
			inner: LazyList::new(source),
		}
	}

	pub fn is_empty(&self) -> bool {
		self.inner.is_empty()
	}
}

impl<I, T, E> Serialize for TryLazyList<I>
where
	I: Iterator<Item = std::result::Result<T, E>>,
	T: Serialize,
	E: Display,
{
	fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
		let iter = self
			.inner
			.source
			.borrow_mut()
			.take()
			.ok_or_else(|| S::Error::custom(CONSUMED))?;
		let mut seq = serializer.serialize_seq(None)?;
		for item in iter {
			let item = item.map_err(S::Error::custom)?;
			seq.serialize_element(&item)?;
		}
		seq.end()
	}
}

/// A one-shot JSON object backed by an iterator of key/value pairs
///
/// # Examples
///
/// ```
/// use restcast_http::encoders::LazyMap;
///
/// let map = LazyMap::new(vec![("b", 1), ("a", 2)]);
/// assert_eq!(serde_json::to_string(&map).unwrap(), r#"{"b":1,"a":2}"#);
/// ```
pub struct LazyMap<I: Iterator> {
	source: RefCell<Option<Peekable<I>>>,
}

impl<I: Iterator> LazyMap<I> {
	pub fn new(source: impl IntoIterator<IntoIter = I>) -> Self {
		Self {
			source: RefCell::new(Some(source.into_iter().peekable())),
		}
	}

	pub fn is_empty(&self) -> bool {
		match self.source.borrow_mut().as_mut() {
			Some(iter) => iter.peek().is_none(),
			None => true,
		}
	}
}

impl<I, K, V> Serialize for LazyMap<I>
where
	I: Iterator<Item = (K, V)>,
	K: Serialize,
	V: Serialize,
{
	fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
		let iter = self
			.source
			.borrow_mut()
			.take()
			.ok_or_else(|| S::Error::custom(CONSUMED))?;
		serializer.collect_map(iter)
	}
}

/// JSON encoder used for response bodies
#[derive(Debug, Clone, Copy, Default)]
pub struct StreamingJsonEncoder {
	pretty: bool,
}

impl StreamingJsonEncoder {
	pub fn new() -> Self {
		Self::default()
	}

	/// Indent the output
	pub fn with_pretty(mut self, pretty: bool) -> Self {
		self.pretty = pretty;
		self
	}

	pub fn is_pretty(&self) -> bool {
		self.pretty
	}

	/// Encode a value to a string
	///
	/// # Examples
	///
	/// ```
	/// use restcast_http::encoders::StreamingJsonEncoder;
	/// use serde_json::json;
	///
	/// let encoder = StreamingJsonEncoder::new();
	/// assert_eq!(encoder.encode(&json!({"data": [1, 2]})).unwrap(), r#"{"data":[1,2]}"#);
	/// ```
	pub fn encode<T: Serialize + ?Sized>(&self, value: &T) -> Result<String> {
		let encoded = if self.pretty {
			serde_json::to_string_pretty(value)?
		} else {
			serde_json::to_string(value)?
		};
		Ok(encoded)
	}

	/// Encode a value straight into a writer
	pub fn encode_to_writer<W: Write, T: Serialize + ?Sized>(
		&self,
		writer: W,
		value: &T,
	) -> Result<()> {
		if self.pretty {
			serde_json::to_writer_pretty(writer, value)?;
		} else {
			serde_json::to_writer(writer, value)?;
		}
		Ok(())
	}

	/// Stream fallible elements into a writer as one JSON array
	///
	/// Each element is written as soon as it is produced. Returns the number
	/// of elements written, or the first element error. On error the writer
	/// holds a truncated array.
	///
	/// # Examples
	///
	/// ```
	/// use restcast_http::encoders::StreamingJsonEncoder;
	/// use serde_json::json;
	///
	/// let mut out = Vec::new();
	/// let rows = vec![Ok::<_, String>(json!({"id": 1})), Ok(json!({"id": 2}))];
	/// let written = StreamingJsonEncoder::new().encode_iter(&mut out, rows).unwrap();
	///
	/// assert_eq!(written, 2);
	/// assert_eq!(String::from_utf8(out).unwrap(), r#"[{"id":1},{"id":2}]"#);
	/// ```
	pub fn encode_iter<W, I, E>(&self, mut writer: W, items: I) -> Result<usize>
	where
		W: Write,
		I: IntoIterator<Item = std::result::Result<Value, E>>,
		E: Display,
	{
		let (separator, close) = if self.pretty {
			(",\n", "\n]")
		} else {
			(",", "]")
		};

		writer.write_all(b"[")?;
		let mut written = 0;
		for item in items {
			let value = item.map_err(|e| HttpError::Stream(e.to_string()))?;
			if written > 0 {
				writer.write_all(separator.as_bytes())?;
			} else if self.pretty {
				writer.write_all(b"\n")?;
			}
			self.encode_to_writer(&mut writer, &value)?;
			written += 1;
		}
		if written == 0 {
			writer.write_all(b"]")?;
		} else {
			writer.write_all(close.as_bytes())?;
		}
		tracing::trace!(written, "streamed JSON array");
		Ok(written)
	}
}
