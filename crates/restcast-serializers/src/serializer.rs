//! The declarative serializer wrapper

use crate::engine::{serialize, serialize_stream};
use crate::error::{Result, SerializerError};
use crate::meta::{DefaultMeta, SerializerMeta};
use crate::options::{Fixup, SerializeOptions};
use crate::source::Source;
use once_cell::unsync::OnceCell;
use serde_json::Value;
use std::cell::Cell;
use std::marker::PhantomData;
use tracing::debug;

/// A source bound to its serialization options
///
/// The output is computed on the first call to [`Serializer::data`] and
/// cached; later calls return the same value without touching the source
/// again. The cache is not synchronized, so a `Serializer` cannot be shared
/// between threads.
///
/// Options left unset or empty fall back to the defaults of `M`.
///
/// # Examples
///
/// ```
/// use restcast_serializers::{SerializeOptions, Serializer, Source};
/// use serde_json::json;
///
/// let serializer: Serializer = Serializer::new(Source::scalar(42), SerializeOptions::new()).unwrap();
/// let first = serializer.data().unwrap();
/// let second = serializer.data().unwrap();
///
/// assert_eq!(*first, json!(42));
/// assert!(std::ptr::eq(first, second));
/// ```
pub struct Serializer<'a, M: SerializerMeta = DefaultMeta> {
	source: Cell<Option<Source<'a>>>,
	options: SerializeOptions,
	data: OnceCell<Value>,
	_meta: PhantomData<M>,
}

impl<'a, M: SerializerMeta> Serializer<'a, M> {
	/// Bind `source` to `options`
	///
	/// Fails with [`SerializerError::Configuration`] when the resulting
	/// field specifications are malformed.
	pub fn new(source: impl Into<Source<'a>>, options: SerializeOptions) -> Result<Self> {
		let options = Self::resolve(options);
		options.validate()?;
		Ok(Self {
			source: Cell::new(Some(source.into())),
			options,
			data: OnceCell::new(),
			_meta: PhantomData,
		})
	}

	fn resolve(options: SerializeOptions) -> SerializeOptions {
		SerializeOptions {
			fields: options.fields.filter(|f| !f.is_empty()).or_else(M::fields),
			include: options.include.filter(|i| !i.is_empty()).or_else(M::include),
			exclude: options.exclude.filter(|e| !e.is_empty()).or_else(M::exclude),
			fixup: options.fixup.or_else(M::fixup),
			request: options.request,
			media_url: options.media_url,
			filter: options.filter.or_else(M::filter),
		}
	}

	/// Options in effect, after falling back to the defaults
	pub fn options(&self) -> &SerializeOptions {
		&self.options
	}

	/// The serialized output, computed once
	///
	/// The source is consumed by the first call. If that call fails, later
	/// calls fail with [`SerializerError::SourceConsumed`].
	pub fn data(&self) -> Result<&Value> {
		self.data.get_or_try_init(|| {
			let source = self.take_source()?;
			debug!(?source, "computing serializer data");
			serialize(source, &self.wired_options())
		})
	}

	/// Take the output, computing it if needed
	pub fn into_data(self) -> Result<Value> {
		self.data()?;
		self.data
			.into_inner()
			.ok_or(SerializerError::SourceConsumed)
	}

	/// Serialize a collection source element by element
	///
	/// Nothing is cached. If the output was already computed, its elements
	/// are yielded instead.
	pub fn into_stream(self) -> Result<Box<dyn Iterator<Item = Result<Value>> + 'a>> {
		let options = self.wired_options();
		let source = self.source.take();
		if let Some(cached) = self.data.into_inner() {
			let items: Box<dyn Iterator<Item = Result<Value>> + 'a> = match cached {
				Value::Array(items) => Box::new(items.into_iter().map(Ok)),
				other => Box::new(std::iter::once(Ok(other))),
			};
			return Ok(items);
		}
		let source = source.ok_or(SerializerError::SourceConsumed)?;
		Ok(serialize_stream(source, options))
	}

	/// Run the configured fixup, or return the data unchanged
	///
	/// Every serialized record goes through this hook.
	pub fn handle_fixup(&self) -> Fixup {
		let configured = self.options.fixup.clone();
		Fixup::new(move |record, data| match &configured {
			Some(fixup) => fixup.apply(record, data),
			None => Ok(data),
		})
	}

	fn wired_options(&self) -> SerializeOptions {
		SerializeOptions {
			fixup: Some(self.handle_fixup()),
			..self.options.clone()
		}
	}

	fn take_source(&self) -> Result<Source<'a>> {
		self.source.take().ok_or(SerializerError::SourceConsumed)
	}
}
