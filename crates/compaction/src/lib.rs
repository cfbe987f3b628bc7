//! This library implements the [JSON-LD compaction algorithm](https://www.w3.org/TR/json-ld-api/#compaction-algorithms)
//! for the `jsonld` crate.
//!
//! # Usage
//!
//! The compaction algorithm is provided by the [`CompactFragment`] trait.
use jsonld_context_processing::{Options as ProcessingOptions, ProcessingStack};
use jsonld_core::{
	expanded::{index_of, is_list_object, is_value_object, list_of},
	Context, Loader, ProcessingMode, Term,
};
use jsonld_syntax::{ContainerKind, ErrorCode, Keyword};
use json_syntax::{object::Entry, Value};
use mown::Mown;

mod document;
mod iri;
mod node;
mod property;
mod value;

pub use document::*;
pub use iri::IriConfusedWithPrefix;
pub(crate) use iri::*;
use node::*;
use property::*;
use value::*;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("IRI confused with prefix")]
	IriConfusedWithPrefix,

	#[error("Invalid `@nest` value")]
	InvalidNestValue,

	#[error("Compaction to list of lists")]
	CompactionToListOfLists,

	#[error("Context processing failed: {0}")]
	ContextProcessing(jsonld_context_processing::Error),
}

impl Error {
	pub fn code(&self) -> ErrorCode {
		match self {
			Self::IriConfusedWithPrefix => ErrorCode::IriConfusedWithPrefix,
			Self::InvalidNestValue => ErrorCode::InvalidNestValue,
			Self::CompactionToListOfLists => ErrorCode::CompactionToListOfLists,
			Self::ContextProcessing(e) => e.code(),
		}
	}
}

impl From<jsonld_context_processing::Error> for Error {
	fn from(e: jsonld_context_processing::Error) -> Self {
		Self::ContextProcessing(e)
	}
}

impl From<IriConfusedWithPrefix> for Error {
	fn from(_: IriConfusedWithPrefix) -> Self {
		Self::IriConfusedWithPrefix
	}
}

pub type CompactFragmentResult = Result<Value, Error>;

/// Compaction options.
#[derive(Clone, Copy)]
pub struct Options {
	/// JSON-LD processing mode.
	pub processing_mode: ProcessingMode,

	/// Determines if IRIs are compacted relative to the provided base IRI or document location when compacting.
	pub compact_to_relative: bool,

	/// If set to `true`, arrays with just one element are replaced with that element during compaction.
	/// If set to `false`, all arrays will remain arrays even if they have just one element.
	pub compact_arrays: bool,

	/// If set to `true`, properties are processed by lexical order.
	/// If `false`, order is not considered in processing.
	pub ordered: bool,
}

impl Options {
	pub fn unordered(self) -> Self {
		Self {
			ordered: false,
			..self
		}
	}
}

impl From<Options> for ProcessingOptions {
	fn from(options: Options) -> ProcessingOptions {
		ProcessingOptions {
			processing_mode: options.processing_mode,
			..Default::default()
		}
	}
}

impl From<jsonld_expansion::Options> for Options {
	fn from(options: jsonld_expansion::Options) -> Options {
		Options {
			processing_mode: options.processing_mode,
			ordered: options.ordered,
			..Options::default()
		}
	}
}

impl Default for Options {
	fn default() -> Options {
		Options {
			processing_mode: ProcessingMode::default(),
			compact_to_relative: true,
			compact_arrays: true,
			ordered: false,
		}
	}
}

/// Compaction of a document fragment in expanded form.
///
/// This trait is implemented by [`json_syntax::Value`]: any value of an
/// expanded document (value object, node object, list object or array
/// thereof) can be compacted against a processed context.
pub trait CompactFragment {
	#[allow(async_fn_in_trait)]
	async fn compact_fragment_full<'a, L>(
		&'a self,
		active_context: &'a Context,
		type_scoped_context: &'a Context,
		active_property: Option<&'a str>,
		loader: &'a L,
		options: Options,
	) -> CompactFragmentResult
	where
		L: Loader;

	#[allow(async_fn_in_trait)]
	#[inline(always)]
	async fn compact_fragment<'a, L>(
		&'a self,
		active_context: &'a Context,
		loader: &'a L,
	) -> CompactFragmentResult
	where
		L: Loader,
	{
		self.compact_fragment_full(
			active_context,
			active_context,
			None,
			loader,
			Options::default(),
		)
		.await
	}
}

impl CompactFragment for Value {
	async fn compact_fragment_full<'a, L>(
		&'a self,
		active_context: &'a Context,
		type_scoped_context: &'a Context,
		active_property: Option<&'a str>,
		loader: &'a L,
		options: Options,
	) -> CompactFragmentResult
	where
		L: Loader,
	{
		match self {
			Value::Array(items) => {
				compact_collection_with(
					items.iter(),
					active_context,
					type_scoped_context,
					active_property,
					loader,
					options,
				)
				.await
			}
			Value::Object(object) => {
				if is_value_object(self) {
					compact_indexed_value_with(
						object,
						index_of(self),
						active_context,
						active_property,
						loader,
						options,
					)
					.await
				} else if is_list_object(self) {
					compact_indexed_list_with(
						self,
						active_context,
						type_scoped_context,
						active_property,
						loader,
						options,
					)
					.await
				} else {
					compact_indexed_node_with(
						object,
						index_of(self),
						active_context,
						type_scoped_context,
						active_property,
						loader,
						options,
					)
					.await
				}
			}
			// Expanded documents do not contain bare scalars; pass them
			// through unchanged.
			other => Ok(other.clone()),
		}
	}
}

/// Compact a list object.
async fn compact_indexed_list_with<'a, L>(
	value: &'a Value,
	active_context: &'a Context,
	type_scoped_context: &'a Context,
	active_property: Option<&'a str>,
	loader: &'a L,
	options: Options,
) -> CompactFragmentResult
where
	L: Loader,
{
	let mut active_context = active_context;
	// If active context has a previous context, the active context is not propagated.
	// If element does not contain an @value entry, and element does not consist of
	// a single @id entry, set active context to previous context from active context,
	// as the scope of a term-scoped context does not apply when processing new node objects.
	if let Some(previous_context) = active_context.previous_context() {
		active_context = previous_context
	}

	// If the term definition for active property in active context has a local context:
	let mut active_context = Mown::Borrowed(active_context);
	let mut list_container = false;
	if let Some(active_property) = active_property {
		if let Some(active_property_definition) = type_scoped_context.get(active_property) {
			if let Some(local_context) = active_property_definition.context() {
				active_context = Mown::Owned(
					jsonld_context_processing::algorithm::process_context(
						active_context.as_ref(),
						local_context,
						ProcessingStack::default(),
						loader,
						active_property_definition.base_url().cloned(),
						ProcessingOptions::from(options).with_override(),
					)
					.await?,
				)
			}

			list_container = active_property_definition
				.container()
				.contains(ContainerKind::List);
		}
	}

	let items = list_of(value).map(Value::force_as_array).unwrap_or(&[]);

	if list_container {
		compact_collection_with(
			items.iter(),
			active_context.as_ref(),
			active_context.as_ref(),
			active_property,
			loader,
			options,
		)
		.await
	} else {
		let mut result = json_syntax::Object::default();
		compact_property(
			&mut result,
			Term::Keyword(Keyword::List),
			items,
			active_context.as_ref(),
			loader,
			false,
			options,
		)
		.await?;

		// If expanded property is @index and active property has a container mapping in
		// active context that includes @index,
		if let Some(index) = index_of(value) {
			let mut index_container = false;
			if let Some(active_property) = active_property {
				if let Some(active_property_definition) = active_context.get(active_property) {
					if active_property_definition
						.container()
						.contains(ContainerKind::Index)
					{
						// then the compacted result will be inside of an @index container,
						// drop the @index entry by continuing to the next expanded property.
						index_container = true;
					}
				}
			}

			if !index_container {
				// Initialize alias by IRI compacting expanded property.
				let alias = compact_key(
					active_context.as_ref(),
					&Term::Keyword(Keyword::Index),
					true,
					false,
					options,
				)?;

				// Add an entry alias to result whose value is set to expanded value and
				// continue with the next expanded property.
				result.insert(alias.unwrap(), Value::String(index.into()));
			}
		}

		Ok(Value::Object(result))
	}
}

/// Default value of `as_array` is false.
pub(crate) fn add_value(map: &mut json_syntax::Object, key: &str, value: Value, as_array: bool) {
	match map
		.get_unique(key)
		.ok()
		.flatten()
		.map(|entry| entry.is_array())
	{
		Some(false) => {
			let Entry { key, value } = map.remove_unique(key).ok().flatten().unwrap();
			map.insert(key, Value::Array(vec![value]));
		}
		None if as_array => {
			map.insert(key.into(), Value::Array(Vec::new()));
		}
		_ => (),
	}

	match value {
		Value::Array(values) => {
			for value in values {
				add_value(map, key, value, false)
			}
		}
		value => {
			if let Some(array) = map.get_unique_mut(key).ok().flatten() {
				array.as_array_mut().unwrap().push(value);
				return;
			}

			map.insert(key.into(), value);
		}
	}
}

/// Get the `@value` entry of a value object.
pub(crate) fn value_value(value: &json_syntax::Object) -> Value {
	jsonld_core::expanded::entry(value, "@value")
		.cloned()
		.unwrap_or(Value::Null)
}

pub(crate) async fn compact_collection_with<'a, L, O>(
	items: O,
	active_context: &'a Context,
	type_scoped_context: &'a Context,
	active_property: Option<&'a str>,
	loader: &'a L,
	options: Options,
) -> CompactFragmentResult
where
	O: 'a + Iterator<Item = &'a Value>,
	L: Loader,
{
	let mut result = Vec::new();

	for item in items {
		let compacted_item = Box::pin(item.compact_fragment_full(
			active_context,
			type_scoped_context,
			active_property,
			loader,
			options,
		))
		.await?;

		if !compacted_item.is_null() {
			result.push(compacted_item)
		}
	}

	let mut list_or_set = false;
	if let Some(active_property) = active_property {
		if let Some(active_property_definition) = active_context.get(active_property) {
			list_or_set = active_property_definition
				.container()
				.contains(ContainerKind::List)
				|| active_property_definition
					.container()
					.contains(ContainerKind::Set);
		}
	}

	if result.is_empty()
		|| result.len() > 1
		|| !options.compact_arrays
		|| active_property == Some("@graph")
		|| active_property == Some("@set")
		|| list_or_set
	{
		return Ok(Value::Array(result));
	}

	Ok(result.into_iter().next().unwrap())
}
