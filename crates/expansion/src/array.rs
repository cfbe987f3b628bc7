use crate::{expand_element, ActiveProperty, Error, Expanded, Options};
use iref::IriBuf;
use jsonld_core::{context::TermDefinitionRef, Context, Loader};
use jsonld_syntax::ContainerKind;
use json_syntax::{Array, Value};

#[allow(clippy::too_many_arguments)]
pub(crate) async fn expand_array<'a, L>(
	active_context: &'a Context,
	active_property: ActiveProperty<'a>,
	active_property_definition: Option<TermDefinitionRef<'a>>,
	element: &'a Array,
	base_url: Option<&'a IriBuf>,
	loader: &'a L,
	options: Options,
	from_map: bool,
) -> Result<Expanded, Error>
where
	L: Loader,
{
	// Initialize an empty array, result.
	let mut is_list = false;
	let mut result = Vec::new();

	// If the container mapping of `active_property` includes `@list`, and
	// `expanded_item` is an array, set `expanded_item` to a new map containing
	// the entry `@list` where the value is the original `expanded_item`.
	if let Some(definition) = active_property_definition {
		is_list = definition.container().contains(ContainerKind::List);
	}

	// For each item in element:
	for item in element.iter() {
		// Initialize `expanded_item` to the result of using this algorithm
		// recursively, passing `active_context`, `active_property`, `item` as element,
		// `base_url` and the `from_map` flag.
		let e = Box::pin(expand_element(
			active_context,
			active_property,
			item,
			base_url,
			loader,
			options,
			from_map,
		))
		.await?;

		// If the container mapping of `active_property` includes `@list`, and
		// `expanded_item` is itself a list object, a list of lists error has
		// been detected.
		if is_list && e.is_list() {
			return Err(Error::ListOfLists);
		}

		result.extend(e);
	}

	if is_list {
		let mut object = json_syntax::Object::default();
		object.insert("@list".into(), Value::Array(result));
		return Ok(Expanded::Object(Value::Object(object)));
	}

	// Return result.
	Ok(Expanded::Array(result))
}
