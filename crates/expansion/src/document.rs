use super::expand_element;
use crate::{ActiveProperty, Error, Options};
use iref::IriBuf;
use jsonld_core::{expanded::is_value_object, Context, Loader};
use json_syntax::Value;

/// Expand the given JSON-LD document.
///
/// Note that you probably do not want to use this function directly,
/// but instead use the [`Expand::expand`](crate::Expand::expand) method on
/// a `Value` instance.
pub(crate) async fn expand<L>(
	document: &Value,
	active_context: Context,
	base_url: Option<&IriBuf>,
	loader: &L,
	options: Options,
) -> Result<Value, Error>
where
	L: Loader,
{
	let expanded = expand_element(
		&active_context,
		ActiveProperty::None,
		document,
		base_url,
		loader,
		options,
		false,
	)
	.await?;

	// If the outermost expanded result is a map containing only `@graph`,
	// set the result to its `@graph` value.
	let items: Vec<Value> = if expanded.len() == 1 {
		let value = expanded.into_iter().next().unwrap();
		match into_unnamed_graph(value) {
			Ok(graph) => graph,
			Err(value) => {
				if filter_top_level_item(&value) {
					vec![value]
				} else {
					Vec::new()
				}
			}
		}
	} else {
		expanded.into_iter().filter(filter_top_level_item).collect()
	};

	Ok(Value::Array(items))
}

/// Extracts the content of an unnamed graph object, an object whose only
/// entry is `@graph`.
fn into_unnamed_graph(value: Value) -> Result<Vec<Value>, Value> {
	match value {
		Value::Object(mut object) if object.len() == 1 => {
			match object.remove_unique("@graph").ok().flatten() {
				Some(entry) => match entry.value {
					Value::Array(items) => {
						Ok(items.into_iter().filter(filter_top_level_item).collect())
					}
					other => Ok(vec![other]),
				},
				None => Err(Value::Object(object)),
			}
		}
		value => Err(value),
	}
}

pub(crate) fn filter_top_level_item(item: &Value) -> bool {
	// Remove dangling values.
	!is_value_object(item)
}
