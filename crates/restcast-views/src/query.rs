//! Field overrides sent in the query string

use crate::error::{EndpointError, Result};
use restcast_serializers::{FieldSpec, SerializeOptions, parse_field_list};

/// Parse `fields`, `include` and `exclude` query parameters
///
/// Each parameter holds a comma-separated list of field names and may be
/// repeated; repeated lists are concatenated. Other parameters are ignored,
/// and a parameter that lists no names leaves its option unset.
///
/// # Examples
///
/// ```
/// use restcast_views::overrides_from_query;
///
/// let options = overrides_from_query("fields=id,title&exclude=title&page=2").unwrap();
/// assert_eq!(options.fields.map(|f| f.len()), Some(2));
/// assert_eq!(options.exclude, Some(vec!["title".to_string()]));
/// assert!(options.include.is_none());
/// ```
pub fn overrides_from_query(query: &str) -> Result<SerializeOptions> {
	let query = query.strip_prefix('?').unwrap_or(query);
	let mut fields = Vec::new();
	let mut include = Vec::new();
	let mut exclude = Vec::new();

	for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
		let target = match &*key {
			"fields" => &mut fields,
			"include" => &mut include,
			"exclude" => &mut exclude,
			_ => continue,
		};
		for name in parse_field_list(&value) {
			if !is_field_name(&name) {
				return Err(EndpointError::InvalidQuery(format!(
					"'{}' is not a valid field name in '{}'",
					name, key
				)));
			}
			target.push(name);
		}
	}

	let mut options = SerializeOptions::new();
	if !fields.is_empty() {
		options.fields = Some(FieldSpec::from(fields));
	}
	if !include.is_empty() {
		options.include = Some(FieldSpec::from(include));
	}
	if !exclude.is_empty() {
		options.exclude = Some(exclude);
	}
	Ok(options)
}

fn is_field_name(name: &str) -> bool {
	let mut chars = name.chars();
	chars
		.next()
		.is_some_and(|first| first.is_ascii_alphabetic() || first == '_')
		&& chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
	use super::*;
	use restcast_serializers::FieldDescriptor;
	use rstest::rstest;

	fn names(spec: Option<FieldSpec>) -> Vec<String> {
		spec.map(|spec| {
			spec.iter()
				.filter_map(FieldDescriptor::name)
				.map(str::to_string)
				.collect()
		})
		.unwrap_or_default()
	}

	#[rstest]
	fn test_repeated_parameters_concatenate() {
		let options = overrides_from_query("?fields=id&fields=title,%20price").unwrap();
		assert_eq!(names(options.fields), vec!["id", "title", "price"]);
	}

	#[rstest]
	#[case("")]
	#[case("fields=")]
	#[case("fields=,,&page=3")]
	fn test_empty_lists_leave_options_unset(#[case] query: &str) {
		let options = overrides_from_query(query).unwrap();
		assert!(options.fields.is_none());
		assert!(options.include.is_none());
		assert!(options.exclude.is_none());
	}

	#[rstest]
	#[case("fields=id,1st")]
	#[case("include=full%20name")]
	#[case("exclude=author.name")]
	fn test_malformed_names_are_rejected(#[case] query: &str) {
		let err = overrides_from_query(query).unwrap_err();
		assert!(matches!(err, EndpointError::InvalidQuery(_)));
	}

	#[rstest]
	fn test_include_parameter() {
		let options = overrides_from_query("include=initials,_private").unwrap();
		assert_eq!(names(options.include), vec!["initials", "_private"]);
	}
}
