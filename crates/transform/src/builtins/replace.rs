use regex::{NoExpand, Regex};

use crate::{OptionDef, OptionSet, RegistryError, Transform, TransformError, from_fn};

/// Find-and-replace, literal or regex, with an optional replacement limit.
pub fn replace() -> Result<Transform, RegistryError> {
	Transform::builder("replace")
		.option(OptionDef::textbox("find", ""))
		.option(OptionDef::textbox("with", "").with_label("replace with"))
		.option(OptionDef::checkbox("regex", false))
		.option(OptionDef::checkbox("all", true).with_label("replace all"))
		.option(OptionDef::intbox("limit", 1).with_label("max replacements"))
		.build(from_fn(apply))
}

fn apply(text: &str, options: &OptionSet) -> Result<String, TransformError> {
	let find = options.string("find").unwrap_or_default();
	if find.is_empty() {
		return Ok(text.to_string());
	}
	let with = options.string("with").unwrap_or_default();
	let limit = if options.bool("all").unwrap_or(true) {
		0
	} else {
		let limit = options.int("limit").unwrap_or(1);
		if limit < 1 {
			return Err(TransformError::failed(format!("limit must be at least 1, got {limit}")));
		}
		usize::try_from(limit).map_err(|_| TransformError::failed(format!("limit out of range: {limit}")))?
	};

	if options.bool("regex").unwrap_or(false) {
		let re = Regex::new(&find)?;
		Ok(re.replacen(text, limit, with.as_str()).into_owned())
	} else {
		let re = Regex::new(&regex::escape(&find))?;
		Ok(re.replacen(text, limit, NoExpand(&with)).into_owned())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::OptionValue;

	fn opts(t: &Transform, edits: &[(&str, OptionValue)]) -> OptionSet {
		edits
			.iter()
			.fold(t.options().clone(), |set, (key, value)| set.with_value(key, value.clone()).unwrap())
	}

	#[tokio::test]
	async fn empty_pattern_is_identity() {
		let t = replace().unwrap();
		assert_eq!(t.apply("abc", t.options()).await.unwrap(), "abc");
	}

	#[tokio::test]
	async fn literal_replacement_does_not_expand_groups() {
		let t = replace().unwrap();
		let o = opts(&t, &[("find", "a.".into()), ("with", "$1".into())]);
		assert_eq!(t.apply("a.a.ab", &o).await.unwrap(), "$1$1ab");
	}

	#[tokio::test]
	async fn regex_replacement_respects_limit() {
		let t = replace().unwrap();
		let o = opts(
			&t,
			&[
				("find", r"(\d+)".into()),
				("with", "<$1>".into()),
				("regex", true.into()),
				("all", false.into()),
				("limit", OptionValue::Int(2)),
			],
		);
		assert_eq!(t.apply("1 2 3", &o).await.unwrap(), "<1> <2> 3");
	}

	#[tokio::test]
	async fn invalid_regex_is_a_transform_error() {
		let t = replace().unwrap();
		let o = opts(&t, &[("find", "(".into()), ("regex", true.into())]);
		let err = t.apply("x", &o).await.unwrap_err();
		assert!(matches!(err, TransformError::Failed(_)));
		assert!(err.to_string().starts_with("Error: "));
	}

	#[tokio::test]
	async fn limit_below_one_is_rejected() {
		let t = replace().unwrap();
		let o = opts(&t, &[("find", "a".into()), ("all", false.into()), ("limit", OptionValue::Int(0))]);
		assert!(t.apply("aaa", &o).await.is_err());
	}
}
