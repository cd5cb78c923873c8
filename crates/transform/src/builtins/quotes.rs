use std::sync::LazyLock;

use regex::Regex;

use crate::{OptionDef, OptionSet, RadioChoice, RegistryError, Transform, TransformError, from_fn};

static SMART_DOUBLE: LazyLock<Regex> = LazyLock::new(|| Regex::new("[\u{201C}\u{201D}]").expect("valid regex"));
static SMART_SINGLE: LazyLock<Regex> = LazyLock::new(|| Regex::new("[\u{2018}\u{2019}]").expect("valid regex"));

/// Normalizes quote characters to a single style.
///
/// `style` picks the target quote; `smart` additionally folds typographic
/// quotes into it.
pub fn quotes() -> Result<Transform, RegistryError> {
	Transform::builder("quotes")
		.option(OptionDef::radio(
			"style",
			[RadioChoice::new("single").with_label("'"), RadioChoice::new("double").with_label("\"")],
			"single",
		))
		.option(OptionDef::checkbox("smart", false).with_label("smart quotes"))
		.build(from_fn(normalize))
}

fn normalize(text: &str, options: &OptionSet) -> Result<String, TransformError> {
	let style = options.string("style").ok_or_else(|| TransformError::failed("missing option 'style'"))?;
	let smart = options.bool("smart").unwrap_or(false);

	let mut text = text.to_string();
	if smart {
		text = SMART_DOUBLE.replace_all(&text, "\"").into_owned();
		text = SMART_SINGLE.replace_all(&text, "'").into_owned();
	}
	match style.as_str() {
		"single" => Ok(text.replace('"', "'")),
		"double" => Ok(text.replace('\'', "\"")),
		other => Err(TransformError::failed(format!("unknown quote style '{other}'"))),
	}
}
