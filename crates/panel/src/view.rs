//! Host-facing snapshots of a panel.
//!
//! Hosts render these and route user input back through
//! [`TransformPanel`](crate::TransformPanel) methods: option widgets call
//! `set_option(key, value)`, the promote control calls `promote()`, the title
//! calls `toggle_closed()`.

use scratchpad_transform::{OptionDef, OptionTag, OptionValue, RadioChoice};

/// Editor widget description for one option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionEditor {
	pub tag: OptionTag,
	pub key: String,
	pub label: String,
	pub value: OptionValue,
	/// Choices for radio options, empty otherwise.
	pub radios: Vec<RadioChoice>,
	/// Lower bound the widget should enforce; `Some(1)` for intbox options.
	pub min: Option<i64>,
}

impl From<&OptionDef> for OptionEditor {
	fn from(def: &OptionDef) -> Self {
		let tag = def.tag();
		Self {
			tag,
			key: def.key.clone(),
			label: def.label().to_string(),
			value: def.value(),
			radios: def.radios().to_vec(),
			min: (tag == OptionTag::Intbox).then_some(1),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromoteControl {
	pub enabled: bool,
	/// Error from the last promote attempt, shown while previews are disabled.
	pub tooltip: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputView {
	pub text: String,
	pub is_error: bool,
	pub visible: bool,
}

/// Everything a host needs to draw one panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelView {
	pub name: String,
	pub closed: bool,
	pub preview_disabled: bool,
	pub options: Vec<OptionEditor>,
	pub promote: PromoteControl,
	pub output: OutputView,
}
