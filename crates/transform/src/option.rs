use indexmap::IndexMap;
use thiserror::Error;

/// Tag of an option definition, mirroring the editor widget it maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionTag {
	Checkbox,
	Textbox,
	/// Integer input; hosts surface an implicit lower bound of 1.
	Intbox,
	Radio,
}

impl OptionTag {
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Checkbox => "CHECKBOX",
			Self::Textbox => "TEXTBOX",
			Self::Intbox => "INTBOX",
			Self::Radio => "RADIO",
		}
	}
}

impl core::fmt::Display for OptionTag {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		f.write_str(self.as_str())
	}
}

/// The value of an option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionValue {
	Bool(bool),
	Int(i64),
	String(String),
}

impl OptionValue {
	pub fn as_bool(&self) -> Option<bool> {
		match self {
			OptionValue::Bool(v) => Some(*v),
			_ => None,
		}
	}

	pub fn as_int(&self) -> Option<i64> {
		match self {
			OptionValue::Int(v) => Some(*v),
			_ => None,
		}
	}

	pub fn as_str(&self) -> Option<&str> {
		match self {
			OptionValue::String(v) => Some(v),
			_ => None,
		}
	}

	pub fn type_name(&self) -> &'static str {
		match self {
			OptionValue::Bool(_) => "bool",
			OptionValue::Int(_) => "int",
			OptionValue::String(_) => "string",
		}
	}
}

impl From<bool> for OptionValue {
	fn from(v: bool) -> Self {
		OptionValue::Bool(v)
	}
}

impl From<i64> for OptionValue {
	fn from(v: i64) -> Self {
		OptionValue::Int(v)
	}
}

impl From<String> for OptionValue {
	fn from(v: String) -> Self {
		OptionValue::String(v)
	}
}

impl From<&str> for OptionValue {
	fn from(v: &str) -> Self {
		OptionValue::String(v.to_string())
	}
}

/// One selectable entry of a radio option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RadioChoice {
	pub value: String,
	pub label: Option<String>,
}

impl RadioChoice {
	pub fn new(value: impl Into<String>) -> Self {
		Self {
			value: value.into(),
			label: None,
		}
	}

	pub fn with_label(mut self, label: impl Into<String>) -> Self {
		self.label = Some(label.into());
		self
	}

	/// Display label, falling back to the value.
	pub fn label(&self) -> &str {
		self.label.as_deref().unwrap_or(&self.value)
	}
}

/// Tagged payload of an option definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionKind {
	Checkbox { value: bool },
	Textbox { value: String },
	Intbox { value: i64 },
	Radio { radios: Vec<RadioChoice>, value: String },
}

/// A typed option with its current value.
///
/// Transforms declare these with their defaults; panels hold their own copy
/// and replace values through [`OptionSet::with_value`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionDef {
	pub key: String,
	pub label: Option<String>,
	pub kind: OptionKind,
}

impl OptionDef {
	pub fn checkbox(key: impl Into<String>, value: bool) -> Self {
		Self::new(key, OptionKind::Checkbox { value })
	}

	pub fn textbox(key: impl Into<String>, value: impl Into<String>) -> Self {
		Self::new(key, OptionKind::Textbox { value: value.into() })
	}

	pub fn intbox(key: impl Into<String>, value: i64) -> Self {
		Self::new(key, OptionKind::Intbox { value })
	}

	pub fn radio(key: impl Into<String>, radios: impl IntoIterator<Item = RadioChoice>, value: impl Into<String>) -> Self {
		Self::new(
			key,
			OptionKind::Radio {
				radios: radios.into_iter().collect(),
				value: value.into(),
			},
		)
	}

	fn new(key: impl Into<String>, kind: OptionKind) -> Self {
		Self {
			key: key.into(),
			label: None,
			kind,
		}
	}

	pub fn with_label(mut self, label: impl Into<String>) -> Self {
		self.label = Some(label.into());
		self
	}

	/// Display label, falling back to the key.
	pub fn label(&self) -> &str {
		self.label.as_deref().unwrap_or(&self.key)
	}

	pub fn tag(&self) -> OptionTag {
		match self.kind {
			OptionKind::Checkbox { .. } => OptionTag::Checkbox,
			OptionKind::Textbox { .. } => OptionTag::Textbox,
			OptionKind::Intbox { .. } => OptionTag::Intbox,
			OptionKind::Radio { .. } => OptionTag::Radio,
		}
	}

	pub fn value(&self) -> OptionValue {
		match &self.kind {
			OptionKind::Checkbox { value } => OptionValue::Bool(*value),
			OptionKind::Textbox { value } | OptionKind::Radio { value, .. } => OptionValue::String(value.clone()),
			OptionKind::Intbox { value } => OptionValue::Int(*value),
		}
	}

	/// Radio choices, empty for every other tag.
	pub fn radios(&self) -> &[RadioChoice] {
		match &self.kind {
			OptionKind::Radio { radios, .. } => radios,
			_ => &[],
		}
	}

	/// Checks the definition's own invariants (radio selection membership).
	pub fn validate(&self) -> Result<(), OptionError> {
		if let OptionKind::Radio { radios, value } = &self.kind {
			if radios.is_empty() {
				return Err(OptionError::InvalidValue {
					option: self.key.clone(),
					reason: "radio option has no choices".to_string(),
				});
			}
			check_radio_member(&self.key, radios, value)?;
		}
		Ok(())
	}

	/// Returns a copy of this definition holding `value`.
	pub fn with_value(&self, value: OptionValue) -> Result<Self, OptionError> {
		let kind = match (&self.kind, value) {
			(OptionKind::Checkbox { .. }, OptionValue::Bool(value)) => OptionKind::Checkbox { value },
			(OptionKind::Textbox { .. }, OptionValue::String(value)) => OptionKind::Textbox { value },
			(OptionKind::Intbox { .. }, OptionValue::Int(value)) => OptionKind::Intbox { value },
			(OptionKind::Radio { radios, .. }, OptionValue::String(value)) => {
				check_radio_member(&self.key, radios, &value)?;
				OptionKind::Radio {
					radios: radios.clone(),
					value,
				}
			}
			(_, value) => {
				return Err(OptionError::TypeMismatch {
					option: self.key.clone(),
					expected: self.tag(),
					got: value.type_name(),
				});
			}
		};
		Ok(Self {
			key: self.key.clone(),
			label: self.label.clone(),
			kind,
		})
	}
}

fn check_radio_member(key: &str, radios: &[RadioChoice], value: &str) -> Result<(), OptionError> {
	if radios.iter().any(|r| r.value == value) {
		return Ok(());
	}
	Err(OptionError::InvalidValue {
		option: key.to_string(),
		reason: format!("'{value}' is not one of the radio choices"),
	})
}

/// Ordered mapping from option key to its definition and current value.
///
/// Sets are treated as immutable snapshots: edits produce a new set through
/// [`OptionSet::with_value`], so a set handed to an evaluation never changes
/// underneath it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionSet {
	defs: IndexMap<String, OptionDef>,
}

impl OptionSet {
	pub fn new() -> Self {
		Self::default()
	}

	/// Builds a set from definitions, rejecting duplicate keys and invalid radios.
	pub fn from_defs(defs: impl IntoIterator<Item = OptionDef>) -> Result<Self, OptionError> {
		let mut set = Self::new();
		for def in defs {
			def.validate()?;
			if set.defs.contains_key(&def.key) {
				return Err(OptionError::DuplicateKey(def.key));
			}
			set.defs.insert(def.key.clone(), def);
		}
		Ok(set)
	}

	pub fn get(&self, key: &str) -> Option<&OptionDef> {
		self.defs.get(key)
	}

	pub fn value(&self, key: &str) -> Option<OptionValue> {
		self.defs.get(key).map(OptionDef::value)
	}

	pub fn bool(&self, key: &str) -> Option<bool> {
		self.value(key).and_then(|v| v.as_bool())
	}

	pub fn int(&self, key: &str) -> Option<i64> {
		self.value(key).and_then(|v| v.as_int())
	}

	pub fn string(&self, key: &str) -> Option<String> {
		match self.value(key)? {
			OptionValue::String(s) => Some(s),
			_ => None,
		}
	}

	/// Iterates definitions in declaration order.
	pub fn iter(&self) -> impl Iterator<Item = &OptionDef> {
		self.defs.values()
	}

	pub fn len(&self) -> usize {
		self.defs.len()
	}

	pub fn is_empty(&self) -> bool {
		self.defs.is_empty()
	}

	/// Returns a new set with `key` replaced by `value`; `self` is unchanged.
	pub fn with_value(&self, key: &str, value: OptionValue) -> Result<Self, OptionError> {
		let def = self.defs.get(key).ok_or_else(|| OptionError::UnknownOption(key.to_string()))?;
		let updated = def.with_value(value)?;
		let mut defs = self.defs.clone();
		defs.insert(key.to_string(), updated);
		Ok(Self { defs })
	}
}

/// Error type for option validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OptionError {
	#[error("unknown option: {0}")]
	UnknownOption(String),
	#[error("duplicate option key: {0}")]
	DuplicateKey(String),
	#[error("type mismatch for option '{option}': expected {expected}, got {got}")]
	TypeMismatch {
		option: String,
		expected: OptionTag,
		got: &'static str,
	},
	#[error("invalid value for option '{option}': {reason}")]
	InvalidValue { option: String, reason: String },
}

/// Parse a textual value into an [`OptionValue`] for the given tag.
///
/// Used by hosts whose option editors produce strings (command lines, text
/// fields). Radio membership is checked later by [`OptionSet::with_value`].
pub fn parse_value_for_tag(value: &str, tag: OptionTag) -> Result<OptionValue, String> {
	match tag {
		OptionTag::Checkbox => parse_bool(value).map(OptionValue::Bool),
		OptionTag::Intbox => value
			.trim()
			.parse::<i64>()
			.map(OptionValue::Int)
			.map_err(|_| format!("invalid integer: '{value}'")),
		OptionTag::Textbox | OptionTag::Radio => Ok(OptionValue::String(value.to_string())),
	}
}

fn parse_bool(value: &str) -> Result<bool, String> {
	match value.to_lowercase().as_str() {
		"true" | "1" | "yes" | "on" => Ok(true),
		"false" | "0" | "no" | "off" => Ok(false),
		_ => Err(format!("invalid boolean: '{value}' (expected true/false, yes/no, on/off, 1/0)")),
	}
}
