use thiserror::Error;

/// Failure of a single transform evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransformError {
	/// The transform rejected its input.
	#[error("Error: {0}")]
	Failed(String),
	/// The transform panicked; the payload is captured at the task boundary.
	#[error("Error: transform panicked: {0}")]
	Panicked(String),
	/// The evaluation task was torn down before it finished.
	#[error("Error: evaluation cancelled")]
	Cancelled,
}

impl TransformError {
	pub fn failed(message: impl Into<String>) -> Self {
		Self::Failed(message.into())
	}
}

impl From<regex::Error> for TransformError {
	fn from(err: regex::Error) -> Self {
		Self::Failed(err.to_string())
	}
}

/// Outcome of an evaluation as shown by a panel.
///
/// When `error` is true, `value` carries the diagnostic message instead of
/// transformed text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransformResult {
	pub error: bool,
	pub value: String,
}

impl TransformResult {
	pub fn ok(value: impl Into<String>) -> Self {
		Self {
			error: false,
			value: value.into(),
		}
	}

	pub fn err(message: impl Into<String>) -> Self {
		Self {
			error: true,
			value: message.into(),
		}
	}

	/// The empty, non-error result shown while previews are disabled.
	pub fn empty() -> Self {
		Self::default()
	}

	pub fn is_error(&self) -> bool {
		self.error
	}
}

impl From<Result<String, TransformError>> for TransformResult {
	fn from(result: Result<String, TransformError>) -> Self {
		match result {
			Ok(value) => Self::ok(value),
			Err(err) => Self::err(err.to_string()),
		}
	}
}
