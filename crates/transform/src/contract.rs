use std::sync::Arc;

use async_trait::async_trait;

use crate::option::{OptionDef, OptionSet};
use crate::registry::RegistryError;
use crate::result::TransformError;

/// Asynchronous text transformation.
///
/// Implementations must be total: every failure is returned as a
/// [`TransformError`]. Inputs are borrowed immutably, so a transform cannot
/// alter the text or option set it was given.
#[async_trait]
pub trait TransformFn: Send + Sync {
	async fn apply(&self, text: &str, options: &OptionSet) -> Result<String, TransformError>;
}

/// Adapter running a synchronous closure as a [`TransformFn`].
pub struct FnTransform<F>(F);

#[async_trait]
impl<F> TransformFn for FnTransform<F>
where
	F: Fn(&str, &OptionSet) -> Result<String, TransformError> + Send + Sync,
{
	async fn apply(&self, text: &str, options: &OptionSet) -> Result<String, TransformError> {
		(self.0)(text, options)
	}
}

/// Wraps a synchronous closure as a transform function.
pub fn from_fn<F>(f: F) -> FnTransform<F>
where
	F: Fn(&str, &OptionSet) -> Result<String, TransformError> + Send + Sync,
{
	FnTransform(f)
}

/// Immutable transform definition: name, option schema with defaults and function.
#[derive(Clone)]
pub struct Transform {
	name: String,
	options: OptionSet,
	func: Arc<dyn TransformFn>,
}

impl core::fmt::Debug for Transform {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		f.debug_struct("Transform")
			.field("name", &self.name)
			.field("options", &self.options.iter().map(|o| o.key.as_str()).collect::<Vec<_>>())
			.finish()
	}
}

impl Transform {
	pub fn builder(name: impl Into<String>) -> TransformBuilder {
		TransformBuilder {
			name: name.into(),
			options: Vec::new(),
		}
	}

	/// Stable identity; also the persistence key suffix.
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Default option values, in declaration order.
	pub fn options(&self) -> &OptionSet {
		&self.options
	}

	/// Shared handle to the function, for running it outside a borrow of `self`.
	pub fn func(&self) -> Arc<dyn TransformFn> {
		Arc::clone(&self.func)
	}

	pub async fn apply(&self, text: &str, options: &OptionSet) -> Result<String, TransformError> {
		self.func.apply(text, options).await
	}
}

/// Builder for [`Transform`] validating the option schema.
#[derive(Debug)]
pub struct TransformBuilder {
	name: String,
	options: Vec<OptionDef>,
}

impl TransformBuilder {
	pub fn option(mut self, def: OptionDef) -> Self {
		self.options.push(def);
		self
	}

	pub fn build(self, func: impl TransformFn + 'static) -> Result<Transform, RegistryError> {
		if self.name.trim().is_empty() {
			return Err(RegistryError::EmptyName);
		}
		let options = OptionSet::from_defs(self.options).map_err(|source| RegistryError::InvalidOptions {
			transform: self.name.clone(),
			source,
		})?;
		Ok(Transform {
			name: self.name,
			options,
			func: Arc::new(func),
		})
	}
}
