use std::sync::Arc;

use thiserror::Error;

use crate::contract::Transform;
use crate::option::OptionError;

/// Errors raised while defining or registering transforms.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
	#[error("transform name must not be empty")]
	EmptyName,
	#[error("transform '{0}' is already registered")]
	DuplicateTransform(String),
	#[error("invalid options for transform '{transform}': {source}")]
	InvalidOptions {
		transform: String,
		#[source]
		source: OptionError,
	},
}

/// Ordered set of transforms with unique names.
///
/// Registration order is the display order of the panels built from it.
#[derive(Debug, Clone, Default)]
pub struct TransformRegistry {
	transforms: Vec<Arc<Transform>>,
}

impl TransformRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	/// Builds a registry from transforms in order, failing on the first duplicate.
	pub fn from_transforms(transforms: impl IntoIterator<Item = Transform>) -> Result<Self, RegistryError> {
		let mut registry = Self::new();
		for transform in transforms {
			registry.register(transform)?;
		}
		Ok(registry)
	}

	pub fn register(&mut self, transform: Transform) -> Result<Arc<Transform>, RegistryError> {
		if self.get(transform.name()).is_some() {
			return Err(RegistryError::DuplicateTransform(transform.name().to_string()));
		}
		tracing::debug!(transform = transform.name(), options = transform.options().len(), "registry.register");
		let transform = Arc::new(transform);
		self.transforms.push(Arc::clone(&transform));
		Ok(transform)
	}

	pub fn get(&self, name: &str) -> Option<&Arc<Transform>> {
		self.transforms.iter().find(|t| t.name() == name)
	}

	/// Iterates transforms in registration order.
	pub fn iter(&self) -> impl Iterator<Item = &Arc<Transform>> {
		self.transforms.iter()
	}

	pub fn names(&self) -> impl Iterator<Item = &str> {
		self.transforms.iter().map(|t| t.name())
	}

	pub fn len(&self) -> usize {
		self.transforms.len()
	}

	pub fn is_empty(&self) -> bool {
		self.transforms.is_empty()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::contract::from_fn;

	fn identity(name: &str) -> Transform {
		Transform::builder(name).build(from_fn(|t, _| Ok(t.to_string()))).unwrap()
	}

	#[test]
	fn keeps_registration_order() {
		let registry = TransformRegistry::from_transforms([identity("b"), identity("a"), identity("c")]).unwrap();
		assert_eq!(registry.names().collect::<Vec<_>>(), ["b", "a", "c"]);
		assert_eq!(registry.len(), 3);
		assert!(registry.get("a").is_some());
		assert!(registry.get("z").is_none());
	}

	#[test]
	fn duplicate_names_fail_loudly() {
		let err = TransformRegistry::from_transforms([identity("curld"), identity("curld")]).unwrap_err();
		assert_eq!(err, RegistryError::DuplicateTransform("curld".into()));
	}
}
