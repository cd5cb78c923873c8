//! Transforms shipped with the scratchpad.

mod curld;
mod quotes;
mod replace;

pub use curld::curld;
pub use quotes::quotes;
pub use replace::replace;

use crate::{RegistryError, TransformRegistry};

/// Registry holding every built-in transform in display order.
pub fn registry() -> Result<TransformRegistry, RegistryError> {
	TransformRegistry::from_transforms([curld()?, quotes()?, replace()?])
}
