//! Transform contract for the scratchpad.
//!
//! A transform is a named async function from `(text, options)` to text, plus
//! an ordered schema of typed options with defaults. This crate provides:
//! - Option types ([`OptionDef`], [`OptionKind`], [`OptionValue`], [`OptionSet`])
//! - The async function contract ([`TransformFn`]) and its result ([`TransformResult`])
//! - [`Transform`] definitions built through [`TransformBuilder`]
//! - An ordered [`TransformRegistry`] that rejects duplicate names
//! - Built-in transforms ([`builtins`])

pub mod builtins;
mod contract;
mod option;
mod registry;
mod result;

pub use contract::{FnTransform, Transform, TransformBuilder, TransformFn, from_fn};
pub use option::{OptionDef, OptionError, OptionKind, OptionSet, OptionTag, OptionValue, RadioChoice, parse_value_for_tag};
pub use registry::{RegistryError, TransformRegistry};
pub use result::{TransformError, TransformResult};
