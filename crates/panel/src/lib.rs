//! Transform panel engine.
//!
//! One shared [`InputCell`] feeds any number of [`TransformPanel`]s. Each
//! panel owns its option values, re-evaluates its transform whenever the
//! input or its options change, and can promote its output back into the
//! cell. Panels remember whether the user closed them through a
//! [`PanelStore`]; oversized inputs force every panel closed.

mod collection;
mod input;
mod panel;
mod store;
mod view;

pub use collection::PanelCollection;
pub use input::{InputCell, InputSnapshot, Subscription};
pub use panel::{PREVIEW_LIMIT, PromoteOutcome, TransformPanel, is_oversize};
pub use store::{FileStore, MemoryStore, PanelStore, StoreError, closed_key};
pub use view::{OptionEditor, OutputView, PanelView, PromoteControl};
