use std::sync::Arc;

use scratchpad_transform::TransformRegistry;

use crate::input::InputCell;
use crate::panel::TransformPanel;
use crate::store::PanelStore;
use crate::view::PanelView;

/// One panel per registered transform, in registration order.
///
/// Panels share nothing but the input cell and the store; dropping the
/// collection retires all of them.
#[derive(Debug)]
pub struct PanelCollection {
	input: InputCell,
	panels: Vec<TransformPanel>,
}

impl PanelCollection {
	pub fn new(registry: &TransformRegistry, input: InputCell, store: Arc<dyn PanelStore>) -> Self {
		let panels = registry
			.iter()
			.map(|transform| TransformPanel::new(Arc::clone(transform), input.clone(), Arc::clone(&store)))
			.collect();
		Self { input, panels }
	}

	pub fn input(&self) -> &InputCell {
		&self.input
	}

	pub fn panels(&self) -> &[TransformPanel] {
		&self.panels
	}

	pub fn get(&self, name: &str) -> Option<&TransformPanel> {
		self.panels.iter().find(|p| p.name() == name)
	}

	pub fn len(&self) -> usize {
		self.panels.len()
	}

	pub fn is_empty(&self) -> bool {
		self.panels.is_empty()
	}

	pub fn views(&self) -> Vec<PanelView> {
		self.panels.iter().map(TransformPanel::view).collect()
	}

	/// Waits until every panel has settled.
	pub async fn settled(&self) {
		for panel in &self.panels {
			panel.settled().await;
		}
	}
}

#[cfg(test)]
mod tests {
	use scratchpad_transform::{Transform, TransformError, from_fn};

	use super::*;
	use crate::store::MemoryStore;

	fn registry() -> TransformRegistry {
		TransformRegistry::from_transforms([
			Transform::builder("upper").build(from_fn(|t, _| Ok(t.to_uppercase()))).unwrap(),
			Transform::builder("broken").build(from_fn(|_, _| Err(TransformError::failed("nope")))).unwrap(),
			Transform::builder("len").build(from_fn(|t, _| Ok(t.chars().count().to_string()))).unwrap(),
		])
		.unwrap()
	}

	#[tokio::test]
	async fn one_panel_per_transform_in_order() {
		let input = InputCell::with_text("abc");
		let panels = PanelCollection::new(&registry(), input, Arc::new(MemoryStore::new()));
		panels.settled().await;

		let names: Vec<_> = panels.panels().iter().map(TransformPanel::name).collect();
		assert_eq!(names, ["upper", "broken", "len"]);
		assert_eq!(panels.len(), 3);
	}

	#[tokio::test]
	async fn failing_panel_does_not_affect_others() {
		let input = InputCell::with_text("abc");
		let panels = PanelCollection::new(&registry(), input.clone(), Arc::new(MemoryStore::new()));
		panels.settled().await;

		let views = panels.views();
		assert_eq!(views[0].output.text, "ABC");
		assert!(views[1].output.is_error);
		assert_eq!(views[2].output.text, "3");
		assert_eq!(&*input.read(), "abc");
	}

	#[tokio::test]
	async fn dropping_collection_releases_subscriptions() {
		let input = InputCell::new();
		let panels = PanelCollection::new(&registry(), input.clone(), Arc::new(MemoryStore::new()));
		assert_eq!(input.subscriber_count(), 3);
		drop(panels);
		assert_eq!(input.subscriber_count(), 0);
	}
}
