//! End-to-end panel behavior over a shared input.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use pretty_assertions::assert_eq;
use scratchpad_panel::{InputCell, MemoryStore, PREVIEW_LIMIT, PanelCollection, PanelStore, PromoteOutcome, closed_key};
use scratchpad_transform::{OptionSet, Transform, TransformError, TransformFn, TransformRegistry, TransformResult, builtins, from_fn};
use {parking_lot as _, scratchpad_worker as _, serde_json as _, tempfile as _, thiserror as _, tracing as _};

fn curld() -> Transform {
	builtins::curld().unwrap()
}

fn regexp() -> Transform {
	Transform::builder("regexp")
		.build(from_fn(|text, _| Ok(text.replace('"', "'"))))
		.unwrap()
}

#[tokio::test]
async fn unescapes_curl_payload() {
	let input = InputCell::with_text(r#"hello \"world\""#);
	let registry = TransformRegistry::from_transforms([curld()]).unwrap();
	let panels = PanelCollection::new(&registry, input, Arc::new(MemoryStore::new()));
	panels.settled().await;

	let view = &panels.views()[0];
	assert_eq!(view.output.text, r#"hello "world""#);
	assert!(!view.output.is_error);
	assert!(view.promote.enabled);
}

#[tokio::test]
async fn promote_chains_into_other_panels() {
	let input = InputCell::with_text(r#""a""#);
	let upper = Transform::builder("upper").build(from_fn(|t, _| Ok(t.to_uppercase()))).unwrap();
	let registry = TransformRegistry::from_transforms([regexp(), upper]).unwrap();
	let panels = PanelCollection::new(&registry, input.clone(), Arc::new(MemoryStore::new()));
	panels.settled().await;

	let outcome = panels.get("regexp").unwrap().promote().await;
	assert_eq!(outcome, PromoteOutcome::Promoted("'a'".into()));
	assert_eq!(&*input.read(), "'a'");

	panels.settled().await;
	assert_eq!(panels.get("upper").unwrap().result(), TransformResult::ok("'A'"));
	assert_eq!(panels.get("regexp").unwrap().result(), TransformResult::ok("'a'"));
}

#[tokio::test]
async fn oversize_input_closes_every_panel() {
	let input = InputCell::new();
	let registry = builtins::registry().unwrap();
	let panels = PanelCollection::new(&registry, input.clone(), Arc::new(MemoryStore::new()));
	panels.settled().await;

	input.write("\"".repeat(PREVIEW_LIMIT + 1));
	panels.settled().await;

	for view in panels.views() {
		assert!(view.closed, "{} should be closed", view.name);
		assert!(view.preview_disabled);
		assert_eq!(view.output.text, "");
		assert!(!view.output.is_error);
	}
}

#[tokio::test]
async fn persisted_closed_panel_reopens_on_click() {
	let store = Arc::new(MemoryStore::new());
	store.set(&closed_key("curld"), true).unwrap();
	let input = InputCell::with_text("x".repeat(100));
	let registry = TransformRegistry::from_transforms([curld()]).unwrap();
	let panels = PanelCollection::new(&registry, input, store.clone());

	let panel = panels.get("curld").unwrap();
	assert!(panel.closed());
	assert!(!panel.toggle_closed());
	assert!(!panel.closed());
	assert_eq!(store.get(&closed_key("curld")), Some(false));
}

#[tokio::test]
async fn throwing_transform_reports_error() {
	let input = InputCell::with_text("x");
	let boom = Transform::builder("boom").build(from_fn(|_, _| Err(TransformError::failed("boom")))).unwrap();
	let registry = TransformRegistry::from_transforms([boom]).unwrap();
	let panels = PanelCollection::new(&registry, input, Arc::new(MemoryStore::new()));
	panels.settled().await;

	let view = &panels.views()[0];
	assert!(view.output.is_error);
	assert_eq!(view.output.text, "Error: boom");
	assert!(!view.promote.enabled);
}

struct Sleepy {
	delay: Duration,
}

#[async_trait]
impl TransformFn for Sleepy {
	async fn apply(&self, text: &str, _options: &OptionSet) -> Result<String, TransformError> {
		// The first write takes longer so it completes after the second.
		let delay = if text == "first" { self.delay * 3 } else { self.delay };
		tokio::time::sleep(delay).await;
		Ok(text.to_uppercase())
	}
}

#[tokio::test(start_paused = true)]
async fn latest_write_wins_regardless_of_completion_order() {
	let input = InputCell::new();
	let registry = TransformRegistry::from_transforms([
		Transform::builder("slow")
			.build(Sleepy {
				delay: Duration::from_millis(50),
			})
			.unwrap(),
		Transform::builder("fast")
			.build(Sleepy {
				delay: Duration::from_millis(1),
			})
			.unwrap(),
	])
	.unwrap();
	let panels = PanelCollection::new(&registry, input.clone(), Arc::new(MemoryStore::new()));
	panels.settled().await;

	input.write("first");
	input.write("second");
	panels.settled().await;

	for panel in panels.panels() {
		assert_eq!(panel.result(), TransformResult::ok("SECOND"), "panel {}", panel.name());
	}
}

#[test]
fn duplicate_transform_names_are_rejected() {
	let clash = Transform::builder("curld").build(from_fn(|t, _| Ok(t.replace('"', "'")))).unwrap();
	let err = TransformRegistry::from_transforms([curld(), clash]).unwrap_err();
	assert_eq!(err.to_string(), "transform 'curld' is already registered");
}
