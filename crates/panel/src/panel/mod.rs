//! A single transform bound to the shared input.
//!
//! Every trigger (input write, option edit, mount) draws a sequence number
//! from the panel's [`GenerationClock`] while holding the panel state lock,
//! then evaluates against the input and options current at that moment.
//! Completions only replace the displayed result when their sequence is
//! newer than the last applied one, so a slow early evaluation can never
//! overwrite a faster later one. Oversized inputs apply the empty result
//! synchronously under a fresh sequence, which also fences off anything
//! still in flight.

use std::sync::Arc;

use parking_lot::Mutex;
use scratchpad_transform::{OptionError, OptionSet, OptionValue, Transform, TransformError, TransformFn, TransformResult};
use scratchpad_worker::{GenerationClock, InFlightGate, RetireToken, TaskClass, join_error_panic_message, spawn};
use tokio::sync::watch;

use crate::input::{InputCell, InputSnapshot, Subscription};
use crate::store::{PanelStore, closed_key};
use crate::view::{OptionEditor, OutputView, PanelView, PromoteControl};

/// Inputs longer than this many UTF-16 code units disable previews.
pub const PREVIEW_LIMIT: usize = 30_000;

/// Returns true when an input of `len` characters disables previews.
pub fn is_oversize(len: usize) -> bool {
	len > PREVIEW_LIMIT
}

/// Result of [`TransformPanel::promote`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromoteOutcome {
	/// The value now held by the input cell.
	Promoted(String),
	/// The fresh evaluation failed; the input cell was left untouched.
	Rejected(String),
}

struct PanelState {
	options: Arc<OptionSet>,
	result: TransformResult,
	applied_seq: u64,
	/// User preference; the effective closed state also depends on the input size.
	closed_pref: bool,
	promote_error: Option<String>,
}

struct PanelShared {
	transform: Arc<Transform>,
	input: InputCell,
	store: Arc<dyn PanelStore>,
	store_key: String,
	clock: GenerationClock,
	gate: InFlightGate,
	retire: RetireToken,
	state: Mutex<PanelState>,
	views: watch::Sender<PanelView>,
}

/// Live preview of one transform over the shared input.
///
/// Dropping the panel unsubscribes it from the input cell; evaluations still
/// running finish in the background and their results are discarded.
pub struct TransformPanel {
	shared: Arc<PanelShared>,
	_subscription: Subscription,
}

impl core::fmt::Debug for TransformPanel {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		f.debug_struct("TransformPanel")
			.field("transform", &self.name())
			.field("in_flight", &self.shared.gate.in_flight())
			.finish()
	}
}

impl TransformPanel {
	/// Mounts a panel and starts its first evaluation.
	///
	/// Option values start as a copy of the transform's defaults; the closed
	/// preference is loaded from `store` (missing means open).
	pub fn new(transform: Arc<Transform>, input: InputCell, store: Arc<dyn PanelStore>) -> Self {
		let store_key = closed_key(transform.name());
		let closed_pref = store.get(&store_key).unwrap_or(false);
		let state = PanelState {
			options: Arc::new(transform.options().clone()),
			result: TransformResult::empty(),
			applied_seq: 0,
			closed_pref,
			promote_error: None,
		};
		let (views, _) = watch::channel(render(&transform, &input.snapshot(), &state));

		let shared = Arc::new(PanelShared {
			transform,
			input: input.clone(),
			store,
			store_key,
			clock: GenerationClock::new(),
			gate: InFlightGate::new(),
			retire: RetireToken::new(),
			state: Mutex::new(state),
			views,
		});

		let weak = Arc::downgrade(&shared);
		let subscription = input.subscribe(move |_| {
			if let Some(shared) = weak.upgrade() {
				shared.refresh("input");
			}
		});
		shared.refresh("mount");

		Self {
			shared,
			_subscription: subscription,
		}
	}

	pub fn name(&self) -> &str {
		self.shared.transform.name()
	}

	pub fn transform(&self) -> &Arc<Transform> {
		&self.shared.transform
	}

	/// Current option snapshot.
	pub fn options(&self) -> Arc<OptionSet> {
		Arc::clone(&self.shared.state.lock().options)
	}

	/// Last applied result.
	pub fn result(&self) -> TransformResult {
		self.shared.state.lock().result.clone()
	}

	pub fn preview_disabled(&self) -> bool {
		is_oversize(self.shared.input.snapshot().len())
	}

	/// Effective closed state: forced by oversized input or chosen by the user.
	pub fn closed(&self) -> bool {
		self.preview_disabled() || self.closed_preference()
	}

	/// The persisted user preference alone.
	pub fn closed_preference(&self) -> bool {
		self.shared.state.lock().closed_pref
	}

	pub fn view(&self) -> PanelView {
		let state = self.shared.state.lock();
		render(&self.shared.transform, &self.shared.input.snapshot(), &state)
	}

	/// Receiver updated with a fresh [`PanelView`] after every state change.
	pub fn watch(&self) -> watch::Receiver<PanelView> {
		self.shared.views.subscribe()
	}

	/// Number of evaluations (including promotes) still running.
	pub fn in_flight(&self) -> usize {
		self.shared.gate.in_flight()
	}

	/// Resolves once no evaluation is running.
	///
	/// Never resolves while a transform hangs.
	pub async fn settled(&self) {
		self.shared.gate.idle().await;
	}

	/// Replaces one option value and re-evaluates.
	///
	/// Unknown keys, values of the wrong type and radio values outside the
	/// choices are rejected without touching the panel.
	pub fn set_option(&self, key: &str, value: impl Into<OptionValue>) -> Result<(), OptionError> {
		{
			let mut state = self.shared.state.lock();
			let next = state.options.with_value(key, value.into()).inspect_err(|err| {
				tracing::warn!(transform = self.name(), key, %err, "panel.set_option.rejected");
			})?;
			state.options = Arc::new(next);
		}
		self.shared.refresh("option");
		Ok(())
	}

	/// Flips and persists the closed preference, returning the effective
	/// closed state.
	///
	/// Does nothing while previews are disabled. Persistence failures are
	/// logged; the new preference still applies for this session.
	pub fn toggle_closed(&self) -> bool {
		let shared = &self.shared;
		let mut state = shared.state.lock();
		let input = shared.input.snapshot();
		if is_oversize(input.len()) {
			return true;
		}

		state.closed_pref = !state.closed_pref;
		let closed = state.closed_pref;
		if let Err(error) = shared.store.set(&shared.store_key, closed) {
			tracing::warn!(transform = self.name(), %error, "panel.persist_closed.failed");
		}
		shared.publish(&state, &input);
		closed
	}

	/// Evaluates against the current input and, on success, writes the output
	/// into the input cell.
	///
	/// Always evaluates afresh, whether or not previews are disabled. On
	/// failure the input is left alone; the error is shown in the output, or
	/// as the promote tooltip while previews are disabled.
	pub async fn promote(&self) -> PromoteOutcome {
		let shared = &self.shared;
		let (seq, input, options) = {
			let state = shared.state.lock();
			(shared.clock.next(), shared.input.snapshot(), Arc::clone(&state.options))
		};
		let _guard = shared.gate.enter();

		match evaluate(TaskClass::Promote, shared.transform.func(), Arc::clone(input.text()), options).await {
			Ok(value) => {
				tracing::debug!(transform = self.name(), seq, len = value.len(), "panel.promote");
				shared.input.write(value.clone());
				PromoteOutcome::Promoted(value)
			}
			Err(err) => {
				let message = err.to_string();
				tracing::debug!(transform = self.name(), seq, %message, "panel.promote.rejected");
				let mut state = shared.state.lock();
				let current = shared.input.snapshot();
				if is_oversize(current.len()) {
					state.promote_error = Some(message.clone());
					shared.publish(&state, &current);
				} else if seq > state.applied_seq {
					state.applied_seq = seq;
					state.result = TransformResult::err(message.clone());
					shared.publish(&state, &current);
				}
				PromoteOutcome::Rejected(message)
			}
		}
	}
}

impl Drop for TransformPanel {
	fn drop(&mut self) {
		tracing::trace!(transform = self.name(), in_flight = self.in_flight(), "panel.retire");
		self.shared.retire.retire();
	}
}

impl PanelShared {
	fn name(&self) -> &str {
		self.transform.name()
	}

	/// Starts an evaluation against the current input and options.
	fn refresh(self: &Arc<Self>, trigger: &'static str) {
		if self.retire.is_retired() {
			return;
		}

		let mut state = self.state.lock();
		let input = self.input.snapshot();
		let seq = self.clock.next();
		state.promote_error = None;

		if is_oversize(input.len()) {
			tracing::debug!(transform = self.name(), seq, len = input.len(), trigger, "panel.preview_disabled");
			state.result = TransformResult::empty();
			state.applied_seq = seq;
			self.publish(&state, &input);
			return;
		}

		let options = Arc::clone(&state.options);
		let guard = self.gate.enter();
		self.publish(&state, &input);
		drop(state);

		tracing::debug!(transform = self.name(), seq, len = input.len(), trigger, "panel.evaluate");
		let shared = Arc::clone(self);
		spawn(TaskClass::Preview, async move {
			let _guard = guard;
			let outcome = evaluate(TaskClass::Preview, shared.transform.func(), Arc::clone(input.text()), options).await;
			shared.complete(seq, outcome.into());
		});
	}

	fn complete(&self, seq: u64, result: TransformResult) {
		let mut state = self.state.lock();
		if self.retire.is_retired() {
			return;
		}
		let input = self.input.snapshot();
		if seq <= state.applied_seq || is_oversize(input.len()) {
			tracing::debug!(transform = self.name(), seq, applied = state.applied_seq, "panel.stale_completion");
			return;
		}
		state.applied_seq = seq;
		state.result = result;
		self.publish(&state, &input);
	}

	fn publish(&self, state: &PanelState, input: &InputSnapshot) {
		self.views.send_replace(render(&self.transform, input, state));
	}
}

/// Runs the transform in its own task so a panic surfaces as an error.
async fn evaluate(class: TaskClass, func: Arc<dyn TransformFn>, text: Arc<str>, options: Arc<OptionSet>) -> Result<String, TransformError> {
	let handle = spawn(class, async move { func.apply(&text, &options).await });
	match handle.await {
		Ok(result) => result,
		Err(err) => Err(match join_error_panic_message(err) {
			Some(payload) => TransformError::Panicked(payload),
			None => TransformError::Cancelled,
		}),
	}
}

fn render(transform: &Transform, input: &InputSnapshot, state: &PanelState) -> PanelView {
	let preview_disabled = is_oversize(input.len());
	let closed = preview_disabled || state.closed_pref;
	let result = &state.result;
	PanelView {
		name: transform.name().to_string(),
		closed,
		preview_disabled,
		options: state.options.iter().map(OptionEditor::from).collect(),
		promote: PromoteControl {
			enabled: !result.error,
			tooltip: if preview_disabled { state.promote_error.clone() } else { None },
		},
		output: OutputView {
			text: result.value.clone(),
			is_error: result.error,
			visible: !closed,
		},
	}
}
