use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::{Mutex, ReentrantMutex, RwLock};

/// Immutable view of the input text at one write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputSnapshot {
	text: Arc<str>,
	len: usize,
	revision: u64,
}

impl InputSnapshot {
	fn new(text: Arc<str>, revision: u64) -> Self {
		let len = text.encode_utf16().count();
		Self { text, len, revision }
	}

	pub fn text(&self) -> &Arc<str> {
		&self.text
	}

	/// Length in UTF-16 code units, the unit the preview limit is defined in.
	pub fn len(&self) -> usize {
		self.len
	}

	pub fn is_empty(&self) -> bool {
		self.len == 0
	}

	/// Number of writes that preceded this snapshot.
	pub fn revision(&self) -> u64 {
		self.revision
	}
}

type Handler = Arc<dyn Fn(&InputSnapshot) + Send + Sync>;

struct CellInner {
	value: RwLock<InputSnapshot>,
	subscribers: Mutex<Vec<(u64, Handler)>>,
	next_id: AtomicU64,
	/// Serializes write + notify so every subscriber sees writes in one order.
	dispatch: ReentrantMutex<()>,
}

/// Shared, observable input text.
///
/// Every [`InputCell::write`] replaces the text and then calls each
/// subscriber once, in subscription order, even when the new text equals the
/// old one. Clones share the same cell.
#[derive(Clone)]
pub struct InputCell {
	inner: Arc<CellInner>,
}

impl core::fmt::Debug for InputCell {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		f.debug_struct("InputCell")
			.field("len", &self.inner.value.read().len())
			.field("subscribers", &self.subscriber_count())
			.finish()
	}
}

impl Default for InputCell {
	fn default() -> Self {
		Self::new()
	}
}

impl InputCell {
	/// Creates an empty cell.
	pub fn new() -> Self {
		Self::with_text("")
	}

	pub fn with_text(text: impl Into<Arc<str>>) -> Self {
		Self {
			inner: Arc::new(CellInner {
				value: RwLock::new(InputSnapshot::new(text.into(), 0)),
				subscribers: Mutex::new(Vec::new()),
				next_id: AtomicU64::new(0),
				dispatch: ReentrantMutex::new(()),
			}),
		}
	}

	/// Current text.
	pub fn read(&self) -> Arc<str> {
		Arc::clone(&self.inner.value.read().text)
	}

	pub fn snapshot(&self) -> InputSnapshot {
		self.inner.value.read().clone()
	}

	/// Replaces the text and notifies every subscriber.
	pub fn write(&self, text: impl Into<Arc<str>>) {
		let _dispatch = self.inner.dispatch.lock();
		let snapshot = {
			let mut value = self.inner.value.write();
			let revision = value.revision.wrapping_add(1);
			*value = InputSnapshot::new(text.into(), revision);
			value.clone()
		};
		let handlers: Vec<Handler> = self.inner.subscribers.lock().iter().map(|(_, h)| Arc::clone(h)).collect();
		tracing::trace!(len = snapshot.len(), revision = snapshot.revision, subscribers = handlers.len(), "input.write");
		for handler in handlers {
			handler(&snapshot);
		}
	}

	/// Registers `handler` for every subsequent write.
	///
	/// The handler stays registered until the returned [`Subscription`] is
	/// dropped.
	#[must_use = "dropping the subscription unsubscribes immediately"]
	pub fn subscribe(&self, handler: impl Fn(&InputSnapshot) + Send + Sync + 'static) -> Subscription {
		let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
		self.inner.subscribers.lock().push((id, Arc::new(handler)));
		Subscription {
			cell: Arc::downgrade(&self.inner),
			id,
		}
	}

	pub fn subscriber_count(&self) -> usize {
		self.inner.subscribers.lock().len()
	}
}

/// Registration handle returned by [`InputCell::subscribe`].
#[derive(Debug)]
pub struct Subscription {
	cell: Weak<CellInner>,
	id: u64,
}

impl Subscription {
	/// Removes the handler now instead of at drop.
	pub fn unsubscribe(self) {
		drop(self);
	}
}

impl Drop for Subscription {
	fn drop(&mut self) {
		if let Some(cell) = self.cell.upgrade() {
			cell.subscribers.lock().retain(|(id, _)| *id != self.id);
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn recorder(cell: &InputCell, log: &Arc<Mutex<Vec<String>>>, tag: &'static str) -> Subscription {
		let log = Arc::clone(log);
		cell.subscribe(move |snap| log.lock().push(format!("{tag}:{}", snap.text())))
	}

	#[test]
	fn starts_empty() {
		let cell = InputCell::new();
		assert_eq!(&*cell.read(), "");
		assert_eq!(cell.snapshot().revision(), 0);
	}

	#[test]
	fn notifies_in_subscription_order_without_coalescing() {
		let cell = InputCell::new();
		let log = Arc::new(Mutex::new(Vec::new()));
		let _a = recorder(&cell, &log, "a");
		let _b = recorder(&cell, &log, "b");

		cell.write("x");
		cell.write("x");

		assert_eq!(*log.lock(), ["a:x", "b:x", "a:x", "b:x"]);
		assert_eq!(cell.snapshot().revision(), 2);
	}

	#[test]
	fn dropping_subscription_unsubscribes() {
		let cell = InputCell::new();
		let log = Arc::new(Mutex::new(Vec::new()));
		let a = recorder(&cell, &log, "a");
		let _b = recorder(&cell, &log, "b");
		assert_eq!(cell.subscriber_count(), 2);

		a.unsubscribe();
		cell.write("y");

		assert_eq!(cell.subscriber_count(), 1);
		assert_eq!(*log.lock(), ["b:y"]);
	}

	#[test]
	fn handlers_may_read_and_write_reentrantly() {
		let cell = InputCell::new();
		let seen = Arc::new(Mutex::new(Vec::new()));
		let _sub = {
			let cell2 = cell.clone();
			let seen = Arc::clone(&seen);
			cell.subscribe(move |snap| {
				seen.lock().push(cell2.read().to_string());
				if &**snap.text() == "first" {
					cell2.write("second");
				}
			})
		};

		cell.write("first");

		assert_eq!(*seen.lock(), ["first", "second"]);
		assert_eq!(&*cell.read(), "second");
	}

	#[test]
	fn length_counts_utf16_units() {
		assert_eq!(InputCell::with_text("héllo").snapshot().len(), 5);
		// Astral-plane characters take two units each.
		assert_eq!(InputCell::with_text("a\u{1F642}").snapshot().len(), 3);
	}
}
