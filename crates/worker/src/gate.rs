use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use tokio::sync::Notify;

/// Counts in-flight tasks and lets callers wait until none remain.
#[derive(Debug, Clone, Default)]
pub struct InFlightGate {
	in_flight: Arc<AtomicUsize>,
	notify: Arc<Notify>,
}

impl InFlightGate {
	pub fn new() -> Self {
		Self::default()
	}

	/// Enters a task, returning a guard that must be held until completion.
	///
	/// The guard decrements the counter even if the task is aborted or panics.
	pub fn enter(&self) -> InFlightGuard {
		self.in_flight.fetch_add(1, Ordering::SeqCst);
		InFlightGuard {
			active: self.in_flight.clone(),
			notify: self.notify.clone(),
		}
	}

	/// Number of tasks currently in flight.
	pub fn in_flight(&self) -> usize {
		self.in_flight.load(Ordering::SeqCst)
	}

	/// Waits until no task is in flight.
	pub async fn idle(&self) {
		loop {
			// Register interest before checking condition to avoid race
			let notified = self.notify.notified();

			if self.in_flight.load(Ordering::SeqCst) == 0 {
				return;
			}

			notified.await;
		}
	}
}

/// Guard tracking one in-flight task.
#[derive(Debug)]
pub struct InFlightGuard {
	active: Arc<AtomicUsize>,
	notify: Arc<Notify>,
}

impl Drop for InFlightGuard {
	fn drop(&mut self) {
		let prev = self.active.fetch_sub(1, Ordering::SeqCst);
		debug_assert!(prev > 0, "in_flight underflow");
		self.notify.notify_waiters();
	}
}
