use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio_util::sync::CancellationToken;

/// Monotonic sequence source for evaluations.
///
/// The first call to [`GenerationClock::next`] returns 1, so 0 can stand for
/// "nothing applied yet".
#[derive(Debug, Default, Clone)]
pub struct GenerationClock {
	next: Arc<AtomicU64>,
}

impl GenerationClock {
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns the next generation ID.
	pub fn next(&self) -> u64 {
		self.next.fetch_add(1, Ordering::AcqRel).wrapping_add(1)
	}
}

/// Marks the end of an owner's lifetime for the tasks it spawned.
///
/// Tasks do not get aborted on retirement; they check [`RetireToken::is_retired`]
/// before publishing anything and drop their output otherwise.
#[derive(Debug, Clone, Default)]
pub struct RetireToken {
	cancel: CancellationToken,
}

impl RetireToken {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn retire(&self) {
		self.cancel.cancel();
	}

	pub fn is_retired(&self) -> bool {
		self.cancel.is_cancelled()
	}
}
