use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio_util::sync::CancellationToken;

/// One-shot cancellation flag shared by every continuation of a session.
///
/// Cloning yields a handle to the same flag. The flag flips exactly once and
/// stays set; continuations consult [`Self::is_cancelled`] before applying
/// any effect instead of aborting the underlying request.
#[derive(Debug, Clone, Default)]
pub struct CancellationScope {
	token: CancellationToken,
	flipped: Arc<AtomicBool>,
}

impl CancellationScope {
	/// Creates a live scope.
	pub fn new() -> Self {
		Self::default()
	}

	/// Cancels the scope.
	///
	/// Returns `true` only for the call that performed the transition.
	pub fn cancel(&self) -> bool {
		let first = !self.flipped.swap(true, Ordering::AcqRel);
		self.token.cancel();
		if first {
			tracing::trace!("worker.scope.cancel");
		}
		first
	}

	/// Returns true once any handle to this scope has been cancelled.
	pub fn is_cancelled(&self) -> bool {
		self.token.is_cancelled()
	}

	/// Future resolving when the scope is cancelled.
	pub async fn cancelled(&self) {
		self.token.cancelled().await;
	}
}
