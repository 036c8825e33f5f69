use std::future::Future;

use crate::CancellationScope;

/// Outcome of pending work observed through a [`CancellationScope`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub enum Settled<T> {
	/// The work completed while the scope was still live.
	Ready(T),
	/// The scope was cancelled before the result could be applied.
	Stale,
}

impl<T> Settled<T> {
	/// Whether the result was discarded because the scope was cancelled.
	pub fn is_stale(&self) -> bool {
		matches!(self, Self::Stale)
	}

	/// Returns the value when the work settled on a live scope.
	pub fn ready(self) -> Option<T> {
		match self {
			Self::Ready(value) => Some(value),
			Self::Stale => None,
		}
	}
}

/// Awaits two fallible futures concurrently and yields both values.
///
/// Completes when the slower of the two completes. Fails with the first
/// error observed; the other future is dropped at that point.
pub async fn join_both<A, B, T, U, E>(a: A, b: B) -> Result<(T, U), E>
where
	A: Future<Output = Result<T, E>>,
	B: Future<Output = Result<U, E>>,
{
	tokio::try_join!(a, b)
}

/// Runs `fut` to completion, then consults `scope`.
///
/// The underlying work is never aborted; a result that arrives after
/// cancellation is reported as [`Settled::Stale`].
pub async fn settle<F>(scope: &CancellationScope, fut: F) -> Settled<F::Output>
where
	F: Future,
{
	let output = fut.await;
	if scope.is_cancelled() {
		tracing::trace!("worker.settle.stale");
		return Settled::Stale;
	}
	Settled::Ready(output)
}

/// Fan-in of [`join_both`] followed by the scope check of [`settle`].
pub async fn settle_both<A, B, T, U, E>(scope: &CancellationScope, a: A, b: B) -> Settled<Result<(T, U), E>>
where
	A: Future<Output = Result<T, E>>,
	B: Future<Output = Result<U, E>>,
{
	settle(scope, join_both(a, b)).await
}
