use std::future::Future;

use tokio::task::JoinHandle;

/// Spawns `fut` on the current runtime, emitting a `worker.spawn` event
/// tagged with `task`.
///
/// # Panics
///
/// Panics when called outside a Tokio runtime.
pub fn spawn<F>(task: &'static str, fut: F) -> JoinHandle<F::Output>
where
	F: Future + Send + 'static,
	F::Output: Send + 'static,
{
	tracing::trace!(task, "worker.spawn");
	tokio::spawn(fut)
}
