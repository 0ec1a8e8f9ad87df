//! Input throttling for rapid-fire refresh requests.
//!
//! UI-driven lookups arrive far faster than they are worth servicing: a
//! type-ahead box produces one refresh request per keystroke. The
//! [`InputThrottler`] coalesces those requests with "latest-wins" semantics:
//! at most one action runs at a time, consecutive runs start at least one
//! backoff apart, and only the most recently queued request is promoted to a
//! run. Every caller gets a [`RunHandle`] that reports whether *their*
//! request was the one that actually ran.

use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex, MutexGuard};
use std::task::{Context, Poll};
use std::time::Duration;

use futures::FutureExt;
use futures::future::BoxFuture;
use pin_project_lite::pin_project;
use tokio::sync::oneshot;
use tracing::{trace, warn};

use crate::{Result, TypeAheadError};

type Action = Arc<dyn Fn() -> BoxFuture<'static, Result<()>> + Send + Sync>;

/// Coalesces repeated "run now" requests into a bounded-frequency execution
/// stream, always preferring the latest request.
///
/// The throttler holds at most one queued request at a time. Enqueuing while
/// one is waiting supersedes it: the superseded caller's handle resolves to
/// `Ok(false)` and the new request takes the slot. A background drain task
/// promotes the queued request to a run, executes the bound action together
/// with the backoff delay, and keeps promoting until the slot stays empty.
///
/// Cloning is cheap and clones share the same queue.
///
/// # Example
///
/// ```rust,no_run
/// use typeahead::InputThrottler;
/// use std::time::Duration;
///
/// #[tokio::main(flavor = "current_thread")]
/// async fn main() -> typeahead::Result<()> {
///     let throttler = InputThrottler::new(
///         || async {
///             // refresh whatever the latest input asks for
///             Ok(())
///         },
///         Duration::from_millis(300),
///     );
///
///     let ran = throttler.enqueue().await?;
///     assert!(ran);
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct InputThrottler {
    inner: Arc<Inner>,
}

struct Inner {
    /// The bound action. Reads whatever state it needs at run time, so a
    /// coalesced run always observes the latest input.
    action: Action,
    backoff: Duration,
    state: Mutex<State>,
}

#[derive(Default)]
struct State {
    /// The most recently queued, not-yet-promoted request.
    queued: Option<oneshot::Sender<Result<bool>>>,
    /// Whether a drain task currently owns the queue.
    draining: bool,
}

impl InputThrottler {
    /// Minimum enforced backoff. Requested durations below this are raised
    /// to it.
    pub const BACKOFF_FLOOR: Duration = Duration::from_millis(300);

    /// Create a throttler around a zero-argument async action.
    ///
    /// `backoff` is the minimum start-to-start spacing between consecutive
    /// runs, clamped to [`Self::BACKOFF_FLOOR`].
    pub fn new<F, Fut>(action: F, backoff: Duration) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<()>> + Send + 'static,
    {
        let action: Action = Arc::new(move || action().boxed());
        Self {
            inner: Arc::new(Inner {
                action,
                backoff: backoff.max(Self::BACKOFF_FLOOR),
                state: Mutex::new(State::default()),
            }),
        }
    }

    /// The effective backoff (floor-adjusted).
    pub fn backoff(&self) -> Duration {
        self.inner.backoff
    }

    /// Queue a request to run the bound action.
    ///
    /// The returned [`RunHandle`] resolves to:
    /// - `Ok(true)` - this request was promoted to a run and the run
    ///   completed,
    /// - `Ok(false)` - a later request superseded this one before it was
    ///   promoted,
    /// - `Err(e)` - this request ran, but the action failed with `e`.
    ///
    /// The handle may be dropped without awaiting; the run still happens.
    /// Must be called from within a Tokio runtime.
    pub fn enqueue(&self) -> RunHandle {
        let (tx, rx) = oneshot::channel();

        let start_drain = {
            let mut state = self.inner.lock_state();

            // Install the new request before resolving the one it replaces.
            if let Some(superseded) = state.queued.replace(tx) {
                trace!("superseding queued refresh request");
                let _ = superseded.send(Ok(false));
            }

            if state.draining {
                // The live drain task re-checks the slot after its current
                // run; it will pick this request up.
                false
            } else {
                state.draining = true;
                true
            }
        };

        if start_drain {
            let inner = Arc::clone(&self.inner);
            tokio::spawn(async move {
                inner.drain().await;
            });
        }

        RunHandle { rx }
    }
}

impl Inner {
    fn lock_state(&self) -> MutexGuard<'_, State> {
        self.state.lock().expect("throttler state lock poisoned")
    }

    /// Promote queued requests to runs until the slot stays empty.
    ///
    /// Exactly one drain task exists while `draining` is set; the exit
    /// decision and the flag clear happen under the state lock, so an
    /// enqueue can never observe a live flag on a task that has already
    /// decided to exit.
    async fn drain(self: Arc<Self>) {
        trace!("drain task started");
        loop {
            let signal = {
                let mut state = self.lock_state();
                match state.queued.take() {
                    Some(signal) => signal,
                    None => {
                        state.draining = false;
                        trace!("queue empty, drain task exiting");
                        return;
                    }
                }
            };

            // The backoff delay and the action run together and both must
            // finish, so consecutive run starts are at least one backoff
            // apart while slow actions still run to completion.
            let (_, outcome) = tokio::join!(tokio::time::sleep(self.backoff), (self.action)());

            if let Err(error) = &outcome {
                warn!("refresh action failed: {error}");
            }

            // The caller may have stopped waiting; that is not our problem.
            let _ = signal.send(outcome.map(|()| true));
        }
    }
}

pin_project! {
    /// Future returned by [`InputThrottler::enqueue`].
    ///
    /// Resolves once the fate of the request is known; see
    /// [`InputThrottler::enqueue`] for the meaning of each outcome. If the
    /// runtime is torn down while the request is in flight, resolves to
    /// [`TypeAheadError::Shutdown`] instead of hanging.
    #[must_use = "futures do nothing unless polled"]
    pub struct RunHandle {
        #[pin]
        rx: oneshot::Receiver<Result<bool>>,
    }
}

impl Future for RunHandle {
    type Output = Result<bool>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.project();
        match futures::ready!(this.rx.poll(cx)) {
            Ok(outcome) => Poll::Ready(outcome),
            // Sender dropped without resolving: the drain task was killed
            // mid-run (runtime teardown).
            Err(_) => Poll::Ready(Err(TypeAheadError::Shutdown)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Instant;

    fn counting_action(counter: Arc<AtomicUsize>) -> impl Fn() -> BoxFuture<'static, Result<()>> {
        move || {
            let counter = Arc::clone(&counter);
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(())
            }
            .boxed()
        }
    }

    #[tokio::test]
    async fn single_enqueue_runs_once_and_resolves_true() {
        let counter = Arc::new(AtomicUsize::new(0));
        let throttler =
            InputThrottler::new(counting_action(Arc::clone(&counter)), Duration::from_millis(300));

        let ran = throttler.enqueue().await.expect("action never fails");

        assert!(ran, "a lone request should be promoted and run");
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn burst_coalesces_to_latest_request() {
        let counter = Arc::new(AtomicUsize::new(0));
        let throttler =
            InputThrottler::new(counting_action(Arc::clone(&counter)), Duration::from_millis(300));

        // No await between these, so none has been promoted yet.
        let first = throttler.enqueue();
        let second = throttler.enqueue();
        let third = throttler.enqueue();

        assert!(!first.await.expect("superseded is not an error"));
        assert!(!second.await.expect("superseded is not an error"));
        assert!(third.await.expect("action never fails"));
        assert_eq!(counter.load(Ordering::SeqCst), 1, "only the latest request should run");
    }

    #[tokio::test]
    async fn backoff_floor_is_enforced() {
        let throttler = InputThrottler::new(|| async { Ok(()) }, Duration::from_millis(50));
        assert_eq!(throttler.backoff(), InputThrottler::BACKOFF_FLOOR);

        let throttler = InputThrottler::new(|| async { Ok(()) }, Duration::from_millis(500));
        assert_eq!(throttler.backoff(), Duration::from_millis(500));
    }

    #[tokio::test]
    async fn run_waits_for_both_action_and_backoff() {
        // Instant action: the 300ms backoff dominates.
        let throttler = InputThrottler::new(|| async { Ok(()) }, Duration::from_millis(300));
        let start = Instant::now();
        throttler.enqueue().await.expect("action never fails");
        assert!(
            start.elapsed() >= Duration::from_millis(290),
            "an instant action must still be held for the backoff, got {:?}",
            start.elapsed()
        );

        // Slow action: the action duration dominates, not backoff + action.
        let throttler = InputThrottler::new(
            || async {
                tokio::time::sleep(Duration::from_millis(600)).await;
                Ok(())
            },
            Duration::from_millis(300),
        );
        let start = Instant::now();
        throttler.enqueue().await.expect("action never fails");
        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_millis(590), "slow action cut short: {elapsed:?}");
        assert!(
            elapsed < Duration::from_millis(850),
            "backoff should overlap the action, not follow it: {elapsed:?}"
        );
    }

    #[tokio::test]
    async fn action_failure_is_forwarded_to_the_request() {
        let throttler = InputThrottler::new(
            || async { Err(TypeAheadError::action_failed("boom")) },
            Duration::from_millis(300),
        );

        let err = throttler.enqueue().await.expect_err("failure must surface");
        assert!(matches!(err, TypeAheadError::Action { .. }));

        // The drain loop survives a failed run.
        let ran = throttler.enqueue().await;
        assert!(ran.is_err(), "the action fails every time in this test");
    }

    #[tokio::test]
    async fn drain_restarts_after_going_idle() {
        let counter = Arc::new(AtomicUsize::new(0));
        let throttler =
            InputThrottler::new(counting_action(Arc::clone(&counter)), Duration::from_millis(300));

        assert!(throttler.enqueue().await.expect("action never fails"));
        // The drain task has exited by now; a fresh enqueue must start a new one.
        assert!(throttler.enqueue().await.expect("action never fails"));
        assert_eq!(counter.load(Ordering::SeqCst), 2);
    }
}
