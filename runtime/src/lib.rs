//! # Marketdesk Runtime
//!
//! The Store owns one slice's state, runs its reducer, and executes the
//! effects the reducer returns.
//!
//! ## Core Components
//!
//! - **Store**: serializes actions through the reducer and spawns effects
//! - **Feedback**: actions produced by effects go straight back to the reducer
//! - **`EffectHandle`**: lets a caller wait until the effects of one action are done
//!
//! ## Example
//!
//! ```ignore
//! use marketdesk_runtime::Store;
//!
//! let store = Store::new(AsyncState::new(), SliceReducer::new(), environment);
//!
//! let mut handle = store.send(SliceAction::Trigger(query)).await?;
//! handle.wait().await;
//!
//! let loading = store.state(|s| s.is_loading()).await;
//! ```

use marketdesk_core::{effect::Effect, reducer::Reducer};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::{RwLock, watch};

/// Error types for the Store runtime
pub mod error {
    use thiserror::Error;

    /// Errors that can occur during Store operations
    #[derive(Error, Debug, Clone, PartialEq, Eq)]
    pub enum StoreError {
        /// The store is shutting down and no longer accepts actions from callers
        #[error("Store is shutting down")]
        ShutdownInProgress,

        /// Shutdown gave up with effects still running
        #[error("Shutdown timed out with {0} effects still running")]
        ShutdownTimeout(usize),

        /// Waiting on an [`EffectHandle`](crate::EffectHandle) took too long
        #[error("Timed out waiting for effects")]
        Timeout,
    }
}

pub use error::StoreError;

/// Store settings
///
/// ```ignore
/// let config = StoreConfig::default().with_shutdown_timeout(Duration::from_secs(10));
/// let store = Store::with_config(state, reducer, env, config);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreConfig {
    /// Timeout used by [`Store::close`]
    pub shutdown_timeout: Duration,
}

impl StoreConfig {
    /// Config with the given shutdown timeout
    #[must_use]
    pub const fn new(shutdown_timeout: Duration) -> Self {
        Self { shutdown_timeout }
    }

    /// Replace the shutdown timeout
    #[must_use]
    pub const fn with_shutdown_timeout(mut self, timeout: Duration) -> Self {
        self.shutdown_timeout = timeout;
        self
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::new(Duration::from_secs(30))
    }
}

/// Waits for the effects started by one action.
///
/// For a slice trigger this means the service call has resolved and its
/// completion has been reduced.
#[derive(Clone)]
pub struct EffectHandle {
    running: Arc<AtomicUsize>,
    done: watch::Receiver<()>,
}

impl EffectHandle {
    fn new() -> (Self, EffectTracking) {
        let running = Arc::new(AtomicUsize::new(0));
        let (notify, done) = watch::channel(());
        (
            Self {
                running: Arc::clone(&running),
                done,
            },
            EffectTracking { running, notify },
        )
    }

    /// Wait for every effect of the action to finish
    pub async fn wait(&mut self) {
        while self.running.load(Ordering::SeqCst) > 0 {
            if self.done.changed().await.is_err() {
                // every tracker dropped
                break;
            }
        }
    }

    /// [`wait`](Self::wait) bounded by `timeout`
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Timeout`] if effects are still running when the
    /// timeout elapses.
    pub async fn wait_with_timeout(&mut self, timeout: Duration) -> Result<(), StoreError> {
        tokio::time::timeout(timeout, self.wait())
            .await
            .map_err(|_| StoreError::Timeout)
    }
}

impl std::fmt::Debug for EffectHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EffectHandle")
            .field("running", &self.running.load(Ordering::SeqCst))
            .finish_non_exhaustive()
    }
}

/// Counter half of an [`EffectHandle`]
#[derive(Clone)]
struct EffectTracking {
    running: Arc<AtomicUsize>,
    notify: watch::Sender<()>,
}

/// Held by a spawned effect task. Dropping it, even while unwinding from a
/// panic, marks the effect finished for both its handle and the store.
struct EffectGuard {
    tracking: EffectTracking,
    in_flight: Arc<AtomicUsize>,
}

impl EffectGuard {
    fn start(tracking: &EffectTracking, in_flight: &Arc<AtomicUsize>) -> Self {
        tracking.running.fetch_add(1, Ordering::SeqCst);
        in_flight.fetch_add(1, Ordering::SeqCst);
        Self {
            tracking: tracking.clone(),
            in_flight: Arc::clone(in_flight),
        }
    }
}

impl Drop for EffectGuard {
    fn drop(&mut self) {
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        if self.tracking.running.fetch_sub(1, Ordering::SeqCst) == 1 {
            let _ = self.tracking.notify.send(());
        }
    }
}

/// Store module - The runtime for reducers
pub mod store {
    use super::{
        Arc, AtomicBool, AtomicUsize, Duration, Effect, EffectGuard, EffectHandle, EffectTracking,
        Ordering, Reducer, RwLock, StoreConfig, StoreError,
    };

    const DRAIN_POLL: Duration = Duration::from_millis(10);

    /// Runtime coordinator for one reducer
    ///
    /// State sits behind an `RwLock` and is written only by the reducer.
    /// Clones share state, environment, and shutdown status.
    ///
    /// # Type Parameters
    ///
    /// - `S`: State type
    /// - `A`: Action type
    /// - `E`: Environment type
    /// - `R`: Reducer implementation
    pub struct Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
    {
        state: Arc<RwLock<S>>,
        reducer: R,
        environment: E,
        closing: Arc<AtomicBool>,
        in_flight: Arc<AtomicUsize>,
        config: StoreConfig,
    }

    impl<S, A, E, R> Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E> + Clone + Send + Sync + 'static,
        A: Send + 'static,
        S: Send + Sync + 'static,
        E: Clone + Send + Sync + 'static,
    {
        /// Store with [`StoreConfig::default()`]
        #[must_use]
        pub fn new(initial_state: S, reducer: R, environment: E) -> Self {
            Self::with_config(initial_state, reducer, environment, StoreConfig::default())
        }

        /// Store with explicit settings
        #[must_use]
        pub fn with_config(
            initial_state: S,
            reducer: R,
            environment: E,
            config: StoreConfig,
        ) -> Self {
            Self {
                state: Arc::new(RwLock::new(initial_state)),
                reducer,
                environment,
                closing: Arc::new(AtomicBool::new(false)),
                in_flight: Arc::new(AtomicUsize::new(0)),
                config,
            }
        }

        /// Effects currently running across all actions
        #[must_use]
        pub fn pending_effects(&self) -> usize {
            self.in_flight.load(Ordering::Acquire)
        }

        /// Stop accepting actions from callers and wait for running effects.
        ///
        /// Effects that finish during the wait still feed their actions back,
        /// so a slice never stays pending on a request that has resolved.
        ///
        /// # Errors
        ///
        /// Returns [`StoreError::ShutdownTimeout`] if effects are still running
        /// after `timeout`.
        pub async fn shutdown(&self, timeout: Duration) -> Result<(), StoreError> {
            tracing::info!("Initiating graceful shutdown");
            metrics::counter!("store.shutdown.initiated").increment(1);
            self.closing.store(true, Ordering::Release);

            let drained = tokio::time::timeout(timeout, async {
                while self.pending_effects() > 0 {
                    tokio::time::sleep(DRAIN_POLL).await;
                }
            })
            .await;

            if drained.is_ok() {
                tracing::info!("All effects completed, shutdown successful");
                metrics::counter!("store.shutdown.completed").increment(1);
                Ok(())
            } else {
                let pending = self.pending_effects();
                tracing::error!(pending_effects = pending, "Shutdown timed out");
                metrics::counter!("store.shutdown.timeout").increment(1);
                Err(StoreError::ShutdownTimeout(pending))
            }
        }

        /// [`shutdown`](Self::shutdown) with the configured timeout
        ///
        /// # Errors
        ///
        /// Returns [`StoreError::ShutdownTimeout`] if effects are still running
        /// when the timeout elapses.
        pub async fn close(&self) -> Result<(), StoreError> {
            self.shutdown(self.config.shutdown_timeout).await
        }

        /// Reduce `action` and start its effects
        ///
        /// Returns once the effects are spawned, not when they finish; use the
        /// returned handle to wait. Concurrent sends serialize at the reducer.
        ///
        /// # Errors
        ///
        /// Returns [`StoreError::ShutdownInProgress`] once shutdown has begun.
        #[tracing::instrument(skip(self, action), name = "store_send")]
        pub async fn send(&self, action: A) -> Result<EffectHandle, StoreError> {
            if self.closing.load(Ordering::Acquire) {
                tracing::warn!("Rejected action: store is shutting down");
                metrics::counter!("store.shutdown.rejected_actions").increment(1);
                return Err(StoreError::ShutdownInProgress);
            }

            metrics::counter!("store.commands.total").increment(1);
            Ok(self.dispatch(action).await)
        }

        /// Read state through a closure
        ///
        /// ```ignore
        /// let loading = store.state(|s| s.is_loading()).await;
        /// ```
        pub async fn state<F, T>(&self, f: F) -> T
        where
            F: FnOnce(&S) -> T,
        {
            let state = self.state.read().await;
            f(&*state)
        }

        /// Reduce without the shutdown check. Effect feedback comes in here.
        async fn dispatch(&self, action: A) -> EffectHandle {
            let (handle, tracking) = EffectHandle::new();

            let effects = {
                let mut state = self.state.write().await;
                let start = std::time::Instant::now();
                let effects = self.reducer.reduce(&mut *state, action, &self.environment);
                metrics::histogram!("store.reducer.duration_seconds")
                    .record(start.elapsed().as_secs_f64());
                effects
            };

            tracing::trace!(effects = effects.len(), "Reducer completed");
            for effect in effects {
                self.execute_effect(effect, &tracking);
            }

            handle
        }

        /// A panicking effect only takes down its own task; the guard keeps
        /// the counters right.
        fn execute_effect(&self, effect: Effect<A>, tracking: &EffectTracking) {
            match effect {
                Effect::None => {
                    metrics::counter!("store.effects.executed", "type" => "none").increment(1);
                },
                Effect::Future(fut) => {
                    metrics::counter!("store.effects.executed", "type" => "future").increment(1);
                    let guard = EffectGuard::start(tracking, &self.in_flight);
                    let store = self.clone();

                    tokio::spawn(async move {
                        let _guard = guard;
                        if let Some(action) = fut.await {
                            store.dispatch(action).await;
                        }
                    });
                },
            }
        }
    }

    impl<S, A, E, R> Clone for Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E> + Clone,
        E: Clone,
    {
        fn clone(&self) -> Self {
            Self {
                state: Arc::clone(&self.state),
                reducer: self.reducer.clone(),
                environment: self.environment.clone(),
                closing: Arc::clone(&self.closing),
                in_flight: Arc::clone(&self.in_flight),
                config: self.config,
            }
        }
    }
}

pub use store::Store;
