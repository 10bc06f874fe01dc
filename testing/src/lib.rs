//! # Marketdesk Testing
//!
//! Testing utilities and helpers for Marketdesk slices.
//!
//! This crate provides:
//! - A fixed clock for deterministic timestamps
//! - [`ControlledService`], a slice service whose calls the test resolves by hand
//! - [`ReducerTest`], a Given-When-Then harness for reducers
//!
//! ## Example
//!
//! ```ignore
//! use marketdesk_testing::{ControlledService, test_clock};
//!
//! #[tokio::test]
//! async fn test_last_trigger_wins() {
//!     let service = ControlledService::<u32, String>::new();
//!     let env = SliceEnvironment::new(service.clone(), Arc::new(test_clock()));
//!     let store = Store::new(AsyncState::default(), SliceReducer::new(), env);
//!
//!     let mut a = store.send(SliceAction::Trigger(1)).await?;
//!     let mut b = store.send(SliceAction::Trigger(2)).await?;
//!     service.succeed(1, "b".into());
//!     b.wait().await;
//!     service.succeed(0, "a".into());
//!     a.wait().await;
//!
//!     assert_eq!(store.state(|s| s.data().cloned()).await, Some("b".into()));
//! }
//! ```

use chrono::{DateTime, Utc};
use marketdesk_core::environment::Clock;

mod reducer_test;

pub use reducer_test::{ReducerTest, assertions};

/// Mock implementations of Environment traits
pub mod mocks {
    use super::{Clock, DateTime, Utc};
    use futures::FutureExt;
    use futures::future::BoxFuture;
    use marketdesk_core::slice::SliceService;
    use std::fmt;
    use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
    use tokio::sync::oneshot;

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time, making tests reproducible.
    ///
    /// # Example
    ///
    /// ```
    /// use marketdesk_testing::mocks::FixedClock;
    /// use marketdesk_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// assert_eq!(clock.now(), clock.now());
    /// ```
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }

    /// Create a default fixed clock for tests (2025-01-01 00:00:00 UTC)
    #[must_use]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(DateTime::<Utc>::from_timestamp(1_735_689_600, 0).unwrap_or_default())
    }

    struct Call<P, T> {
        params: P,
        responder: Option<oneshot::Sender<Result<T, String>>>,
    }

    /// Slice service whose requests stay pending until the test settles them.
    ///
    /// Calls are numbered from 0 in the order the reducer issued them, so a
    /// test can resolve them in any order it likes. Clones share the same
    /// call list. A call still unsettled when the last clone is dropped fails
    /// with `"request abandoned"`.
    pub struct ControlledService<P, T> {
        calls: Arc<Mutex<Vec<Call<P, T>>>>,
    }

    impl<P, T> ControlledService<P, T> {
        /// Create a service with no calls yet
        #[must_use]
        pub fn new() -> Self {
            Self {
                calls: Arc::new(Mutex::new(Vec::new())),
            }
        }

        fn calls(&self) -> MutexGuard<'_, Vec<Call<P, T>>> {
            // A poisoned lock only means another test thread panicked
            self.calls.lock().unwrap_or_else(PoisonError::into_inner)
        }

        /// Number of calls issued so far
        #[must_use]
        pub fn call_count(&self) -> usize {
            self.calls().len()
        }

        /// Params of call `index`
        #[must_use]
        pub fn params(&self, index: usize) -> Option<P>
        where
            P: Clone,
        {
            self.calls().get(index).map(|call| call.params.clone())
        }

        /// Settle call `index`. Returns `false` if there is no such call or it
        /// was already settled.
        pub fn resolve(&self, index: usize, result: Result<T, String>) -> bool {
            let responder = self
                .calls()
                .get_mut(index)
                .and_then(|call| call.responder.take());
            responder.is_some_and(|tx| tx.send(result).is_ok())
        }

        /// Settle call `index` successfully
        pub fn succeed(&self, index: usize, payload: T) -> bool {
            self.resolve(index, Ok(payload))
        }

        /// Settle call `index` with an error message
        pub fn fail(&self, index: usize, message: impl Into<String>) -> bool {
            self.resolve(index, Err(message.into()))
        }
    }

    impl<P, T> Default for ControlledService<P, T> {
        fn default() -> Self {
            Self::new()
        }
    }

    impl<P, T> Clone for ControlledService<P, T> {
        fn clone(&self) -> Self {
            Self {
                calls: Arc::clone(&self.calls),
            }
        }
    }

    impl<P, T> fmt::Debug for ControlledService<P, T> {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.debug_struct("ControlledService")
                .field("calls", &self.call_count())
                .finish()
        }
    }

    impl<P, T> SliceService for ControlledService<P, T>
    where
        P: Clone + fmt::Debug + Send + 'static,
        T: Clone + fmt::Debug + Send + 'static,
    {
        const NAME: &'static str = "controlled";
        type Params = P;
        type Payload = T;
        type Error = String;

        fn fetch(&self, params: P) -> BoxFuture<'static, Result<T, String>> {
            let (tx, rx) = oneshot::channel();
            self.calls().push(Call {
                params,
                responder: Some(tx),
            });

            async move {
                rx.await
                    .unwrap_or_else(|_| Err("request abandoned".to_string()))
            }
            .boxed()
        }
    }
}

// Re-export commonly used items
pub use mocks::{ControlledService, FixedClock, test_clock};
