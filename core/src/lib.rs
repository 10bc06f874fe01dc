//! # Marketdesk Core
//!
//! Core traits and types for Marketdesk client state.
//!
//! Every category of remote data the admin panel and the public front-end show
//! (orders, public events, bookings, reports, badges) lives in its own *slice*:
//! a small state container that tracks one request lifecycle and caches the
//! last good result.
//!
//! ## Core Concepts
//!
//! - **State**: [`request::AsyncState`], the status/data/error triple of a slice
//! - **Action**: [`slice::SliceAction`], trigger/success/failure/reset
//! - **Reducer**: Pure function `(State, Action, Environment) → (State, Effects)`
//! - **Effect**: Side effect descriptions (the service call), executed by the runtime
//! - **Environment**: Injected dependencies (service, clock)
//!
//! ## Example
//!
//! ```ignore
//! use marketdesk_core::slice::{SliceAction, SliceReducer};
//!
//! let reducer = SliceReducer::<OrdersService>::new();
//! let mut state = AsyncState::default();
//!
//! let effects = reducer.reduce(&mut state, SliceAction::Trigger(query), &env);
//! assert!(state.is_loading());
//! ```

// Re-export commonly used types
pub use chrono::{DateTime, Utc};
pub use serde::{Deserialize, Serialize};
pub use smallvec::{SmallVec, smallvec};

/// Async request state: status, cached payload, error, and request correlation
pub mod request;

/// Generic slice reducer over a [`slice::SliceService`]
pub mod slice;

/// Reducer module - The core trait for business logic
///
/// Reducers are pure functions: `(State, Action, Environment) → (State, Effects)`
///
/// They contain all state transitions and are deterministic and testable.
pub mod reducer {
    use super::effect::Effect;
    use smallvec::SmallVec;

    /// The Reducer trait - core abstraction for state transitions
    ///
    /// # Type Parameters
    ///
    /// - `State`: The domain state this reducer operates on
    /// - `Action`: The action type this reducer processes
    /// - `Environment`: The injected dependencies this reducer needs
    ///
    /// # Example
    ///
    /// ```ignore
    /// impl Reducer for CounterReducer {
    ///     type State = CounterState;
    ///     type Action = CounterAction;
    ///     type Environment = ();
    ///
    ///     fn reduce(
    ///         &self,
    ///         state: &mut CounterState,
    ///         action: CounterAction,
    ///         _env: &(),
    ///     ) -> SmallVec<[Effect<CounterAction>; 4]> {
    ///         state.count += 1;
    ///         smallvec![Effect::None]
    ///     }
    /// }
    /// ```
    pub trait Reducer {
        /// The state type this reducer operates on
        type State;

        /// The action type this reducer processes
        type Action;

        /// The environment type with injected dependencies
        type Environment;

        /// Reduce an action into state changes and effects
        ///
        /// This is a pure function that:
        /// 1. Validates the action
        /// 2. Updates state in place
        /// 3. Returns effect descriptions to be executed
        ///
        /// # Arguments
        ///
        /// - `state`: Mutable reference to current state
        /// - `action`: The action to process
        /// - `env`: Reference to injected dependencies
        ///
        /// # Returns
        ///
        /// Effects to be executed by the runtime. Most actions produce at most
        /// one effect, so the list is stack-allocated up to four entries.
        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            env: &Self::Environment,
        ) -> SmallVec<[Effect<Self::Action>; 4]>;
    }
}

/// Effect module - Side effect descriptions
///
/// A reducer never performs I/O itself. It hands the runtime a description of
/// the call to make, and the runtime feeds the call's outcome back in as an
/// action.
pub mod effect {
    use std::fmt;
    use std::future::Future;
    use std::pin::Pin;

    /// Boxed async computation yielding an optional follow-up action
    pub type EffectFuture<Action> = Pin<Box<dyn Future<Output = Option<Action>> + Send>>;

    /// Side effect returned from a reducer and executed by the Store
    pub enum Effect<Action> {
        /// Nothing to do
        None,

        /// Async computation; a `Some` output is fed back into the reducer
        Future(EffectFuture<Action>),
    }

    impl<Action> fmt::Debug for Effect<Action> {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            match self {
                Effect::None => f.write_str("Effect::None"),
                Effect::Future(_) => f.write_str("Effect::Future(<future>)"),
            }
        }
    }

    impl<Action> Effect<Action> {
        /// Wrap an async computation whose output is fed back as an action
        pub fn future<F>(fut: F) -> Effect<Action>
        where
            F: Future<Output = Option<Action>> + Send + 'static,
        {
            Effect::Future(Box::pin(fut))
        }

        /// True for [`Effect::None`]
        #[must_use]
        pub const fn is_none(&self) -> bool {
            matches!(self, Effect::None)
        }
    }
}

/// Environment module - Dependency injection traits
///
/// All external dependencies are abstracted behind traits and injected
/// via the Environment parameter.
pub mod environment {
    use chrono::{DateTime, Utc};

    /// Clock trait - abstracts time operations for testability
    ///
    /// # Examples
    ///
    /// ```ignore
    /// // Test - fixed time for deterministic tests
    /// struct FixedClock { time: DateTime<Utc> }
    /// impl Clock for FixedClock {
    ///     fn now(&self) -> DateTime<Utc> {
    ///         self.time
    ///     }
    /// }
    /// ```
    pub trait Clock: Send + Sync {
        /// Get the current time
        fn now(&self) -> DateTime<Utc>;
    }

    /// Wall-clock time
    #[derive(Debug, Clone, Copy, Default)]
    pub struct SystemClock;

    impl Clock for SystemClock {
        fn now(&self) -> DateTime<Utc> {
            Utc::now()
        }
    }
}
