//! Generic slice reducer.
//!
//! A slice is one [`AsyncState`] driven by one [`SliceService`]. The reducer is
//! shared by every domain: the domain only decides which params go in, which
//! payload comes out, and how the call is made.
//!
//! ```text
//! Trigger(params) ─► state.begin() ─► Effect::Future(service.fetch(params))
//!                                           │
//!                 Succeeded / Failed { request_id } ◄─┘
//!                          │
//!                 applied only if request_id is still the latest
//! ```

use crate::effect::Effect;
use crate::environment::Clock;
use crate::reducer::Reducer;
use crate::request::{AsyncState, RequestId};
use futures::future::BoxFuture;
use smallvec::{SmallVec, smallvec};
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

/// The remote call behind a slice.
///
/// Implementations normalize every failure (transport, non-2xx, bad payload)
/// into `Self::Error`; the reducer stores its `Display` text.
pub trait SliceService: Send + Sync + 'static {
    /// Slice name used in logs and metrics.
    const NAME: &'static str;

    /// Caller-supplied request parameters.
    type Params: Clone + fmt::Debug + Send + 'static;

    /// Payload cached on success.
    type Payload: Clone + fmt::Debug + Send + 'static;

    /// Failure type. Its `Display` is the user-facing message.
    type Error: fmt::Display + Send + 'static;

    /// Issue the request.
    ///
    /// The returned future must not borrow `self`; the runtime drives it on a
    /// spawned task.
    fn fetch(&self, params: Self::Params) -> BoxFuture<'static, Result<Self::Payload, Self::Error>>;
}

/// Actions accepted by a slice.
#[derive(Debug, Clone, PartialEq)]
pub enum SliceAction<P, T> {
    /// Begin a request with the given params
    Trigger(P),

    /// A request resolved successfully
    Succeeded {
        /// Request this response belongs to
        request_id: RequestId,
        /// Unwrapped response payload
        payload: T,
    },

    /// A request failed
    Failed {
        /// Request this failure belongs to
        request_id: RequestId,
        /// Normalized, user-facing message
        error: String,
    },

    /// Return the slice to idle with no data and no error
    Reset,
}

/// Dependencies of a slice reducer.
pub struct SliceEnvironment<S> {
    service: S,
    clock: Arc<dyn Clock>,
}

impl<S> SliceEnvironment<S> {
    /// Bundle a service with a clock.
    #[must_use]
    pub fn new(service: S, clock: Arc<dyn Clock>) -> Self {
        Self { service, clock }
    }

    /// The service behind this slice.
    #[must_use]
    pub const fn service(&self) -> &S {
        &self.service
    }

    /// Clock used to stamp successful responses.
    #[must_use]
    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }
}

impl<S: Clone> Clone for SliceEnvironment<S> {
    fn clone(&self) -> Self {
        Self {
            service: self.service.clone(),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<S: fmt::Debug> fmt::Debug for SliceEnvironment<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SliceEnvironment")
            .field("service", &self.service)
            .finish_non_exhaustive()
    }
}

/// Reducer shared by every slice.
pub struct SliceReducer<S> {
    _phantom: PhantomData<fn() -> S>,
}

impl<S> SliceReducer<S> {
    /// Create a new slice reducer
    #[must_use]
    pub const fn new() -> Self {
        Self {
            _phantom: PhantomData,
        }
    }
}

impl<S> Default for SliceReducer<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> Clone for SliceReducer<S> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<S> fmt::Debug for SliceReducer<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SliceReducer")
    }
}

impl<S: SliceService> Reducer for SliceReducer<S> {
    type State = AsyncState<S::Payload>;
    type Action = SliceAction<S::Params, S::Payload>;
    type Environment = SliceEnvironment<S>;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            SliceAction::Trigger(params) => {
                let superseded = state.latest_request();
                let request_id = state.begin();
                tracing::debug!(
                    slice = S::NAME,
                    %request_id,
                    superseded = ?superseded,
                    ?params,
                    "Request started"
                );

                let call = env.service().fetch(params);
                smallvec![Effect::future(async move {
                    let action = match call.await {
                        Ok(payload) => SliceAction::Succeeded { request_id, payload },
                        Err(error) => SliceAction::Failed {
                            request_id,
                            error: error.to_string(),
                        },
                    };
                    Some(action)
                })]
            },

            SliceAction::Succeeded { request_id, payload } => {
                if state.succeed(request_id, payload, env.clock().now()) {
                    tracing::debug!(slice = S::NAME, %request_id, "Request succeeded");
                } else {
                    tracing::debug!(slice = S::NAME, %request_id, "Dropped stale response");
                }
                smallvec![Effect::None]
            },

            SliceAction::Failed { request_id, error } => {
                if state.is_latest(request_id) {
                    tracing::warn!(slice = S::NAME, %request_id, error = %error, "Request failed");
                    state.fail(request_id, error);
                } else {
                    tracing::debug!(slice = S::NAME, %request_id, "Dropped stale failure");
                }
                smallvec![Effect::None]
            },

            SliceAction::Reset => {
                tracing::debug!(slice = S::NAME, "Slice reset");
                state.reset();
                smallvec![Effect::None]
            },
        }
    }
}
