//! Given-When-Then harness for reducers
//!
//! Besides reducing actions, the harness can settle the futures a reducer
//! hands back and feed their results in again, in issue order or reversed.
//! That is enough to replay a request race without a runtime.

#![allow(clippy::module_name_repetitions)] // ReducerTest is the natural name

use marketdesk_core::effect::{Effect, EffectFuture};
use marketdesk_core::reducer::Reducer;

type StateAssertion<S> = Box<dyn FnOnce(&S)>;
type EffectAssertion<A> = Box<dyn FnOnce(&[Effect<A>])>;

enum Step<A> {
    Action(A),
    Settle { reversed: bool },
}

/// Fluent reducer test
///
/// Effect assertions see the effects returned by the last
/// [`when_action`](ReducerTest::when_action); state assertions see the final
/// state.
///
/// # Example
///
/// ```ignore
/// ReducerTest::new(SliceReducer::<OrdersSlice>::new())
///     .with_env(env)
///     .given_state(AsyncState::new())
///     .when_action(SliceAction::Trigger(first))
///     .when_action(SliceAction::Trigger(second))
///     .then_effects(assertions::assert_has_future_effect)
///     .when_effects_settle_in_reverse()
///     .then_state(|s| assert_eq!(s.data(), Some(&second_payload)))
///     .run()
///     .await;
/// ```
pub struct ReducerTest<R: Reducer> {
    reducer: R,
    environment: Option<R::Environment>,
    initial_state: Option<R::State>,
    steps: Vec<Step<R::Action>>,
    state_assertions: Vec<StateAssertion<R::State>>,
    effect_assertions: Vec<EffectAssertion<R::Action>>,
}

impl<R: Reducer> ReducerTest<R> {
    /// Start a test for `reducer`
    #[must_use]
    pub const fn new(reducer: R) -> Self {
        Self {
            reducer,
            environment: None,
            initial_state: None,
            steps: Vec::new(),
            state_assertions: Vec::new(),
            effect_assertions: Vec::new(),
        }
    }

    /// Environment passed to every reduce call
    #[must_use]
    pub fn with_env(mut self, env: R::Environment) -> Self {
        self.environment = Some(env);
        self
    }

    /// Initial state (Given)
    #[must_use]
    pub fn given_state(mut self, state: R::State) -> Self {
        self.initial_state = Some(state);
        self
    }

    /// Reduce `action` (When)
    #[must_use]
    pub fn when_action(mut self, action: R::Action) -> Self {
        self.steps.push(Step::Action(action));
        self
    }

    /// Await every outstanding effect future in the order it was returned and
    /// reduce whatever actions they produce
    #[must_use]
    pub fn when_effects_settle(mut self) -> Self {
        self.steps.push(Step::Settle { reversed: false });
        self
    }

    /// Like [`when_effects_settle`](Self::when_effects_settle), newest first
    #[must_use]
    pub fn when_effects_settle_in_reverse(mut self) -> Self {
        self.steps.push(Step::Settle { reversed: true });
        self
    }

    /// Check the final state (Then)
    #[must_use]
    pub fn then_state<F>(mut self, assertion: F) -> Self
    where
        F: FnOnce(&R::State) + 'static,
    {
        self.state_assertions.push(Box::new(assertion));
        self
    }

    /// Check the effects of the last `when_action` (Then)
    #[must_use]
    pub fn then_effects<F>(mut self, assertion: F) -> Self
    where
        F: FnOnce(&[Effect<R::Action>]) + 'static,
    {
        self.effect_assertions.push(Box::new(assertion));
        self
    }

    /// Run every step, then every assertion
    ///
    /// # Panics
    ///
    /// Panics if the state, environment, or an action is missing, or if an
    /// assertion fails.
    #[allow(clippy::expect_used)] // Test harness
    pub async fn run(self) {
        let Self {
            reducer,
            environment,
            initial_state,
            steps,
            state_assertions,
            mut effect_assertions,
        } = self;

        let mut state = initial_state.expect("Initial state must be set with given_state()");
        let env = environment.expect("Environment must be set with with_env()");
        let last_action = steps
            .iter()
            .rposition(|step| matches!(step, Step::Action(_)))
            .expect("At least one action must be set with when_action()");

        let mut outstanding: Vec<EffectFuture<R::Action>> = Vec::new();

        for (index, step) in steps.into_iter().enumerate() {
            match step {
                Step::Action(action) => {
                    let effects = reducer.reduce(&mut state, action, &env);
                    if index == last_action {
                        for assertion in effect_assertions.drain(..) {
                            assertion(&effects);
                        }
                    }
                    outstanding.extend(futures_of(effects));
                },
                Step::Settle { reversed } => {
                    let mut batch = std::mem::take(&mut outstanding);
                    if reversed {
                        batch.reverse();
                    }
                    for fut in batch {
                        if let Some(action) = fut.await {
                            let effects = reducer.reduce(&mut state, action, &env);
                            outstanding.extend(futures_of(effects));
                        }
                    }
                },
            }
        }

        for assertion in state_assertions {
            assertion(&state);
        }
    }
}

fn futures_of<A>(effects: impl IntoIterator<Item = Effect<A>>) -> impl Iterator<Item = EffectFuture<A>> {
    effects.into_iter().filter_map(|effect| match effect {
        Effect::Future(fut) => Some(fut),
        Effect::None => None,
    })
}

/// Helper assertions for effects
pub mod assertions {
    use marketdesk_core::effect::Effect;

    /// Assert that no effect does anything
    ///
    /// # Panics
    ///
    /// Panics if any effect is not [`Effect::None`].
    pub fn assert_no_effects<A>(effects: &[Effect<A>]) {
        assert!(
            effects.iter().all(Effect::is_none),
            "Expected no effects, but found {effects:?}"
        );
    }

    /// Assert the number of effects
    ///
    /// # Panics
    ///
    /// Panics if the count differs.
    pub fn assert_effects_count<A>(effects: &[Effect<A>], expected: usize) {
        assert_eq!(
            effects.len(),
            expected,
            "Expected {expected} effects, but found {effects:?}"
        );
    }

    /// Assert that at least one effect is a future
    ///
    /// # Panics
    ///
    /// Panics if no [`Effect::Future`] is present.
    pub fn assert_has_future_effect<A>(effects: &[Effect<A>]) {
        assert!(
            effects.iter().any(|e| matches!(e, Effect::Future(_))),
            "Expected a Future effect, but found {effects:?}"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_clock;
    use futures::FutureExt;
    use futures::future::BoxFuture;
    use marketdesk_core::environment::Clock;
    use marketdesk_core::request::{AsyncState, RequestStatus};
    use marketdesk_core::slice::{SliceAction, SliceEnvironment, SliceReducer, SliceService};
    use std::sync::Arc;

    /// Echoes the param back; negative params fail with "Network Error".
    #[derive(Clone, Debug)]
    struct EchoService;

    impl SliceService for EchoService {
        const NAME: &'static str = "echo";
        type Params = i32;
        type Payload = i32;
        type Error = String;

        fn fetch(&self, params: i32) -> BoxFuture<'static, Result<i32, String>> {
            async move {
                if params < 0 {
                    Err("Network Error".to_string())
                } else {
                    Ok(params)
                }
            }
            .boxed()
        }
    }

    fn echo_test() -> ReducerTest<SliceReducer<EchoService>> {
        ReducerTest::new(SliceReducer::new())
            .with_env(SliceEnvironment::new(EchoService, Arc::new(test_clock())))
            .given_state(AsyncState::new())
    }

    #[tokio::test]
    async fn test_trigger_marks_pending_and_returns_call() {
        echo_test()
            .when_action(SliceAction::Trigger(5))
            .then_effects(|effects| {
                assertions::assert_effects_count(effects, 1);
                assertions::assert_has_future_effect(effects);
            })
            .then_state(|state| {
                assert_eq!(state.status(), RequestStatus::Pending);
                assert!(state.latest_request().is_some());
                assert_eq!(state.error(), None);
            })
            .run()
            .await;
    }

    #[tokio::test]
    async fn test_settled_trigger_succeeds() {
        echo_test()
            .when_action(SliceAction::Trigger(5))
            .when_effects_settle()
            .then_state(|state| {
                assert!(state.is_succeeded());
                assert_eq!(state.data(), Some(&5));
                assert_eq!(state.fetched_at(), Some(test_clock().now()));
                assert_eq!(state.latest_request(), None);
            })
            .run()
            .await;
    }

    #[tokio::test]
    async fn test_failure_without_prior_data() {
        echo_test()
            .when_action(SliceAction::Trigger(-1))
            .when_effects_settle()
            .then_state(|state| {
                assert_eq!(state.status(), RequestStatus::Failed);
                assert_eq!(state.data(), None);
                assert_eq!(state.error(), Some("Network Error"));
            })
            .run()
            .await;
    }

    #[tokio::test]
    async fn test_failure_keeps_cached_data() {
        echo_test()
            .when_action(SliceAction::Trigger(3))
            .when_effects_settle()
            .when_action(SliceAction::Trigger(-1))
            .when_effects_settle()
            .then_state(|state| {
                assert!(state.is_failed());
                assert_eq!(state.data(), Some(&3));
            })
            .run()
            .await;
    }

    #[tokio::test]
    async fn test_last_issued_wins_when_it_settles_first() {
        echo_test()
            .when_action(SliceAction::Trigger(1))
            .when_action(SliceAction::Trigger(2))
            .when_effects_settle_in_reverse()
            .then_state(|state| {
                assert!(state.is_succeeded());
                assert_eq!(state.data(), Some(&2));
            })
            .run()
            .await;
    }

    #[tokio::test]
    async fn test_stale_success_cannot_mask_latest_failure() {
        echo_test()
            .when_action(SliceAction::Trigger(1))
            .when_action(SliceAction::Trigger(-2))
            .when_effects_settle()
            .then_state(|state| {
                assert!(state.is_failed());
                assert_eq!(state.data(), None);
            })
            .run()
            .await;
    }

    #[tokio::test]
    async fn test_reset_discards_outstanding_request() {
        echo_test()
            .when_action(SliceAction::Trigger(7))
            .when_action(SliceAction::Reset)
            .then_effects(assertions::assert_no_effects)
            .when_effects_settle()
            .then_state(|state| {
                assert!(state.is_idle());
                assert_eq!(state.data(), None);
                assert_eq!(state.error(), None);
            })
            .run()
            .await;
    }
}
