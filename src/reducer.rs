/// Computes the next state from the current one and an action.
///
/// `state` is `None` only for the very first call, made by [`crate::Store::new`]
/// with the default ("empty") action; the reducer must answer it with its
/// initial state. Implementations must be pure: never mutate anything reachable
/// from `state`, always return the same result for the same input.
pub trait Reducer<State, Action> {
    fn reduce(&self, state: Option<&State>, action: &Action) -> anyhow::Result<State>;
}

impl<State, Action, F> Reducer<State, Action> for F
where
    F: Fn(Option<&State>, &Action) -> anyhow::Result<State>,
{
    fn reduce(&self, state: Option<&State>, action: &Action) -> anyhow::Result<State> {
        self(state, action)
    }
}
