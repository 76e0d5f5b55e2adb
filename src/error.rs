/// Errors surfaced by [`crate::Store`] operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The reducer failed while computing the initial or the next state.
    /// The stored state is left untouched.
    #[error("reducer failed: {0}")]
    Reducer(#[source] anyhow::Error),

    /// `dispatch` was called from a listener or reducer of the same store
    /// while a dispatch was already running on this thread.
    #[error("dispatch called while the store is already dispatching")]
    NestedDispatch,
}

pub type StoreResult<T> = Result<T, StoreError>;
