use tokio::sync::broadcast;

/// Async side channel for state changes.
///
/// One `()` is published after the listener pass of every successful
/// dispatch. Slow receivers may observe `RecvError::Lagged`.
pub trait ChangeObserver {
    fn observe(&self) -> broadcast::Receiver<()>;
}
