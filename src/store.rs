use std::cell::Cell;
use std::sync::{Arc, Weak};

use parking_lot::{ReentrantMutex, RwLock};
use tokio::sync::broadcast;

use crate::change_observer::ChangeObserver;
use crate::error::{StoreError, StoreResult};
use crate::listener::{ListenerRegistry, Subscription};
use crate::reducer::Reducer;

const CHANGE_CHANNEL_CAPACITY: usize = 64;

/// Holds one state value, runs every dispatched action through the reducer
/// and then notifies listeners synchronously.
///
/// `Store` is a handle: clones share the same state and listeners, while two
/// stores built with [`Store::new`] are fully independent.
///
/// A listener that panics unwinds out of [`Store::dispatch`]. The new state is
/// already in place at that point, the listeners after it in that pass are
/// skipped and the store stays usable.
pub struct Store<State, Action> {
    inner: Arc<StoreInner<State, Action>>,
}

/// Non-owning handle, for listeners that need to read their own store.
pub struct WeakStore<State, Action> {
    inner: Weak<StoreInner<State, Action>>,
}

struct StoreInner<State, Action> {
    // Serializes dispatches. Reentrant so the dispatching thread can detect
    // a nested dispatch instead of deadlocking on it.
    gate: ReentrantMutex<Cell<bool>>,
    state: RwLock<Arc<State>>,
    reducer: Box<dyn Reducer<State, Action> + Send + Sync>,
    listeners: Arc<ListenerRegistry>,
    changes: broadcast::Sender<()>,
}

struct DispatchingFlag<'a>(&'a Cell<bool>);

impl Drop for DispatchingFlag<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

impl<State, Action> Store<State, Action>
where
    State: Send + Sync + 'static,
    Action: std::fmt::Debug,
{
    /// Builds the store and computes the initial state with
    /// `reducer.reduce(None, &Action::default())`.
    pub fn new<R>(reducer: R) -> StoreResult<Self>
    where
        R: Reducer<State, Action> + Send + Sync + 'static,
        Action: Default,
    {
        let initial = reducer
            .reduce(None, &Action::default())
            .map_err(StoreError::Reducer)?;
        let (changes, _) = broadcast::channel(CHANGE_CHANNEL_CAPACITY);

        Ok(Self {
            inner: Arc::new(StoreInner {
                gate: ReentrantMutex::new(Cell::new(false)),
                state: RwLock::new(Arc::new(initial)),
                reducer: Box::new(reducer),
                listeners: Arc::new(ListenerRegistry::new()),
                changes,
            }),
        })
    }

    pub fn get_state(&self) -> Arc<State> {
        self.inner.state.read().clone()
    }

    /// Runs `action` through the reducer, stores the result and calls every
    /// listener registered when the call started, in subscription order.
    ///
    /// On reducer failure the state is unchanged and no listener runs.
    pub fn dispatch(&self, action: Action) -> StoreResult<()> {
        let gate = self.inner.gate.lock();
        if gate.get() {
            log::warn!("Rejecting nested dispatch of {:?}", action);
            return Err(StoreError::NestedDispatch);
        }
        gate.set(true);
        let _dispatching = DispatchingFlag(&*gate);

        log::debug!("Dispatching {:?}", action);
        let current = self.get_state();
        let next = match self.inner.reducer.reduce(Some(current.as_ref()), &action) {
            Ok(next) => next,
            Err(err) => {
                log::warn!("Reducer failed on {:?}: {:#}", action, err);
                return Err(StoreError::Reducer(err));
            }
        };
        *self.inner.state.write() = Arc::new(next);

        for listener in self.inner.listeners.snapshot() {
            listener();
        }

        // No receivers is fine, nobody is observing asynchronously.
        let _ = self.inner.changes.send(());
        Ok(())
    }

    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn() + Send + Sync + 'static,
    {
        let id = self.inner.listeners.insert(Arc::new(listener));
        log::trace!("Subscribed listener {:?}", id);
        Subscription::new(&self.inner.listeners, id)
    }

    pub fn listener_count(&self) -> usize {
        self.inner.listeners.len()
    }

    pub fn downgrade(&self) -> WeakStore<State, Action> {
        WeakStore {
            inner: Arc::downgrade(&self.inner),
        }
    }
}

impl<State, Action> WeakStore<State, Action> {
    pub fn upgrade(&self) -> Option<Store<State, Action>> {
        self.inner.upgrade().map(|inner| Store { inner })
    }
}

impl<State, Action> Clone for Store<State, Action> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<State, Action> Clone for WeakStore<State, Action> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<State, Action> ChangeObserver for Store<State, Action> {
    fn observe(&self) -> broadcast::Receiver<()> {
        self.inner.changes.subscribe()
    }
}

impl<State, Action> std::fmt::Debug for Store<State, Action>
where
    State: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("state", &*self.inner.state.read())
            .field("listeners", &self.inner.listeners.len())
            .finish()
    }
}
