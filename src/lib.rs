mod change_observer;
mod error;
mod listener;
mod reducer;
mod store;
pub mod tally;

pub use change_observer::ChangeObserver;
pub use error::{StoreError, StoreResult};
pub use listener::{ListenerId, Subscription};
pub use reducer::Reducer;
pub use store::{Store, WeakStore};
