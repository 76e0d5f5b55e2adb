//! Replays the tally counter scenarios against a store.
//!
//! Actions are taken from the command line (`ADD`, `SUBTRACT`, `RESET`, anything
//! else is ignored by the reducer). Without arguments the default scenarios run.
//! Set `RUST_LOG=debug` to see the store's own logging.

use tally_store::tally::{TallyAction, TallyReducer};
use tally_store::Store;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let store: Store<i64, TallyAction> = Store::new(TallyReducer)?;

    let weak = store.downgrade();
    let subscription = store.subscribe(move || {
        if let Some(store) = weak.upgrade() {
            println!("State: {}", store.get_state());
        }
    });

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.is_empty() {
        println!("Scenario 1");
        println!("Initial State: {}", store.get_state());

        println!("Scenario 2");
        store.dispatch(TallyAction::Add)?;
        store.dispatch(TallyAction::Add)?;

        println!("Scenario 3");
        store.dispatch(TallyAction::Subtract)?;

        println!("Scenario 4");
        store.dispatch(TallyAction::Reset)?;
    } else {
        println!("Initial State: {}", store.get_state());
        for kind in &args {
            store.dispatch(TallyAction::from_type(kind))?;
        }
    }

    subscription.unsubscribe();
    Ok(())
}
