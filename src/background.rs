/// Background service worker: subscribes the badge synchronizer and the
/// discussion launcher to browser events
use std::rc::Rc;

use log::debug;

use crate::host::{BadgeSink, CountsClient, HostEvents, LocalTask, TabHost};
use crate::launcher::DiscussionLauncher;
use crate::sync::BadgeSynchronizer;

/// Hands event work to the host's event loop
pub type Spawner = Rc<dyn Fn(LocalTask)>;

/// Register both components. Each event becomes one task on `spawn`.
pub fn attach<E, C, B, H>(
    events: &E,
    synchronizer: Rc<BadgeSynchronizer<C, B>>,
    launcher: Rc<DiscussionLauncher<H>>,
    spawn: Spawner,
) where
    E: HostEvents,
    C: CountsClient + 'static,
    B: BadgeSink + 'static,
    H: TabHost + 'static,
{
    let spawn_sync = spawn.clone();
    events.on_tab_url_changed(Box::new(move |event| {
        let synchronizer = synchronizer.clone();
        spawn_sync(Box::pin(async move {
            let tab_id = event.tab_id;
            let outcome = synchronizer.on_tab_url_changed(event).await;
            debug!("Badge update for tab {}: {:?}", tab_id, outcome);
        }));
    }));

    events.on_action_invoked(Box::new(move || {
        let launcher = launcher.clone();
        spawn(Box::pin(async move {
            let (outcome, opened) = launcher.on_action_invoked().await;
            debug!("Action handled: {:?}, {} tab(s) opened", outcome, opened);
        }));
    }));
}
