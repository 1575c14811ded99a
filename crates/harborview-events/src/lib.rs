use crossbeam_channel::{Receiver, Sender, unbounded};
use harborview_core::Registry;
use serde::{Deserialize, Serialize};

/// The three independent overlay toggles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Toggle {
    Ports,
    Volumes,
    Dependencies,
}

/// External triggers the topology core reacts to.
///
/// `RegistryChanged` and `ViewChanged` cause a full synchronous rebuild
/// of the graph and a fresh simulation; the rest are incremental and only
/// touch positions or overlay state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    RegistryChanged {
        registry: Registry,
    },
    /// The active view was reselected; rebuild it from the current
    /// registry.
    ViewChanged,
    ToggleChanged {
        toggle: Toggle,
        enabled: bool,
    },
    ViewportResized {
        width: f32,
        height: f32,
    },
    /// One simulation step, driven by an external clock.
    Tick,
}

#[derive(Clone)]
pub struct EventBus {
    tx: Sender<Event>,
    rx: Receiver<Event>,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventBus {
    pub fn new() -> Self {
        let (tx, rx) = unbounded();
        Self { tx, rx }
    }

    pub fn sender(&self) -> Sender<Event> {
        self.tx.clone()
    }

    pub fn receiver(&self) -> Receiver<Event> {
        self.rx.clone()
    }

    pub fn publish(&self, event: Event) {
        let _ = self.tx.send(event);
    }

    /// Dispatch all pending events to a listener, in publish order.
    /// Events are handled one at a time on the calling thread, so a
    /// rebuild triggered by one event is complete before the next event
    /// (a tick, say) is observed.
    pub fn dispatch_to<L: EventListener>(&self, listener: &mut L) {
        while let Ok(event) = self.rx.try_recv() {
            listener.handle_event(&event);
        }
    }
}

/// Trait for components that respond to events.
pub trait EventListener {
    fn handle_event(&mut self, event: &Event);
}
