//! Change notification for bound UI widgets.
//!
//! Listeners are called synchronously on the caller's thread, after the
//! model's cached parameters already agree with the layer transform.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use manreg_core::spatial::VoxelIndex;

use crate::layer::LayerId;

/// Something observable about the model changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelEvent {
    /// The moving layer selection changed (or was dropped).
    MovingLayerChanged { layer: Option<LayerId> },
    /// Euler angles, translation or translation range of a layer were
    /// re-derived.
    ParametersChanged { layer: LayerId },
    /// The rotation center moved.
    RotationCenterChanged { center: VoxelIndex<3> },
    /// The interactive tool was toggled.
    InteractiveToolChanged { enabled: bool },
}

/// Receives model events.
pub trait ModelListener {
    fn on_event(&self, event: &ModelEvent);
}

impl<F> ModelListener for F
where
    F: Fn(&ModelEvent),
{
    fn on_event(&self, event: &ModelEvent) {
        self(event)
    }
}

/// Handle for a registered listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Ordered list of listeners.
#[derive(Default)]
pub struct Notifier {
    listeners: Vec<(SubscriptionId, Rc<dyn ModelListener>)>,
    next_id: u64,
}

impl Notifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener; it is called after previously registered ones.
    pub fn subscribe(&mut self, listener: Rc<dyn ModelListener>) -> SubscriptionId {
        self.next_id += 1;
        let id = SubscriptionId(self.next_id);
        self.listeners.push((id, listener));
        id
    }

    /// Remove a listener. Returns whether it was registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sid, _)| *sid != id);
        before != self.listeners.len()
    }

    pub fn notify(&self, event: ModelEvent) {
        tracing::trace!(?event, listeners = self.listeners.len(), "notify");
        for (_, listener) in &self.listeners {
            listener.on_event(&event);
        }
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

impl fmt::Debug for Notifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Notifier")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

/// Listener that records every event, for polling UIs and tests.
#[derive(Debug, Clone, Default)]
pub struct EventHistory {
    events: Rc<RefCell<Vec<ModelEvent>>>,
}

impl EventHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Events recorded so far.
    pub fn events(&self) -> Vec<ModelEvent> {
        self.events.borrow().clone()
    }

    /// Return and forget the recorded events.
    pub fn take(&self) -> Vec<ModelEvent> {
        std::mem::take(&mut *self.events.borrow_mut())
    }

    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }

    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }
}

impl ModelListener for EventHistory {
    fn on_event(&self, event: &ModelEvent) {
        self.events.borrow_mut().push(*event);
    }
}

/// Listener that logs events through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingListener;

impl ModelListener for LoggingListener {
    fn on_event(&self, event: &ModelEvent) {
        match event {
            ModelEvent::MovingLayerChanged { layer: Some(id) } => {
                tracing::info!("Moving layer: {}", id)
            }
            ModelEvent::MovingLayerChanged { layer: None } => tracing::info!("Moving layer: none"),
            ModelEvent::ParametersChanged { layer } => {
                tracing::info!("Manual parameters updated for {}", layer)
            }
            ModelEvent::RotationCenterChanged { center } => {
                tracing::info!("Rotation center: {:?}", center.0)
            }
            ModelEvent::InteractiveToolChanged { enabled } => {
                tracing::info!("Interactive tool {}", if *enabled { "on" } else { "off" })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_history_records_in_order() {
        let history = EventHistory::new();
        let mut notifier = Notifier::new();
        notifier.subscribe(Rc::new(history.clone()));

        notifier.notify(ModelEvent::MovingLayerChanged { layer: Some(LayerId(1)) });
        notifier.notify(ModelEvent::ParametersChanged { layer: LayerId(1) });

        assert_eq!(
            history.take(),
            vec![
                ModelEvent::MovingLayerChanged { layer: Some(LayerId(1)) },
                ModelEvent::ParametersChanged { layer: LayerId(1) },
            ]
        );
        assert!(history.is_empty());
    }

    #[test]
    fn test_closure_listener_and_unsubscribe() {
        let count = Rc::new(Cell::new(0));
        let counter = Rc::clone(&count);
        let mut notifier = Notifier::new();
        let id = notifier.subscribe(Rc::new(move |_: &ModelEvent| counter.set(counter.get() + 1)));

        notifier.notify(ModelEvent::InteractiveToolChanged { enabled: true });
        assert_eq!(count.get(), 1);

        assert!(notifier.unsubscribe(id));
        assert!(!notifier.unsubscribe(id));
        notifier.notify(ModelEvent::InteractiveToolChanged { enabled: false });
        assert_eq!(count.get(), 1);
        assert!(notifier.is_empty());
    }

    #[test]
    fn test_logging_listener_handles_all_events() {
        let listener = LoggingListener;
        listener.on_event(&ModelEvent::MovingLayerChanged { layer: None });
        listener.on_event(&ModelEvent::RotationCenterChanged { center: VoxelIndex::new([1, 2, 3]) });
    }
}
