//! Cart Observer

use tracing::info;

use crate::cart::CartEvent;

/// Observer notified after every cart mutation.
///
/// Front-ends implement this to redraw or to show the acknowledgment that
/// follows an add. The cart itself never calls observers; the session does,
/// once the mutation has been applied.
pub trait CartObserver {
    /// Called after a line was added or the cart was cleared.
    fn on_cart_event(&mut self, event: &CartEvent);
}

/// Observer that ignores every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl CartObserver for NoopObserver {
    fn on_cart_event(&mut self, _event: &CartEvent) {}
}

/// Observer that logs each acknowledgment.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl CartObserver for TracingObserver {
    fn on_cart_event(&mut self, event: &CartEvent) {
        info!(%event, "cart updated");
    }
}

/// Observer that keeps every event, in order.
#[derive(Debug, Default, Clone)]
pub struct RecordingObserver {
    events: Vec<CartEvent>,
}

impl RecordingObserver {
    /// Events seen so far.
    pub fn events(&self) -> &[CartEvent] {
        &self.events
    }
}

impl CartObserver for RecordingObserver {
    fn on_cart_event(&mut self, event: &CartEvent) {
        self.events.push(event.clone());
    }
}

impl<O: CartObserver + ?Sized> CartObserver for &mut O {
    fn on_cart_event(&mut self, event: &CartEvent) {
        (**self).on_cart_event(event);
    }
}
