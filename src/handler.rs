use crate::record::Event;
use std::sync::Arc;

/// Destination for [`Event`]s.
///
/// Implementations render or ship the event synchronously on the calling
/// thread. Handling cannot fail from the caller's point of view: a handler
/// that hits an I/O error drops it, since reporting it would have to go
/// through logging again.
pub trait Handler: Send + Sync {
    /// Handle a single event.
    ///
    /// **Parameters**
    /// - `event`: the event to render; handlers only borrow it.
    fn handle_event(&self, event: &Event);
}

impl<H: Handler + ?Sized> Handler for Arc<H> {
    fn handle_event(&self, event: &Event) {
        (**self).handle_event(event)
    }
}

impl<H: Handler + ?Sized> Handler for Box<H> {
    fn handle_event(&self, event: &Event) {
        (**self).handle_event(event)
    }
}
