use crate::handler::Handler;
use crate::record::Event;

/// A handler that simply drops all events.
///
/// Useful for measuring the overhead of building events and dispatching
/// them without any I/O, and for tests that don't care about output.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopHandler;

impl Handler for NoopHandler {
    fn handle_event(&self, _event: &Event) {}
}
