use crate::handler::Handler;
use crate::record::{Arg, Event};
use std::panic::Location;
use std::sync::Arc;

/// Front end that builds [`Event`]s and passes them to a handler.
///
/// A `Logger` is an explicit dependency: construct one from the handler
/// chosen at startup and hand it (or clones of it) to the code that logs.
#[derive(Clone)]
pub struct Logger {
    handler: Arc<dyn Handler>,
    /// Prepended to the args of every event logged through this logger.
    pub args: Vec<Arg>,
    /// Fill [`Event::source`] from the caller's location.
    pub enable_source: bool,
}

impl Logger {
    pub fn new(handler: Arc<dyn Handler>) -> Self {
        Logger { handler, args: Vec::new(), enable_source: true }
    }

    pub fn handler(&self) -> &Arc<dyn Handler> {
        &self.handler
    }

    /// Derive a logger that also attaches `args` to every event.
    pub fn with_args(&self, args: impl IntoIterator<Item = Arg>) -> Self {
        let mut child = self.clone();
        child.args.extend(args);
        child
    }

    #[track_caller]
    pub fn log(&self, message: impl Into<String>, args: impl IntoIterator<Item = Arg>) {
        self.emit(message.into(), args, false, Location::caller());
    }

    #[track_caller]
    pub fn debug(&self, message: impl Into<String>, args: impl IntoIterator<Item = Arg>) {
        self.emit(message.into(), args, true, Location::caller());
    }

    fn emit(
        &self,
        message: String,
        args: impl IntoIterator<Item = Arg>,
        debug: bool,
        caller: &Location<'_>,
    ) {
        let mut event = Event::new(message)
            .with_args(self.args.iter().cloned())
            .with_args(args)
            .with_debug(debug);

        if self.enable_source {
            event.source = format!("{}:{}", caller.file(), caller.line());
        }

        self.handler.handle_event(&event);
    }
}
