use std::io;
use std::sync::Arc;

use structured_events::text::TextHandler;
use structured_events::{source, Arg, Event, Handler, Logger, Value};

fn main() {
    let handler = TextHandler::new("==> ", io::stderr()).with_args(true);

    handler.handle_event(
        &Event::new("Hello Luke!")
            .with_source(source!())
            .with_arg("name", "Luke")
            .with_arg("from", "Han")
            .with_arg("error", Value::from(io::Error::new(io::ErrorKind::UnexpectedEof, "EOF"))),
    );

    let logger = Logger::new(Arc::new(handler)).with_args([Arg::new("service", "demo")]);
    logger.log("shared logger args come first", [Arg::new("attempt", 2)]);
}
