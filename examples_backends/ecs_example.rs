use std::io;
use std::sync::Arc;

use structured_events::ecs::EcsHandler;
use structured_events::init::program_name;
use structured_events::{Arg, Logger, Value};

/// Writes JSON lines to stdout, the way the default handler does when
/// stdout is redirected to a file or a container log collector.
fn main() {
    let handler = EcsHandler::new(io::stdout(), program_name(), std::process::id());
    let logger = Logger::new(Arc::new(handler));

    logger.log("service started", [Arg::new("port", 8080)]);
    logger.debug(
        "cache miss",
        [Arg::new("key", "user:42"), Arg::new("error", Value::message("not found"))],
    );
}
