use std::sync::Arc;

use structured_events::{Arg, Event, Handler, Logger};

/// Example of integrating a completely custom destination by implementing
/// the `Handler` trait directly. Here we only print the event as JSON, but
/// the same shape fits a message queue or a database client.
struct JsonPrinter;

impl Handler for JsonPrinter {
    fn handle_event(&self, event: &Event) {
        match serde_json::to_string(event) {
            Ok(line) => println!("[json-printer] {}", line),
            Err(e) => eprintln!("[json-printer] dropped event: {}", e),
        }
    }
}

fn main() {
    let logger = Logger::new(Arc::new(JsonPrinter));

    logger.log("custom handler example started", []);
    logger.log("simulated failure", [Arg::new("db", "my-custom-db"), Arg::new("retries", 3)]);
}
