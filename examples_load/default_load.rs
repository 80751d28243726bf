use std::sync::Arc;
use std::time::Instant;

use structured_events::noop::NoopHandler;
use structured_events::text::TextHandler;
use structured_events::{Arg, Handler, Logger};

fn run(label: &str, handler: Arc<dyn Handler>, n: u64) {
    let logger = Logger::new(handler);
    let start = Instant::now();

    for i in 0..n {
        logger.log(
            "Hello Luke!",
            [Arg::new("name", "Luke"), Arg::new("from", "Han"), Arg::new("iteration", i)],
        );
    }

    let elapsed = start.elapsed();
    println!("{}: handled {} events in {:?} (~{:.0} ev/s)",
        label,
        n,
        elapsed,
        n as f64 / elapsed.as_secs_f64()
    );
}

fn main() {
    let n: u64 = 100_000;

    run("noop", Arc::new(NoopHandler), n);
    run(
        "text (discard)",
        Arc::new(TextHandler::new("", std::io::sink()).with_args(true)),
        n,
    );
}
