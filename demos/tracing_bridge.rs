use structured_events::init::init;
use tracing::{debug, error, info};

/// Picks the default handler the way a service binary would: text on
/// stderr when attached to a terminal, JSON lines on stdout otherwise.
/// Try `cargo run --example tracing_bridge | cat` to see the second form.
fn main() {
    let logger = match init() {
        Ok(logger) => logger,
        Err(e) => {
            eprintln!("failed to initialize logging: {}", e);
            return;
        }
    };

    logger.log("logging initialized", []);

    info!(version = env!("CARGO_PKG_VERSION"), "starting service");
    debug!(path = "/etc/app.toml", "loaded configuration");
    error!(
        user_id = 42,
        error = %"invalid password",
        "authentication failed"
    );
}
