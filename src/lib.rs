pub mod record;
pub mod handler;
pub mod text;

#[cfg(feature = "ecs")]
pub mod ecs;

pub mod env;
pub mod init;
pub mod layer;
pub mod logger;
pub mod noop;
pub mod terminal;

pub use handler::Handler;
pub use logger::Logger;
pub use record::{Arg, Event, Value};
pub use text::TextHandler;
