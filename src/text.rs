use crate::handler::Handler;
use crate::record::{Arg, Event};
use chrono::{DateTime, Local, SecondsFormat};
use std::fmt::Write as _;
use std::io::{self, Write};
use std::sync::{Mutex, PoisonError};

/// Default layout for the timestamp segment, e.g. `2017-01-01 23:42:00.123`.
pub const DEFAULT_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// Handler that renders events as human-readable text.
///
/// The first line is
/// `<prefix><time> - <source> - <message>`, where the time and source
/// segments (with their separators) are dropped when disabled or empty.
/// With `enable_args` set, each non-error arg follows on its own
/// tab-indented line, then all args named `"error"` are grouped under a
/// single `errors:` block:
///
/// ```text
/// ==> 2017-01-01 23:42:00.123 - src/main.rs:18 - Hello Luke!
///     name: Luke
///     errors:
///         - EOF
/// ```
///
/// Configuration fields are plain public fields; set them before the
/// handler starts receiving events.
pub struct TextHandler<W> {
    /// Prepended to the first line of every event.
    pub prefix: String,
    /// Render the event args below the message line.
    pub enable_args: bool,
    /// chrono `strftime` layout for the event time; empty omits the time.
    pub time_format: String,
    output: Mutex<W>,
}

impl<W: Write + Send> TextHandler<W> {
    /// Create a handler writing to `output`.
    ///
    /// Args are disabled and the time uses [`DEFAULT_TIME_FORMAT`].
    pub fn new(prefix: impl Into<String>, output: W) -> Self {
        TextHandler {
            prefix: prefix.into(),
            enable_args: false,
            time_format: DEFAULT_TIME_FORMAT.to_string(),
            output: Mutex::new(output),
        }
    }

    pub fn with_args(mut self, enable: bool) -> Self {
        self.enable_args = enable;
        self
    }

    pub fn with_time_format(mut self, format: impl Into<String>) -> Self {
        self.time_format = format.into();
        self
    }

    /// Drop the timestamp segment from every line.
    pub fn without_time(self) -> Self {
        self.with_time_format("")
    }

    /// Consume the handler and give back its sink.
    pub fn into_output(self) -> W {
        self.output.into_inner().unwrap_or_else(PoisonError::into_inner)
    }

    /// Render `event` into `buf` exactly as [`Handler::handle_event`] would
    /// write it.
    pub fn render(&self, event: &Event, buf: &mut String) {
        buf.push_str(&self.prefix);

        if !self.time_format.is_empty() {
            buf.push_str(&format_time(&event.time, &self.time_format));
            buf.push_str(" - ");
        }

        if !event.source.is_empty() {
            buf.push_str(&event.source);
            buf.push_str(" - ");
        }

        buf.push_str(&event.message);
        buf.push('\n');

        if !self.enable_args || event.args.is_empty() {
            return;
        }

        let mut errors: Vec<&Arg> = Vec::new();

        for arg in &event.args {
            if arg.is_error() {
                errors.push(arg);
                continue;
            }
            let _ = writeln!(buf, "\t{}: {}", arg.name, arg.value);
        }

        if !errors.is_empty() {
            buf.push_str("\terrors:\n");
            for arg in errors {
                let _ = writeln!(buf, "\t\t- {}", arg.value);
            }
        }
    }
}

impl<W: Write + Send> Handler for TextHandler<W> {
    fn handle_event(&self, event: &Event) {
        let mut buf = String::with_capacity(128);
        self.render(event, &mut buf);

        let mut output = self.output.lock().unwrap_or_else(PoisonError::into_inner);
        let _ = write_line(&mut *output, &buf);
    }
}

fn write_line<W: Write + ?Sized>(output: &mut W, buf: &str) -> io::Result<()> {
    output.write_all(buf.as_bytes())?;
    output.flush()
}

/// Format `time` with a strftime layout. A layout chrono cannot interpret
/// falls back to RFC 3339 with milliseconds.
fn format_time(time: &DateTime<Local>, layout: &str) -> String {
    let mut out = String::new();
    if write!(out, "{}", time.format(layout)).is_err() {
        return time.to_rfc3339_opts(SecondsFormat::Millis, false);
    }
    out
}
