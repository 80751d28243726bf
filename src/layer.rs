use crate::handler::Handler;
use crate::record::{Arg, Event, Value};
use std::sync::Arc;
use tracing::field::{Field, Visit};
use tracing::{Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer};
use tracing_subscriber::registry::LookupSpan;

/// `tracing_subscriber` layer that turns every `tracing` event into an
/// [`Event`] and passes it to a [`Handler`] on the emitting thread.
///
/// The `message` field becomes [`Event::message`], `file:line` becomes the
/// source, and every other field becomes an arg in recording order.
/// Fields recorded as errors become error values, so an `error = %e`
/// field and an `error = &e as &dyn Error` field both land in the
/// handler's error group. `DEBUG` and `TRACE` events are flagged as debug.
pub struct EventLayer {
    handler: Arc<dyn Handler>,
}

impl EventLayer {
    pub fn new(handler: Arc<dyn Handler>) -> Self {
        Self { handler }
    }
}

impl<S> Layer<S> for EventLayer
where
    S: Subscriber + for<'span> LookupSpan<'span>,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let meta = event.metadata();

        let mut args = Vec::new();
        let mut message = String::new();
        let mut visitor = FieldVisitor { args: &mut args, message: &mut message };
        event.record(&mut visitor);

        let source = match (meta.file(), meta.line()) {
            (Some(file), Some(line)) => format!("{}:{}", file, line),
            (Some(file), None) => file.to_string(),
            _ => String::new(),
        };

        let record = Event::new(message)
            .with_source(source)
            .with_args(args)
            .with_debug(*meta.level() >= Level::DEBUG);

        self.handler.handle_event(&record);
    }
}

pub struct FieldVisitor<'a> {
    pub args: &'a mut Vec<Arg>,
    pub message: &'a mut String,
}

impl<'a> FieldVisitor<'a> {
    fn push(&mut self, field: &Field, value: Value) {
        self.args.push(Arg { name: field.name().to_string(), value });
    }
}

impl<'a> Visit for FieldVisitor<'a> {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            *self.message = value.to_string();
        } else {
            self.push(field, Value::from(value));
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.push(field, Value::from(value));
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.push(field, Value::from(value));
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        self.push(field, Value::from(value));
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.push(field, Value::from(value));
    }

    fn record_error(&mut self, field: &Field, value: &(dyn std::error::Error + 'static)) {
        self.push(field, Value::message(value.to_string()));
    }

    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            *self.message = format!("{:?}", value);
        } else if field.name() == crate::record::ERROR_ARG {
            self.push(field, Value::message(format!("{:?}", value)));
        } else {
            self.push(field, Value::from(format!("{:?}", value)));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::Mutex;
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::Registry;

    #[derive(Default)]
    struct Capture(Mutex<Vec<Event>>);

    impl Handler for Capture {
        fn handle_event(&self, event: &Event) {
            self.0.lock().unwrap().push(event.clone());
        }
    }

    fn capture(f: impl FnOnce()) -> Vec<Event> {
        let handler = Arc::new(Capture::default());
        let subscriber = Registry::default().with(EventLayer::new(handler.clone()));
        tracing::subscriber::with_default(subscriber, f);
        let events = handler.0.lock().unwrap().clone();
        events
    }

    #[test]
    fn converts_fields_in_order() {
        let events = capture(|| {
            tracing::info!(name = "Luke", count = 3, ok = true, "Hello Luke!");
        });

        assert_eq!(events.len(), 1);
        let e = &events[0];
        assert_eq!(e.message, "Hello Luke!");
        assert!(e.source.starts_with(file!()));
        assert!(!e.debug);

        let rendered: Vec<String> =
            e.args.iter().map(|a| format!("{}={}", a.name, a.value)).collect();
        assert_eq!(rendered, vec!["name=Luke", "count=3", "ok=true"]);
    }

    #[test]
    fn error_fields_become_error_values() {
        let err = io::Error::new(io::ErrorKind::UnexpectedEof, "EOF");
        let events = capture(|| {
            tracing::warn!(error = &err as &dyn std::error::Error, "read failed");
            tracing::warn!(error = %err, "read failed");
        });

        for e in &events {
            let errors: Vec<String> = e.errors().map(|v| v.to_string()).collect();
            assert_eq!(errors, vec!["EOF"]);
            assert!(e.args[0].value.is_error());
        }
    }

    #[test]
    fn debug_and_trace_are_flagged() {
        let events = capture(|| {
            tracing::debug!("d");
            tracing::trace!("t");
            tracing::error!("e");
        });
        let flags: Vec<bool> = events.iter().map(|e| e.debug).collect();
        assert_eq!(flags, vec![true, true, false]);
    }
}
