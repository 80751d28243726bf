use crate::handler::Handler;
use crate::record::Event;
use chrono::SecondsFormat;
use serde::Serialize;
use std::io::Write;
use std::sync::{Mutex, PoisonError};

/// Handler writing one JSON object per line, for output that is
/// collected by a container runtime rather than read on a terminal.
///
/// Each line has the shape:
///
/// ```text
/// {"level":"INFO","time":"2017-01-01T23:42:00.123+00:00",
///  "info":{"source":"src/main.rs:18","program":"app","pid":42,"errors":[{"error":"EOF"}]},
///  "data":{"name":"Luke"},"message":"Hello Luke!"}
/// ```
pub struct EcsHandler<W> {
    /// Base name of the running program.
    pub program: String,
    pub pid: u32,
    output: Mutex<W>,
}

impl<W: Write + Send> EcsHandler<W> {
    pub fn new(output: W, program: impl Into<String>, pid: u32) -> Self {
        EcsHandler {
            program: program.into(),
            pid,
            output: Mutex::new(output),
        }
    }

    /// Consume the handler and give back its sink.
    pub fn into_output(self) -> W {
        self.output.into_inner().unwrap_or_else(PoisonError::into_inner)
    }

    fn map_event<'a>(&'a self, event: &'a Event) -> EcsRow<'a> {
        let mut data = serde_json::Map::new();
        let mut errors = Vec::new();

        for arg in &event.args {
            if arg.is_error() {
                errors.push(EcsError { error: arg.value.to_string() });
            } else if let Ok(value) = serde_json::to_value(&arg.value) {
                data.insert(arg.name.clone(), value);
            }
        }

        EcsRow {
            level: if event.debug { "DEBUG" } else { "INFO" },
            time: event.time.to_rfc3339_opts(SecondsFormat::Millis, false),
            info: EcsInfo {
                source: &event.source,
                program: &self.program,
                pid: self.pid,
                errors,
            },
            data,
            message: &event.message,
        }
    }
}

#[derive(Serialize)]
struct EcsRow<'a> {
    level: &'static str,
    time: String,
    info: EcsInfo<'a>,
    data: serde_json::Map<String, serde_json::Value>,
    message: &'a str,
}

#[derive(Serialize)]
struct EcsInfo<'a> {
    #[serde(skip_serializing_if = "is_blank")]
    source: &'a str,
    #[serde(skip_serializing_if = "is_blank")]
    program: &'a str,
    pid: u32,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    errors: Vec<EcsError>,
}

fn is_blank(s: &&str) -> bool {
    s.is_empty()
}

#[derive(Serialize)]
struct EcsError {
    error: String,
}

impl<W: Write + Send> Handler for EcsHandler<W> {
    fn handle_event(&self, event: &Event) {
        let row = self.map_event(event);
        let mut line = match serde_json::to_vec(&row) {
            Ok(line) => line,
            Err(_) => return,
        };
        line.push(b'\n');

        let mut output = self.output.lock().unwrap_or_else(PoisonError::into_inner);
        let _ = output.write_all(&line).and_then(|_| output.flush());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Value;
    use chrono::{Local, NaiveDate};

    fn handle(event: &Event) -> serde_json::Value {
        let h = EcsHandler::new(Vec::new(), "app", 42);
        h.handle_event(event);
        let out = String::from_utf8(h.into_output()).unwrap();
        assert!(out.ends_with('\n'));
        assert_eq!(out.matches('\n').count(), 1);
        serde_json::from_str(out.trim_end()).unwrap()
    }

    #[test]
    fn renders_one_json_line_per_event() {
        let time = NaiveDate::from_ymd_opt(2017, 1, 1)
            .unwrap()
            .and_hms_milli_opt(23, 42, 0, 123)
            .unwrap()
            .and_local_timezone(Local)
            .unwrap();
        let event = Event::new("Hello Luke!")
            .with_source("src/main.rs:18")
            .with_time(time)
            .with_arg("name", "Luke")
            .with_arg("count", 2)
            .with_arg("error", Value::message("EOF"));

        let json = handle(&event);
        assert_eq!(json["level"], "INFO");
        assert_eq!(json["message"], "Hello Luke!");
        assert_eq!(json["info"]["source"], "src/main.rs:18");
        assert_eq!(json["info"]["program"], "app");
        assert_eq!(json["info"]["pid"], 42);
        assert_eq!(json["info"]["errors"][0]["error"], "EOF");
        assert_eq!(json["data"]["name"], "Luke");
        assert_eq!(json["data"]["count"], 2);
        assert!(json["data"].get("error").is_none());
        assert!(json["time"].as_str().unwrap().starts_with("2017-01-01T23:42:00.123"));
    }

    #[test]
    fn debug_events_use_debug_level() {
        let json = handle(&Event::new("m").with_debug(true));
        assert_eq!(json["level"], "DEBUG");
    }

    #[test]
    fn empty_fields_are_omitted() {
        let json = handle(&Event::new("m"));
        assert!(json["info"].get("source").is_none());
        assert!(json["info"].get("errors").is_none());
        assert_eq!(json["data"], serde_json::json!({}));
    }
}
