use std::io;

use chrono::{DateTime, Local, NaiveDate};
use structured_events::{Event, Handler, TextHandler, Value};

fn luke_event() -> Event {
    let time: DateTime<Local> = NaiveDate::from_ymd_opt(2017, 1, 1)
        .unwrap()
        .and_hms_milli_opt(23, 42, 0, 123)
        .unwrap()
        .and_local_timezone(Local)
        .unwrap();

    Event::new("Hello Luke!")
        .with_source("path/to/file.go:18")
        .with_arg("name", "Luke")
        .with_arg("from", "Han")
        .with_arg("error", io::Error::new(io::ErrorKind::UnexpectedEof, "EOF"))
        .with_time(time)
        .with_debug(true)
}

fn render(enable_args: bool, event: &Event) -> String {
    let handler = TextHandler::new("==> ", Vec::new()).with_args(enable_args);
    handler.handle_event(event);
    String::from_utf8(handler.into_output()).unwrap()
}

#[test]
fn enable_args_true() {
    assert_eq!(
        render(true, &luke_event()),
        "==> 2017-01-01 23:42:00.123 - path/to/file.go:18 - Hello Luke!\n\
         \tname: Luke\n\
         \tfrom: Han\n\
         \terrors:\n\
         \t\t- EOF\n"
    );
}

#[test]
fn enable_args_false() {
    assert_eq!(
        render(false, &luke_event()),
        "==> 2017-01-01 23:42:00.123 - path/to/file.go:18 - Hello Luke!\n"
    );
}

#[test]
fn multiple_errors_share_one_block() {
    let event = Event::new("failed")
        .with_arg("error", Value::message("a"))
        .with_arg("error", Value::message("b"));
    let handler = TextHandler::new("", Vec::new()).without_time().with_args(true);
    handler.handle_event(&event);

    let out = String::from_utf8(handler.into_output()).unwrap();
    assert_eq!(out, "failed\n\terrors:\n\t\t- a\n\t\t- b\n");
    assert_eq!(out.matches("errors:").count(), 1);
}

#[test]
fn rendering_is_repeatable() {
    let event = luke_event();
    let handler = TextHandler::new("==> ", Vec::new()).with_args(true);
    handler.handle_event(&event);
    handler.handle_event(&event);

    let out = handler.into_output();
    let (first, second) = out.split_at(out.len() / 2);
    assert_eq!(first, second);
}
