use chrono::{DateTime, Local};
use serde::ser::{SerializeSeq, SerializeStruct};
use serde::{Serialize, Serializer};
use std::error::Error;
use std::fmt;
use std::sync::Arc;

/// Name under which args are treated as errors by the handlers.
pub const ERROR_ARG: &str = "error";

/// Expands to the `"file:line"` of the invocation, suitable for
/// [`Event::with_source`].
#[macro_export]
macro_rules! source {
    () => {
        concat!(file!(), ":", line!())
    };
}

/// A single structured log event.
///
/// Events are built by caller code and handed to a
/// [`Handler`](crate::handler::Handler) by reference; handlers never
/// modify them.
#[derive(Debug, Clone)]
pub struct Event {
    pub message: String,
    /// Conventionally `"path:line"`; empty when unknown.
    pub source: String,
    pub args: Vec<Arg>,
    pub time: DateTime<Local>,
    pub debug: bool,
}

impl Event {
    /// Create an event stamped with the current local time.
    pub fn new(message: impl Into<String>) -> Self {
        Event {
            message: message.into(),
            source: String::new(),
            args: Vec::new(),
            time: Local::now(),
            debug: false,
        }
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    pub fn with_arg(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.args.push(Arg::new(name, value));
        self
    }

    pub fn with_args(mut self, args: impl IntoIterator<Item = Arg>) -> Self {
        self.args.extend(args);
        self
    }

    pub fn with_time(mut self, time: DateTime<Local>) -> Self {
        self.time = time;
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Values of every arg named `"error"`, in their original order.
    pub fn errors(&self) -> impl Iterator<Item = &Value> {
        self.args.iter().filter(|a| a.is_error()).map(|a| &a.value)
    }
}

/// A named value attached to an [`Event`].
#[derive(Debug, Clone, Serialize)]
pub struct Arg {
    pub name: String,
    pub value: Value,
}

impl Arg {
    pub fn new(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Arg { name: name.into(), value: value.into() }
    }

    pub fn is_error(&self) -> bool {
        self.name == ERROR_ARG
    }
}

impl<N: Into<String>, V: Into<Value>> From<(N, V)> for Arg {
    fn from((name, value): (N, V)) -> Self {
        Arg::new(name, value)
    }
}

/// Value carried by an [`Arg`].
#[derive(Debug, Clone)]
pub enum Value {
    Str(String),
    Int(i64),
    Uint(u64),
    Float(f64),
    Bool(bool),
    List(Vec<Value>),
    Json(serde_json::Value),
    Error(Arc<dyn Error + Send + Sync>),
}

impl Value {
    /// Wrap any error so it renders as its message.
    pub fn error<E>(err: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        Value::Error(Arc::new(err))
    }

    /// An error value that only carries a message, for errors that cannot
    /// be owned (e.g. borrowed `&dyn Error` seen by the tracing bridge).
    pub fn message(text: impl Into<String>) -> Self {
        Value::Error(Arc::new(ErrorMessage(text.into())))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Value::Error(_))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(s) => f.write_str(s),
            Value::Int(n) => write!(f, "{}", n),
            Value::Uint(n) => write!(f, "{}", n),
            Value::Float(x) => write!(f, "{}", x),
            Value::Bool(b) => write!(f, "{}", b),
            Value::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i != 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str("]")
            }
            Value::Json(v) => write!(f, "{}", v),
            Value::Error(e) => write!(f, "{}", e),
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Str(s) => serializer.serialize_str(s),
            Value::Int(n) => serializer.serialize_i64(*n),
            Value::Uint(n) => serializer.serialize_u64(*n),
            Value::Float(x) => serializer.serialize_f64(*x),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Json(v) => v.serialize(serializer),
            Value::Error(e) => serializer.collect_str(e),
        }
    }
}

impl Serialize for Event {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("Event", 5)?;
        s.serialize_field("message", &self.message)?;
        s.serialize_field("source", &self.source)?;
        s.serialize_field("args", &self.args)?;
        s.serialize_field("time", &self.time)?;
        s.serialize_field("debug", &self.debug)?;
        s.end()
    }
}

/// Plain error carrying only its text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorMessage(pub String);

impl fmt::Display for ErrorMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Error for ErrorMessage {}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

macro_rules! value_from {
    ($variant:ident, $target:ty, $($t:ty),+) => {
        $(
            impl From<$t> for Value {
                fn from(v: $t) -> Self {
                    Value::$variant(v as $target)
                }
            }
        )+
    };
}

value_from!(Int, i64, i8, i16, i32, i64, isize);
value_from!(Uint, u64, u8, u16, u32, u64, usize);
value_from!(Float, f64, f32, f64);

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        Value::Json(v)
    }
}

impl From<std::io::Error> for Value {
    fn from(err: std::io::Error) -> Self {
        Value::error(err)
    }
}
