//! Log event domain types
//!
//! A log event is one structured record emitted by the workflow engine. Two
//! keys are well known and get reduced to strings before transmission:
//! `job` (a job handle, sent as its display name) and `exception` (sent as
//! `"<kind>: <message>"`). Every other key is carried through untouched.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Key of the job handle field
pub const JOB_KEY: &str = "job";
/// Key of the exception field
pub const EXCEPTION_KEY: &str = "exception";

/// Opaque handle of a job, reduced to its display name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobHandle {
    pub name: String,
}

impl JobHandle {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Reads a handle from an incoming JSON value
    ///
    /// Accepts a bare string, an object with a `name` member, or any other
    /// scalar (rendered as JSON text).
    pub fn from_value(value: &Value) -> Self {
        let name = match value {
            Value::String(s) => s.clone(),
            Value::Object(obj) => match obj.get("name") {
                Some(Value::String(name)) => name.clone(),
                _ => value.to_string(),
            },
            other => other.to_string(),
        };
        Self { name }
    }
}

impl fmt::Display for JobHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Error raised by the engine, reduced to its kind and message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExceptionInfo {
    pub kind: String,
    pub message: String,
}

impl ExceptionInfo {
    pub fn new(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            message: message.into(),
        }
    }

    /// Reads an exception from an incoming JSON value
    ///
    /// Objects provide `kind` (or `type`) and `message`; a bare string is
    /// taken as the message of a generic `Exception`.
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Object(obj) => {
                let kind = obj
                    .get("kind")
                    .or_else(|| obj.get("type"))
                    .and_then(Value::as_str)
                    .unwrap_or("Exception");
                let message = match obj.get("message") {
                    None | Some(Value::Null) => String::new(),
                    Some(Value::String(s)) => s.clone(),
                    Some(other) => other.to_string(),
                };
                Self::new(kind, message)
            }
            Value::String(s) => Self::new("Exception", s.as_str()),
            Value::Null => Self::new("Exception", ""),
            other => Self::new("Exception", other.to_string()),
        }
    }

    /// Renders `"<kind>: <message>"`, using `Exception` for an empty message
    pub fn render(&self) -> String {
        let message = if self.message.is_empty() {
            "Exception"
        } else {
            self.message.as_str()
        };
        format!("{}: {}", self.kind, message)
    }
}

/// One field of a log event
#[derive(Debug, Clone, PartialEq)]
pub enum EventField {
    Job(JobHandle),
    Exception(ExceptionInfo),
    /// Any other key; the value is sent as-is
    Extra(String, Value),
}

impl EventField {
    /// Builds a field, routing the well-known keys to their typed variants
    pub fn from_entry(key: String, value: Value) -> Self {
        match key.as_str() {
            JOB_KEY => Self::Job(JobHandle::from_value(&value)),
            EXCEPTION_KEY => Self::Exception(ExceptionInfo::from_value(&value)),
            _ => Self::Extra(key, value),
        }
    }

    pub fn key(&self) -> &str {
        match self {
            Self::Job(_) => JOB_KEY,
            Self::Exception(_) => EXCEPTION_KEY,
            Self::Extra(key, _) => key,
        }
    }

    /// Value as transmitted to the server
    pub fn normalized_value(&self) -> Value {
        match self {
            Self::Job(job) => Value::String(job.to_string()),
            Self::Exception(exception) => Value::String(exception.render()),
            Self::Extra(_, value) => value.clone(),
        }
    }
}

/// A structured record emitted by the workflow engine
///
/// Fields keep their insertion order; inserting an existing key replaces the
/// previous value in place.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "Map<String, Value>")]
pub struct LogEvent {
    fields: Vec<EventField>,
}

impl LogEvent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: EventField) {
        match self.fields.iter_mut().find(|f| f.key() == field.key()) {
            Some(existing) => *existing = field,
            None => self.fields.push(field),
        }
    }

    pub fn with_job(mut self, job: JobHandle) -> Self {
        self.insert(EventField::Job(job));
        self
    }

    pub fn with_exception(mut self, exception: ExceptionInfo) -> Self {
        self.insert(EventField::Exception(exception));
        self
    }

    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(EventField::from_entry(key.into(), value.into()));
        self
    }

    pub fn fields(&self) -> &[EventField] {
        &self.fields
    }

    pub fn job(&self) -> Option<&JobHandle> {
        self.fields.iter().find_map(|f| match f {
            EventField::Job(job) => Some(job),
            _ => None,
        })
    }

    pub fn exception(&self) -> Option<&ExceptionInfo> {
        self.fields.iter().find_map(|f| match f {
            EventField::Exception(exception) => Some(exception),
            _ => None,
        })
    }

    /// Reduces the event to the mapping sent to the server
    pub fn to_normalized_map(&self) -> Map<String, Value> {
        self.fields
            .iter()
            .map(|field| (field.key().to_string(), field.normalized_value()))
            .collect()
    }

    /// Serializes the normalized mapping to a JSON string
    pub fn normalize(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.to_normalized_map())
    }
}

impl From<Map<String, Value>> for LogEvent {
    fn from(map: Map<String, Value>) -> Self {
        let mut event = LogEvent::new();
        for (key, value) in map {
            event.insert(EventField::from_entry(key, value));
        }
        event
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn decode(serialized: &str) -> Map<String, Value> {
        serde_json::from_str(serialized).unwrap()
    }

    #[test]
    fn test_job_is_reduced_to_display_name() {
        let event = LogEvent::new().with_job(JobHandle::new("align_reads"));
        let decoded = decode(&event.normalize().unwrap());
        assert_eq!(decoded["job"], json!("align_reads"));
    }

    #[test]
    fn test_exception_is_rendered_with_kind_and_message() {
        let event =
            LogEvent::new().with_exception(ExceptionInfo::new("ValueError", "bad input"));
        let decoded = decode(&event.normalize().unwrap());
        assert_eq!(decoded["exception"], json!("ValueError: bad input"));
    }

    #[test]
    fn test_exception_without_message_falls_back() {
        let event = LogEvent::new().with_exception(ExceptionInfo::new("KeyError", ""));
        assert_eq!(event.exception().unwrap().kind, "KeyError");
        let normalized = event.to_normalized_map();
        let rendered = normalized["exception"].as_str().unwrap();
        assert_eq!(rendered, "KeyError: Exception");
        assert!(rendered.ends_with(": Exception"));
    }

    #[test]
    fn test_other_values_pass_through() {
        let nested = json!({"inputs": ["a.fq", "b.fq"], "threads": 4, "ok": true});
        let event = LogEvent::new()
            .with_field("level", "progress")
            .with_field("done", 3)
            .with_field("detail", nested.clone())
            .with_field("missing", Value::Null);
        let decoded = decode(&event.normalize().unwrap());
        assert_eq!(decoded["level"], json!("progress"));
        assert_eq!(decoded["done"], json!(3));
        assert_eq!(decoded["detail"], nested);
        assert_eq!(decoded["missing"], Value::Null);
    }

    #[test]
    fn test_normalized_output_keeps_keys_and_order() {
        let event: LogEvent = serde_json::from_value(json!({
            "level": "job_info",
            "job": {"name": "sort_bam", "jobid": 7},
            "msg": "sorting",
            "exception": {"type": "RuntimeError", "message": "oom"},
            "wildcards": {"sample": "A"}
        }))
        .unwrap();

        let decoded = decode(&event.normalize().unwrap());
        let keys: Vec<&str> = decoded.keys().map(String::as_str).collect();
        assert_eq!(keys, ["level", "job", "msg", "exception", "wildcards"]);
        assert_eq!(event.job().unwrap().name, "sort_bam");
        assert_eq!(
            event.exception(),
            Some(&ExceptionInfo::new("RuntimeError", "oom"))
        );
        assert_eq!(decoded["job"], json!("sort_bam"));
        assert_eq!(decoded["exception"], json!("RuntimeError: oom"));
        assert_eq!(decoded["msg"], json!("sorting"));
        assert_eq!(decoded["wildcards"], json!({"sample": "A"}));
    }

    #[test]
    fn test_job_from_scalar_values() {
        assert_eq!(JobHandle::from_value(&json!("map")).name, "map");
        assert_eq!(JobHandle::from_value(&json!(12)).name, "12");
        assert_eq!(JobHandle::from_value(&json!({"jobid": 1})).name, r#"{"jobid":1}"#);
    }

    #[test]
    fn test_exception_from_string_and_null() {
        assert_eq!(
            ExceptionInfo::from_value(&json!("disk full")).render(),
            "Exception: disk full"
        );
        assert_eq!(
            ExceptionInfo::from_value(&Value::Null).render(),
            "Exception: Exception"
        );
        assert_eq!(
            ExceptionInfo::from_value(&json!({"kind": "IOError", "message": null})).render(),
            "IOError: Exception"
        );
    }

    #[test]
    fn test_reinserting_key_replaces_in_place() {
        let event = LogEvent::new()
            .with_field("a", 1)
            .with_job(JobHandle::new("first"))
            .with_field("b", 2)
            .with_field("job", "second");

        assert_eq!(event.fields().len(), 3);
        assert_eq!(event.job().unwrap().name, "second");
        assert_eq!(event.fields()[1].key(), "job");
    }

    #[test]
    fn test_non_object_is_rejected() {
        assert!(serde_json::from_value::<LogEvent>(json!(["not", "a", "map"])).is_err());
        assert!(serde_json::from_value::<LogEvent>(json!("text")).is_err());
    }

    #[test]
    fn test_empty_event_normalizes_to_empty_object() {
        assert_eq!(LogEvent::new().normalize().unwrap(), "{}");
    }
}
