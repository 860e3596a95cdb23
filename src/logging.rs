use std::sync::atomic::{AtomicU8, Ordering};

use serde_json::{Map, Number, Value};

static MIN_LEVEL: AtomicU8 = AtomicU8::new(LogLevel::Info.rank());

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
        }
    }

    const fn rank(self) -> u8 {
        match self {
            Self::Debug => 0,
            Self::Info => 1,
        }
    }

    fn from_rank(rank: u8) -> Self {
        if rank == 0 {
            Self::Debug
        } else {
            Self::Info
        }
    }
}

pub fn set_min_level(level: LogLevel) {
    MIN_LEVEL.store(level.rank(), Ordering::Relaxed);
}

pub fn min_level() -> LogLevel {
    LogLevel::from_rank(MIN_LEVEL.load(Ordering::Relaxed))
}

pub fn log_event(level: LogLevel, event: &str, fields: Value) {
    if level < min_level() {
        return;
    }

    let line = format_event(chrono::Utc::now().timestamp(), level, event, fields);
    emit(&line);
}

/// Builds the one-line JSON record. Extra fields never override `ts`, `level` or `event`.
pub fn format_event(ts: i64, level: LogLevel, event: &str, fields: Value) -> String {
    let mut payload = Map::new();
    payload.insert("ts".to_string(), Value::Number(Number::from(ts)));
    payload.insert("level".to_string(), Value::String(level.as_str().to_string()));
    payload.insert("event".to_string(), Value::String(event.to_string()));

    if let Value::Object(extra) = fields {
        for (key, value) in extra {
            payload.entry(key).or_insert(value);
        }
    }

    Value::Object(payload).to_string()
}

#[cfg(target_arch = "wasm32")]
fn emit(line: &str) {
    web_sys::console::log_1(&wasm_bindgen::JsValue::from_str(line));
}

#[cfg(not(target_arch = "wasm32"))]
fn emit(line: &str) {
    println!("{line}");
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn formats_reserved_keys_first_and_merges_fields() {
        let line = format_event(
            1_700_000_000,
            LogLevel::Info,
            "chat.option_selected",
            json!({ "option_id": 3, "remaining": 7 }),
        );
        let parsed: Value = serde_json::from_str(&line).expect("valid json");

        assert_eq!(parsed["ts"], 1_700_000_000);
        assert_eq!(parsed["level"], "info");
        assert_eq!(parsed["event"], "chat.option_selected");
        assert_eq!(parsed["option_id"], 3);
        assert_eq!(parsed["remaining"], 7);
    }

    #[test]
    fn extra_fields_cannot_shadow_reserved_keys() {
        let line = format_event(1, LogLevel::Debug, "nav.missing_target", json!({ "event": "spoofed" }));
        let parsed: Value = serde_json::from_str(&line).expect("valid json");

        assert_eq!(parsed["event"], "nav.missing_target");
        assert_eq!(parsed["level"], "debug");
    }

    #[test]
    fn non_object_fields_are_dropped() {
        let line = format_event(1, LogLevel::Info, "ambient.started", Value::Null);
        let parsed: Value = serde_json::from_str(&line).expect("valid json");

        assert_eq!(parsed.as_object().map(|object| object.len()), Some(3));
    }

    #[test]
    fn debug_sorts_below_info() {
        assert!(LogLevel::Debug < LogLevel::Info);
        assert_eq!(LogLevel::from_rank(LogLevel::Debug.rank()), LogLevel::Debug);
        assert_eq!(LogLevel::from_rank(LogLevel::Info.rank()), LogLevel::Info);
    }
}
