//! Purpose: Run the parse/transform pipeline and encode its outcome as one JSON line.
//! Exports: `process`, `error_json`, `error_message`, `render_line`, `ENCODE_FAILED`.
//! Role: Converges every failure path onto the `{"error": string}` shape.
//! Invariants: `render_line` always returns a single line of valid JSON.
//! Invariants: Error payloads never echo the raw input text.
use serde_json::{Map, Value, json};

use crate::error::{Error, ErrorKind};
use crate::json::parse;
use crate::transform::{OutputRecord, transform};

pub const ENCODE_FAILED: &str = "{\"error\":\"json encode failed\"}";

pub fn process(input: Option<&str>) -> Result<OutputRecord, Error> {
    let Some(raw) = input else {
        return Err(Error::new(ErrorKind::MissingInput).with_message("no input provided"));
    };

    let value: Value = parse::from_str(raw).map_err(|err| {
        tracing::debug!(hint = %parse::hint_for_error(&err, "input argument"), "rejected input");
        Error::new(ErrorKind::InvalidJson)
            .with_message("invalid JSON input")
            .with_source(err)
    })?;

    transform(&value)
}

pub fn error_message(err: &Error) -> String {
    let base = match err.message() {
        Some(message) => message.to_string(),
        None => match err.kind() {
            ErrorKind::Internal => "internal error".to_string(),
            ErrorKind::Usage => "usage error".to_string(),
            ErrorKind::MissingInput => "no input provided".to_string(),
            ErrorKind::InvalidJson => "invalid JSON input".to_string(),
            ErrorKind::Processing => "processing failed".to_string(),
            ErrorKind::Io => "i/o error".to_string(),
        },
    };
    match std::error::Error::source(err) {
        Some(cause) => format!("{base}: {cause}"),
        None => base,
    }
}

pub fn error_json(err: &Error) -> Value {
    let mut outer = Map::new();
    outer.insert("error".to_string(), json!(error_message(err)));
    Value::Object(outer)
}

pub fn render_line(result: &Result<OutputRecord, Error>) -> String {
    let encoded = match result {
        Ok(output) => serde_json::to_string(output),
        Err(err) => serde_json::to_string(&error_json(err)),
    };
    encoded.unwrap_or_else(|err| {
        tracing::error!(error = %err, "failed to encode response");
        ENCODE_FAILED.to_string()
    })
}

#[cfg(test)]
mod tests {
    use super::{ENCODE_FAILED, error_json, error_message, process, render_line};
    use crate::error::{Error, ErrorKind};
    use crate::transform::GREETING;
    use serde_json::{Value, json};

    fn render(input: Option<&str>) -> Value {
        let line = render_line(&process(input));
        assert!(!line.contains('\n'));
        serde_json::from_str(&line).expect("valid json line")
    }

    #[test]
    fn success_line_has_result_then_message() {
        let line = render_line(&process(Some(r#"{"value": 5}"#)));
        assert_eq!(
            line,
            format!(r#"{{"processedResult":10,"message":"{GREETING}"}}"#)
        );
    }

    #[test]
    fn missing_input_is_reported() {
        let err = process(None).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingInput);
        assert_eq!(render(None), json!({"error": "no input provided"}));
    }

    #[test]
    fn invalid_json_carries_parser_detail() {
        let err = process(Some("not-json")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidJson);

        let value = render(Some("not-json"));
        let message = value["error"].as_str().expect("error string");
        assert!(message.starts_with("invalid JSON input: "));
        assert!(!message.contains("not-json"));
    }

    #[test]
    fn processing_error_has_single_error_key() {
        let value = render(Some(r#"{"value": "abc"}"#));
        let object = value.as_object().expect("object");
        assert_eq!(object.len(), 1);
        assert_eq!(object["error"], json!("\"value\" must be a number, got string"));
    }

    #[test]
    fn error_message_falls_back_to_kind_text() {
        assert_eq!(error_message(&Error::new(ErrorKind::Internal)), "internal error");
        assert_eq!(
            error_json(&Error::new(ErrorKind::Usage)),
            json!({"error": "usage error"})
        );
    }

    #[test]
    fn encode_failed_fallback_is_valid_json() {
        let value: Value = serde_json::from_str(ENCODE_FAILED).expect("valid json");
        assert!(value["error"].is_string());
    }
}
