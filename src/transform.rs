//! Purpose: Pure mapping from an Input Record to an Output Record.
//! Exports: `OutputRecord`, `GREETING`, `VALUE_KEY`, `transform`, `double`.
//! Role: The only computation in the crate; callers own parsing and output.
//! Invariants: `processedResult` is the input's "value" times two (0 when absent).
//! Invariants: Non-numeric "value" or non-object input yields `ErrorKind::Processing`.
//! Invariants: Integer literals double exactly at any magnitude; floats double as `f64`.
//! Invariants: Results are always finite.
use serde::Serialize;
use serde_json::{Number, Value};

use crate::error::{Error, ErrorKind};
use crate::json::parse;

pub const GREETING: &str = "Hello from Rust!";
pub const VALUE_KEY: &str = "value";

/// Successful result. Field order is the order keys appear on stdout.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputRecord {
    pub processed_result: Number,
    pub message: String,
}

pub fn transform(input: &Value) -> Result<OutputRecord, Error> {
    let record = input.as_object().ok_or_else(|| {
        Error::new(ErrorKind::Processing).with_message(format!(
            "input must be a JSON object, got {}",
            json_type_name(input)
        ))
    })?;

    let processed_result = match record.get(VALUE_KEY) {
        None => Number::from(0),
        Some(Value::Number(number)) => double(number)?,
        Some(other) => {
            return Err(Error::new(ErrorKind::Processing).with_message(format!(
                "\"{VALUE_KEY}\" must be a number, got {}",
                json_type_name(other)
            )));
        }
    };

    tracing::debug!(%processed_result, "doubled value");
    Ok(OutputRecord {
        processed_result,
        message: GREETING.to_string(),
    })
}

/// Multiplies a JSON number by two without losing integer precision.
///
/// Relies on serde_json's `arbitrary_precision` so integers wider than `u64`
/// reach this point with their original digits.
pub fn double(number: &Number) -> Result<Number, Error> {
    if let Some(doubled) = number.as_i64().and_then(|value| value.checked_mul(2)) {
        return Ok(Number::from(doubled));
    }
    if let Some(doubled) = number.as_u64().and_then(|value| value.checked_mul(2)) {
        return Ok(Number::from(doubled));
    }
    if let Some(digits) = double_integer_literal(&number.to_string()) {
        return parse::from_str::<Number>(&digits).map_err(|err| {
            Error::new(ErrorKind::Internal)
                .with_message("doubled integer did not re-encode")
                .with_source(err)
        });
    }

    let value = number.as_f64().ok_or_else(|| {
        Error::new(ErrorKind::Processing).with_message(format!("unsupported number {number}"))
    })?;
    Number::from_f64(value * 2.0).ok_or_else(|| {
        Error::new(ErrorKind::Processing)
            .with_message(format!("doubling {number} leaves the representable range"))
    })
}

// Schoolbook doubling over an optionally signed run of ASCII digits.
fn double_integer_literal(text: &str) -> Option<String> {
    let (sign, digits) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text),
    };
    if digits.is_empty() || !digits.bytes().all(|byte| byte.is_ascii_digit()) {
        return None;
    }

    let mut reversed = String::with_capacity(digits.len() + 1);
    let mut carry = 0u8;
    for byte in digits.bytes().rev() {
        let doubled = (byte - b'0') * 2 + carry;
        reversed.push(char::from(b'0' + doubled % 10));
        carry = doubled / 10;
    }
    if carry > 0 {
        reversed.push(char::from(b'0' + carry));
    }

    let mut out = String::with_capacity(reversed.len() + 1);
    out.push_str(sign);
    out.extend(reversed.chars().rev());
    Some(out)
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
