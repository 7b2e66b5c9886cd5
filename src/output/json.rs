use serde::Serialize;

use super::{DetectionOutput, Formatter, ResponseOutput};

pub struct JsonFormatter;

fn to_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|e| format!(r#"{{"error":"{}"}}"#, e))
}

impl Formatter for JsonFormatter {
    fn detection(&self, output: &DetectionOutput) -> String {
        to_json(output)
    }

    fn response(&self, output: &ResponseOutput) -> String {
        to_json(output)
    }
}
