use serde::Serialize;
use serde_json::Value;

/// Output format for CLI responses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Text,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "text" => Ok(Self::Text),
            _ => Err(format!("Unknown format: {}. Use 'json' or 'text'", s)),
        }
    }
}

/// Wrapper for consistent CLI output
#[derive(Debug, Serialize)]
struct SuccessEnvelope<'a, T: Serialize> {
    status: &'static str,
    data: &'a T,
}

#[derive(Debug, Serialize)]
struct ErrorEnvelope<'a> {
    status: &'static str,
    error: &'a str,
}

/// Render a successful result in the chosen format
pub fn render_success<T: Serialize>(format: OutputFormat, data: &T) -> String {
    match format {
        OutputFormat::Json => to_json(&SuccessEnvelope {
            status: "success",
            data,
        }),
        OutputFormat::Text => {
            let value = serde_json::to_value(data).unwrap_or(Value::Null);
            let mut out = String::new();
            render_text_value(&value, 0, &mut out);
            out
        }
    }
}

/// Render an error in the chosen format
pub fn render_error(format: OutputFormat, error: &str) -> String {
    match format {
        OutputFormat::Json => to_json(&ErrorEnvelope {
            status: "error",
            error,
        }),
        OutputFormat::Text => format!("Error: {}", error),
    }
}

/// Print a successful result to stdout
pub fn print_success<T: Serialize>(format: OutputFormat, data: &T) {
    println!("{}", render_success(format, data).trim_end());
}

/// Print an error to stderr
pub fn print_error(format: OutputFormat, error: &str) {
    eprintln!("{}", render_error(format, error));
}

fn to_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|e| {
        format!(
            "{{\"status\":\"error\",\"error\":\"Serialization failed: {}\"}}",
            e
        )
    })
}

/// Recursively render a JSON value as indented `key: value` lines
fn render_text_value(value: &Value, indent: usize, out: &mut String) {
    let pad = " ".repeat(indent);
    match value {
        Value::Object(map) => {
            for (key, val) in map {
                match val {
                    Value::Object(_) | Value::Array(_) => {
                        out.push_str(&format!("{}{}:\n", pad, key));
                        render_text_value(val, indent + 2, out);
                    }
                    // multi-line strings (the XML itself) go below their key
                    Value::String(s) if s.contains('\n') => {
                        out.push_str(&format!("{}{}:\n{}\n", pad, key, s.trim_end()));
                    }
                    _ => out.push_str(&format!("{}{}: {}\n", pad, key, format_scalar(val))),
                }
            }
        }
        Value::Array(arr) if arr.is_empty() => out.push_str(&format!("{}(none)\n", pad)),
        Value::Array(arr) => {
            for val in arr {
                match val {
                    Value::Object(_) | Value::Array(_) => {
                        out.push_str(&format!("{}-\n", pad));
                        render_text_value(val, indent + 2, out);
                    }
                    _ => out.push_str(&format!("{}- {}\n", pad, format_scalar(val))),
                }
            }
        }
        _ => out.push_str(&format!("{}{}\n", pad, format_scalar(value))),
    }
}

fn format_scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        _ => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_json_envelope() {
        let rendered = render_success(OutputFormat::Json, &json!({"valid": true}));
        let parsed: Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(parsed["status"], "success");
        assert_eq!(parsed["data"]["valid"], true);
    }

    #[test]
    fn test_text_rendering() {
        let rendered = render_success(
            OutputFormat::Text,
            &json!({"valid": false, "errors": ["Invalid UETR format"], "uetr": null}),
        );
        assert!(rendered.contains("valid: false\n"));
        assert!(rendered.contains("errors:\n  - Invalid UETR format\n"));
        assert!(rendered.contains("uetr: null\n"));
    }

    #[test]
    fn test_error_rendering() {
        assert_eq!(render_error(OutputFormat::Text, "boom"), "Error: boom");
        let parsed: Value = serde_json::from_str(&render_error(OutputFormat::Json, "boom")).unwrap();
        assert_eq!(parsed["status"], "error");
    }
}
