use serde_json::{Map, Value};

pub const EXPERIENCE: &str = "experience";
pub const PORTFOLIO: &str = "portfolio";
pub const TRADING_PLATFORM: &str = "tradingPlatform";
pub const CONTACT_PLATFORM: &str = "contactPlatform";
pub const CONTACT_HANDLE: &str = "contactHandle";
pub const OTHER_PLATFORM: &str = "otherPlatform";
pub const TIMESTAMP: &str = "timestamp";

/// A submission whose required fields are all present, textual and non-empty.
///
/// `other_platform` holds any truthy value of the optional field, already stringified.
///
/// Only [`validate`] produces one.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionRequest {
    experience: String,
    portfolio: String,
    trading_platform: String,
    contact_platform: String,
    contact_handle: String,
    other_platform: Option<String>,
    timestamp: String,
}

impl SubmissionRequest {
    pub fn experience(&self) -> &str {
        &self.experience
    }

    pub fn portfolio(&self) -> &str {
        &self.portfolio
    }

    pub fn trading_platform(&self) -> &str {
        &self.trading_platform
    }

    pub fn contact_platform(&self) -> &str {
        &self.contact_platform
    }

    pub fn contact_handle(&self) -> &str {
        &self.contact_handle
    }

    pub fn other_platform(&self) -> Option<&str> {
        self.other_platform.as_deref()
    }

    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FieldError {
    Missing(&'static str),
    Empty(&'static str),
    NotText(&'static str),
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldError::Missing(name) => write!(f, "Missing required field: {name}"),
            FieldError::Empty(name) => write!(f, "Required field is empty: {name}"),
            FieldError::NotText(name) => write!(f, "Expected string for field: {name}"),
        }
    }
}

impl std::error::Error for FieldError {}

/// Validate a decoded body. Anything that is not an object counts as an empty record.
pub fn validate(raw: &Value) -> Result<SubmissionRequest, FieldError> {
    let empty = Map::new();
    let obj = raw.as_object().unwrap_or(&empty);

    Ok(SubmissionRequest {
        experience: required(obj, EXPERIENCE)?,
        portfolio: required(obj, PORTFOLIO)?,
        trading_platform: required(obj, TRADING_PLATFORM)?,
        contact_platform: required(obj, CONTACT_PLATFORM)?,
        contact_handle: required(obj, CONTACT_HANDLE)?,
        timestamp: required(obj, TIMESTAMP)?,
        other_platform: optional(obj, OTHER_PLATFORM),
    })
}

fn required(obj: &Map<String, Value>, name: &'static str) -> Result<String, FieldError> {
    match obj.get(name) {
        None | Some(Value::Null) => Err(FieldError::Missing(name)),
        Some(Value::String(s)) if s.is_empty() => Err(FieldError::Empty(name)),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(_) => Err(FieldError::NotText(name)),
    }
}

/// Any truthy value is kept, stringified the way a browser would print it.
fn optional(obj: &Map<String, Value>, name: &str) -> Option<String> {
    obj.get(name)
        .filter(|value| is_truthy(value))
        .map(display_value)
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn display_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => match n.as_f64() {
            // 3.0 prints as 3
            Some(f) if !n.is_i64() && !n.is_u64() && f.fract() == 0.0 && f.abs() < 1e15 => {
                format!("{}", f as i64)
            }
            _ => n.to_string(),
        },
        Value::String(s) => s.clone(),
        Value::Array(items) => items.iter().map(display_value).collect::<Vec<_>>().join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}
