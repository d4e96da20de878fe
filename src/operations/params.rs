//! Typed access to the parameters of one input record

use crate::error::{Error, Result};
use crate::types::{is_truthy, JsonObject};
use serde_json::{Number, Value};

/// Parameters supplied for one input record
///
/// Collections (`additionalFields`, `options`, ...) are nested objects.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Params {
    values: JsonObject,
}

impl From<JsonObject> for Params {
    fn from(values: JsonObject) -> Self {
        Self { values }
    }
}

impl Params {
    /// Wrap a parameter object
    pub fn new(values: JsonObject) -> Self {
        Self { values }
    }

    /// Raw parameter value
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Parameter value if it is truthy
    pub fn truthy(&self, name: &str) -> Option<&Value> {
        self.get(name).filter(|v| is_truthy(v))
    }

    /// A required string (numbers are accepted and rendered)
    pub fn required_str(&self, name: &str) -> Result<String> {
        match self.get(name) {
            None | Some(Value::Null) => Err(Error::missing_param(name)),
            Some(value) => match scalar_string(value) {
                Some(s) if s.trim().is_empty() => Err(Error::missing_param(name)),
                Some(s) => Ok(s),
                None => Err(Error::invalid_param(name, "expected a string")),
            },
        }
    }

    /// A string with a default for missing or empty values
    pub fn str_or(&self, name: &str, default: &str) -> Result<String> {
        match self.get(name) {
            None | Some(Value::Null) => Ok(default.to_string()),
            Some(value) => match scalar_string(value) {
                Some(s) if s.is_empty() => Ok(default.to_string()),
                Some(s) => Ok(s),
                None => Err(Error::invalid_param(name, "expected a string")),
            },
        }
    }

    /// A string restricted to `allowed`, falling back to `default`
    pub fn choice(&self, name: &str, allowed: &[&str], default: &str) -> Result<String> {
        let value = self.str_or(name, default)?;
        if allowed.contains(&value.as_str()) {
            Ok(value)
        } else {
            Err(Error::invalid_param(
                name,
                format!("'{value}' is not one of {}", allowed.join(", ")),
            ))
        }
    }

    /// A number with a default; numeric strings are accepted
    pub fn number_or(&self, name: &str, default: f64) -> Result<Value> {
        match self.get(name) {
            None | Some(Value::Null) => Ok(number_value(default)),
            Some(Value::Number(n)) => Ok(Value::Number(n.clone())),
            Some(Value::String(s)) if s.trim().is_empty() => Ok(number_value(default)),
            Some(Value::String(s)) => s
                .trim()
                .parse::<f64>()
                .map(number_value)
                .map_err(|_| Error::invalid_param(name, format!("'{s}' is not a number"))),
            Some(_) => Err(Error::invalid_param(name, "expected a number")),
        }
    }

    /// A nested collection; missing means empty
    pub fn collection(&self, name: &str) -> Result<Params> {
        match self.get(name) {
            None | Some(Value::Null) => Ok(Params::default()),
            Some(Value::Object(map)) => Ok(Params::new(map.clone())),
            Some(_) => Err(Error::invalid_param(name, "expected an object")),
        }
    }

    /// Whether a flag parameter is truthy
    pub fn flag(&self, name: &str) -> bool {
        self.truthy(name).is_some()
    }
}

/// Render a string or number parameter as a string
fn scalar_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Integral values stay integers so they serialize without a fraction
fn number_value(n: f64) -> Value {
    if n.fract() == 0.0 && n.abs() < 9.0e15 {
        Value::Number(Number::from(n as i64))
    } else {
        Number::from_f64(n).map_or(Value::Null, Value::Number)
    }
}

/// Split a comma-separated tag list, trimming each entry
///
/// Arrays of strings are accepted as already split.
pub fn split_tags(name: &str, value: &Value) -> Result<Vec<String>> {
    match value {
        Value::String(s) => Ok(s.split(',').map(|tag| tag.trim().to_string()).collect()),
        Value::Array(items) => items
            .iter()
            .map(|item| {
                scalar_string(item)
                    .map(|s| s.trim().to_string())
                    .ok_or_else(|| Error::invalid_param(name, "tags must be strings"))
            })
            .collect(),
        _ => Err(Error::invalid_param(name, "expected a comma-separated string")),
    }
}

/// Parse a JSON-typed parameter that may arrive as text or as a value
pub fn json_value(value: &Value) -> std::result::Result<Value, serde_json::Error> {
    match value {
        Value::String(s) => serde_json::from_str(s),
        other => Ok(other.clone()),
    }
}

/// Render a query parameter value
pub fn query_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => match n.as_f64() {
            Some(f) if f.fract() == 0.0 => (f as i64).to_string(),
            _ => n.to_string(),
        },
        other => other.to_string(),
    }
}
